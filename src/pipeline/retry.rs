/*!
 * Bounded retry around single provider calls.
 *
 * The policy is a fixed delay per reattempt, not exponential backoff: a
 * grammar check is cheap to repeat and the operator-facing arithmetic
 * (`max_retries` reattempts, `retry_delay` seconds apart) stays predictable.
 */

use std::time::Duration;

use log::warn;

use crate::errors::CheckError;
use crate::pipeline::CancellationToken;
use crate::providers::ProviderClient;

/// Retry policy applied to every provider call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of reattempts after the initial call
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Build a policy from configuration values
    pub fn new(max_retries: u32, retry_delay_secs: f64) -> Self {
        Self {
            max_retries,
            retry_delay: Duration::from_secs_f64(retry_delay_secs.max(0.0)),
        }
    }

    /// Send one prompt, retrying transient failures within budget.
    ///
    /// A persistently failing call makes exactly `max_retries + 1` attempts
    /// before returning `CheckError::ExhaustedRetries`. Non-transient errors
    /// fail immediately as `CheckError::NonRetryable` without consuming any
    /// retry budget. Cancellation between attempts stops further retries and
    /// surfaces as `CheckError::Cancelled`; the in-flight call is always
    /// allowed to finish naturally.
    pub async fn call_with_retry(
        &self,
        provider: &mut dyn ProviderClient,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, CheckError> {
        let total_attempts = self.max_retries + 1;
        let mut attempt = 1;

        loop {
            match provider.send_message(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if !e.is_transient() => {
                    warn!("{} call rejected, not retrying: {}", provider.name(), e);
                    return Err(CheckError::NonRetryable(e));
                }
                Err(e) => {
                    if attempt >= total_attempts {
                        warn!(
                            "{} call failed after {} attempts: {}",
                            provider.name(),
                            attempt,
                            e
                        );
                        return Err(CheckError::ExhaustedRetries {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                    if cancel.is_cancelled() {
                        warn!(
                            "{} call abandoned after {} attempts, cancellation requested",
                            provider.name(),
                            attempt
                        );
                        return Err(CheckError::Cancelled {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                    warn!(
                        "{} call failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider.name(),
                        attempt,
                        total_attempts,
                        self.retry_delay.as_secs_f64(),
                        e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
