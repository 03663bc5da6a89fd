/*!
 * Mock provider implementation for testing.
 *
 * This module provides a scripted provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a deterministic reply
 * - `MockProvider::failing()` - Always fails with a transient error
 * - `MockProvider::rejecting()` - Always fails with a non-retryable error
 * - `MockProvider::failing_for(needle)` - Fails only when the prompt contains `needle`
 * - `MockProvider::fail_first(n)` - Fails the first n calls, then succeeds
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::ProviderClient;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a deterministic reply
    Working,
    /// Always fails with a transient connection error
    Failing,
    /// Always fails with a non-retryable authentication error
    Rejecting,
    /// Fails with a transient error whenever the prompt contains the needle
    FailingFor(String),
    /// Fails the first `failures` calls with a transient error, then succeeds
    FailFirst(usize),
}

/// Shared call tracking, visible to tests after the provider has been
/// moved into the orchestrator
#[derive(Debug, Default)]
pub struct MockTracker {
    /// Total send_message calls made
    pub calls: AtomicUsize,
    /// Total reset_session calls made
    pub resets: AtomicUsize,
    /// Every prompt received, in order
    pub prompts: Mutex<Vec<String>>,
}

impl MockTracker {
    /// Number of send_message calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of reset_session calls so far
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    /// Snapshot of the prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

/// Mock provider for exercising the check pipeline without network access
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    tracker: Arc<MockTracker>,
    /// When set, verify() fails with an authentication error
    verify_fails: bool,
}

impl MockProvider {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            tracker: Arc::new(MockTracker::default()),
            verify_fails: false,
        }
    }

    /// Create a mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock provider that always fails with a transient error
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock provider that always fails with a non-retryable error
    pub fn rejecting() -> Self {
        Self::new(MockBehavior::Rejecting)
    }

    /// Create a mock provider that fails only when the prompt contains `needle`
    pub fn failing_for(needle: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailingFor(needle.into()))
    }

    /// Create a mock provider that fails the first `failures` calls
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst(failures))
    }

    /// Make verify() fail with an authentication error
    pub fn with_failing_verify(mut self) -> Self {
        self.verify_fails = true;
        self
    }

    /// Get a handle on the call tracker
    pub fn tracker(&self) -> Arc<MockTracker> {
        Arc::clone(&self.tracker)
    }

    /// Deterministic reply derived from the prompt, so repeated runs with the
    /// same input produce identical output
    fn reply_for(prompt: &str) -> String {
        let first_line = prompt.lines().next().unwrap_or("").trim();
        format!("reviewed: {}", first_line)
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn send_message(&mut self, prompt: &str) -> Result<String, ProviderError> {
        let call_number = self.tracker.calls.fetch_add(1, Ordering::SeqCst);
        self.tracker
            .prompts
            .lock()
            .unwrap()
            .push(prompt.to_string());

        match &self.behavior {
            MockBehavior::Working => Ok(Self::reply_for(prompt)),
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock connection refused".to_string(),
            )),
            MockBehavior::Rejecting => Err(ProviderError::AuthenticationError(
                "mock credentials revoked".to_string(),
            )),
            MockBehavior::FailingFor(needle) => {
                if prompt.contains(needle.as_str()) {
                    Err(ProviderError::ConnectionError(format!(
                        "mock failure for prompt containing {:?}",
                        needle
                    )))
                } else {
                    Ok(Self::reply_for(prompt))
                }
            }
            MockBehavior::FailFirst(failures) => {
                if call_number < *failures {
                    Err(ProviderError::ConnectionError(format!(
                        "mock failure on call {}",
                        call_number + 1
                    )))
                } else {
                    Ok(Self::reply_for(prompt))
                }
            }
        }
    }

    fn reset_session(&mut self) {
        self.tracker.resets.fetch_add(1, Ordering::SeqCst);
    }

    async fn verify(&self) -> Result<(), ProviderError> {
        if self.verify_fails {
            Err(ProviderError::AuthenticationError(
                "mock verify failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
