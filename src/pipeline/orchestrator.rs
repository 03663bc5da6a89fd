/*!
 * The check orchestrator.
 *
 * Drives each paragraph through its per-paragraph lifecycle:
 * Pending -> SessionAcquired -> ChecksInFlight -> Finalized. Paragraphs are
 * processed strictly sequentially in source order; all checks of one
 * paragraph run under the same session, grammar first, then the configured
 * supplementary checks. Interleaving paragraphs under one session would
 * corrupt the conversational context, so the sequencing is a contract of
 * this module, not an incidental limitation.
 */

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::app_config::{Config, Language};
use crate::document::Paragraph;
use crate::errors::AppError;
use crate::pipeline::aggregator::{CellOutcome, ResultAggregator, ResultRow};
use crate::pipeline::prompts::build_prompt;
use crate::pipeline::retry::RetryPolicy;
use crate::pipeline::session::{SessionDecision, SessionManager};
use crate::pipeline::{CancellationToken, CheckSpec, ProgressEvent, ProgressReporter};
use crate::providers::ProviderClient;

/// Configuration consumed by the orchestration core
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Target natural language for prompts
    pub language: Language,
    /// Maximum number of reattempts per provider call
    pub max_retries: u32,
    /// Fixed delay between retry attempts, in seconds
    pub retry_delay: f64,
    /// Paragraphs processed per session before a refresh
    pub session_refresh_interval: usize,
    /// Supplementary check requirements, in order
    pub additional_checks: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            max_retries: 3,
            retry_delay: 1.0,
            session_refresh_interval: 3,
            additional_checks: Vec::new(),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            language: config.language,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            session_refresh_interval: config.session_refresh_interval,
            additional_checks: config.additional_checks.clone(),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every paragraph was processed
    Completed,
    /// Cancellation stopped the run early; rows cover a prefix of the input
    Cancelled,
}

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct RunReport {
    /// Finalized rows, sorted by paragraph index
    pub rows: Vec<ResultRow>,
    /// Whether the run completed or was cancelled
    pub status: RunStatus,
    /// Number of sessions created during the run
    pub sessions_created: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let status = match self.status {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled (partial result)",
        };
        format!(
            "Run {}: {} rows, {} sessions, {:.1}s",
            status,
            self.rows.len(),
            self.sessions_created,
            self.elapsed.as_secs_f64()
        )
    }
}

/// The central driver of the check pipeline
pub struct CheckOrchestrator {
    provider: Box<dyn ProviderClient>,
    config: PipelineConfig,
    session_manager: SessionManager,
    retry: RetryPolicy,
}

impl CheckOrchestrator {
    /// Create an orchestrator bound to one provider for one run
    pub fn new(provider: Box<dyn ProviderClient>, config: PipelineConfig) -> Self {
        let session_manager = SessionManager::new(config.session_refresh_interval);
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay);
        Self {
            provider,
            config,
            session_manager,
            retry,
        }
    }

    /// The full check set applied to every paragraph: grammar first, then the
    /// supplementary checks in configured order. Blank requirements are
    /// skipped, matching how the configuration treats them as absent.
    fn required_checks(&self) -> Vec<CheckSpec> {
        let mut checks = vec![CheckSpec::Grammar];
        for requirement in &self.config.additional_checks {
            if !requirement.trim().is_empty() {
                checks.push(CheckSpec::Supplementary(requirement.clone()));
            }
        }
        checks
    }

    /// Process every paragraph and return the aggregated rows.
    ///
    /// Fatal conditions (no input, provider unreachable or rejecting
    /// credentials at startup) abort before any paragraph is processed.
    /// Per-check failures never abort; they surface as failure markers in
    /// the affected cells. Cancellation yields a partial result covering the
    /// paragraphs already finalized.
    pub async fn run(
        &mut self,
        paragraphs: &[Paragraph],
        reporter: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<RunReport, AppError> {
        let started = Instant::now();

        if paragraphs.is_empty() {
            let reason = "document contains no paragraphs".to_string();
            reporter.report(ProgressEvent::RunAborted {
                reason: reason.clone(),
            });
            return Err(AppError::Document(reason));
        }

        // A rejected credential or unreachable provider makes every later
        // call pointless, so probe once before the first paragraph.
        if let Err(e) = self.provider.verify().await {
            reporter.report(ProgressEvent::RunAborted {
                reason: e.to_string(),
            });
            return Err(AppError::ProviderUnavailable(e));
        }

        info!(
            "Starting check run: {} paragraphs, {} checks per paragraph",
            paragraphs.len(),
            self.required_checks().len()
        );

        let checks = self.required_checks();
        let mut aggregator = ResultAggregator::new();

        for paragraph in paragraphs {
            if cancel.is_cancelled() {
                return Ok(self.cancelled_report(aggregator, reporter, started));
            }

            // Pending -> SessionAcquired
            let decision = self
                .session_manager
                .ensure_session_for(paragraph.index, self.provider.as_mut());
            if decision == SessionDecision::Refreshed {
                reporter.report(ProgressEvent::SessionRefreshed {
                    index: paragraph.index,
                });
            }
            reporter.report(ProgressEvent::ParagraphStarted {
                index: paragraph.index,
            });

            // SessionAcquired -> ChecksInFlight -> Finalized
            let row = match self
                .process_paragraph(paragraph, &checks, reporter, cancel)
                .await
            {
                Some(row) => row,
                // Cancelled mid-paragraph: the in-progress row is abandoned,
                // only finalized rows are returned
                None => return Ok(self.cancelled_report(aggregator, reporter, started)),
            };

            aggregator.accept(row);
            self.session_manager.paragraph_finalized();
            debug!("Paragraph {} finalized", paragraph.index);
        }

        let rows = aggregator.finalize();
        reporter.report(ProgressEvent::RunCompleted { rows: rows.len() });
        Ok(RunReport {
            rows,
            status: RunStatus::Completed,
            sessions_created: self.session_manager.sessions_created(),
            elapsed: started.elapsed(),
        })
    }

    /// Run every check for one paragraph under the current session.
    ///
    /// Returns `None` when cancellation was requested before a check started,
    /// in which case no further provider calls are issued.
    async fn process_paragraph(
        &mut self,
        paragraph: &Paragraph,
        checks: &[CheckSpec],
        reporter: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Option<ResultRow> {
        // Grammar is always the first check; it seeds the row
        if cancel.is_cancelled() {
            return None;
        }
        let grammar = self
            .run_check(paragraph, &CheckSpec::Grammar, reporter, cancel)
            .await;
        let mut row = ResultRow::new(paragraph.index, paragraph.text.clone(), grammar);

        for check in checks.iter().skip(1) {
            if cancel.is_cancelled() {
                return None;
            }
            let outcome = self.run_check(paragraph, check, reporter, cancel).await;
            row.push_supplementary(check.label(), outcome);
        }

        Some(row)
    }

    /// One check: build the prompt, call through the retry policy, route
    /// failure to the progress sink
    async fn run_check(
        &mut self,
        paragraph: &Paragraph,
        check: &CheckSpec,
        reporter: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> CellOutcome {
        let prompt = build_prompt(&paragraph.text, check, self.config.language);
        match self
            .retry
            .call_with_retry(self.provider.as_mut(), &prompt, cancel)
            .await
        {
            Ok(text) => CellOutcome::Text(text),
            Err(e) => {
                reporter.report(ProgressEvent::CheckFailed {
                    index: paragraph.index,
                    check: check.label().to_string(),
                    reason: e.to_string(),
                });
                CellOutcome::from_error(&e)
            }
        }
    }

    fn cancelled_report(
        &self,
        aggregator: ResultAggregator,
        reporter: &dyn ProgressReporter,
        started: Instant,
    ) -> RunReport {
        let rows = aggregator.finalize();
        reporter.report(ProgressEvent::RunCancelled {
            rows_completed: rows.len(),
        });
        RunReport {
            rows,
            status: RunStatus::Cancelled,
            sessions_created: self.session_manager.sessions_created(),
            elapsed: started.elapsed(),
        }
    }
}
