/*!
 * The check orchestration pipeline.
 *
 * This is the core of docproof: it drives a long-running conversational
 * session with a remote model over an ordered sequence of paragraphs,
 * refreshing the session at a configured interval, retrying failed calls
 * with a bounded fixed-delay policy, and aggregating per-paragraph results
 * into an order-preserving row set.
 *
 * The pipeline is organized in these modules:
 * - `prompts`: pure prompt construction for grammar and supplementary checks
 * - `session`: session lifecycle and refresh accounting
 * - `retry`: bounded retry around single provider calls
 * - `orchestrator`: the sequential per-paragraph driver
 * - `aggregator`: row accumulation and ordered emission
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod aggregator;
pub mod orchestrator;
pub mod prompts;
pub mod retry;
pub mod session;

pub use aggregator::{CellOutcome, ResultAggregator, ResultRow};
pub use orchestrator::{CheckOrchestrator, PipelineConfig, RunReport, RunStatus};
pub use prompts::build_prompt;
pub use retry::RetryPolicy;
pub use session::{Session, SessionManager};

/// A requested review operation applied to a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckSpec {
    /// The always-present grammar/style review
    Grammar,
    /// A user-supplied free-text requirement
    Supplementary(String),
}

impl CheckSpec {
    /// Column/event label for this check
    pub fn label(&self) -> &str {
        match self {
            Self::Grammar => "grammar",
            Self::Supplementary(name) => name,
        }
    }
}

/// Lifecycle events emitted while a run is in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Processing of a paragraph has started
    ParagraphStarted { index: usize },
    /// The session was refreshed before this paragraph
    SessionRefreshed { index: usize },
    /// One check failed after the retry policy ran its course
    CheckFailed {
        index: usize,
        check: String,
        reason: String,
    },
    /// The run finished cleanly with this many rows
    RunCompleted { rows: usize },
    /// The run was cancelled; only this many rows were finalized
    RunCancelled { rows_completed: usize },
    /// The run aborted before producing any rows
    RunAborted { reason: String },
}

/// Sink for progress events, implemented by the presentation layer
pub trait ProgressReporter: Send + Sync {
    /// Receive one lifecycle event
    fn report(&self, event: ProgressEvent);
}

/// Reporter that discards all events
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&self, _event: ProgressEvent) {}
}

/// Cooperative cancellation flag shared between the run and its host.
///
/// Cancellation is checked at paragraph boundaries and between retry
/// attempts; in-flight provider calls are allowed to complete naturally.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
