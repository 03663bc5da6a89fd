/*!
 * Result aggregation.
 *
 * Accumulates per-paragraph, per-check outcomes into row records and emits
 * them in original paragraph order. Rows are never dropped: a paragraph whose
 * checks all failed still yields a row filled with failure markers, so the
 * output row count always equals the input paragraph count.
 */

use crate::errors::CheckError;

/// Outcome of one check, held in one result cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// The model's response text
    Text(String),
    /// Failure marker, distinguishing an incomplete check from a short answer
    Failed {
        /// Short classification label
        kind: String,
        /// Human-readable reason for diagnostics
        reason: String,
    },
}

impl CellOutcome {
    /// Build a failure cell from a terminal check error
    pub fn from_error(error: &CheckError) -> Self {
        Self::Failed {
            kind: error.kind().to_string(),
            reason: error.to_string(),
        }
    }

    /// Render the cell for the tabular report
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Failed { kind, .. } => format!("[check failed: {}]", kind),
        }
    }
}

/// One output row: all check outcomes for one paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Position of the paragraph in the source document
    pub paragraph_index: usize,
    /// The original paragraph text
    pub original_text: String,
    /// Outcome of the grammar check
    pub grammar: CellOutcome,
    /// Outcomes of the supplementary checks, in configured order
    pub supplementary: Vec<(String, CellOutcome)>,
}

impl ResultRow {
    /// Start a row with its grammar outcome; supplementary outcomes follow
    pub fn new(paragraph_index: usize, original_text: impl Into<String>, grammar: CellOutcome) -> Self {
        Self {
            paragraph_index,
            original_text: original_text.into(),
            grammar,
            supplementary: Vec::new(),
        }
    }

    /// Record one supplementary check outcome
    pub fn push_supplementary(&mut self, name: impl Into<String>, outcome: CellOutcome) {
        self.supplementary.push((name.into(), outcome));
    }
}

/// Accumulates finalized rows and emits them sorted by paragraph index.
///
/// The sequential orchestrator already delivers rows in order, but the
/// aggregator does not assume this; it sorts on finalize so a future
/// concurrent orchestrator would still produce correctly ordered output.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    rows: Vec<ResultRow>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept one finalized row
    pub fn accept(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Number of rows accepted so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been accepted yet
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hand off all rows, sorted by paragraph index
    pub fn finalize(mut self) -> Vec<ResultRow> {
        self.rows.sort_by_key(|row| row.paragraph_index);
        self.rows
    }
}
