use std::fmt;

use serde::{Deserialize, Serialize};

/// A per-row problem, tagged with the 1-based source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

impl std::error::Error for RowError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    Imported { row: usize, event_id: String },
    /// Row deliberately not imported (policy), counted as an error.
    Skipped(RowError),
    Failed(RowError),
}

impl RowOutcome {
    pub fn error(&self) -> Option<&RowError> {
        match self {
            Self::Imported { .. } => None,
            Self::Skipped(error) | Self::Failed(error) => Some(error),
        }
    }
}

/// Run-level tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub attempted: usize,
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Conversion warnings across all rows (non-fatal).
    pub conversion_warnings: usize,
    /// Set when the failure budget stopped the run early.
    pub aborted: bool,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn record(&mut self, outcome: RowOutcome) {
        self.attempted += 1;
        match outcome {
            RowOutcome::Imported { .. } => self.imported += 1,
            RowOutcome::Skipped(error) => {
                self.skipped += 1;
                self.errors.push(error);
            }
            RowOutcome::Failed(error) => {
                self.failed += 1;
                self.errors.push(error);
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.skipped + self.failed
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0 || self.aborted
    }

    /// The first `limit` error messages and how many were left out.
    pub fn leading_errors(&self, limit: usize) -> (&[RowError], usize) {
        let shown = self.errors.len().min(limit);
        (&self.errors[..shown], self.errors.len() - shown)
    }
}
