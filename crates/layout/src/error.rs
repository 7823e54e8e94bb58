// ---------------------------------------------------------------------------
// LayoutError: failures reported back to whoever triggered an operation
// ---------------------------------------------------------------------------

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors from layout operations.
///
/// Every variant is recoverable: the operation that produced it made no change
/// to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutError {
    /// Tabular input had fewer than two non-blank lines (header + one row).
    NotEnoughRows { found: usize },
    /// Auto-layout was asked to place zero records.
    EmptyDataset,
    /// The drafted blueprint has a different number of building groups than
    /// there are pending metadata records.
    GroupCountMismatch { expected: usize, found: usize },
    /// No blueprint is open in the editor.
    NoOpenBlueprint,
    /// The layout generator's output could not be decoded.
    GeneratedLayout(String),
    /// A building or connection id did not resolve.
    UnknownId(String),
    /// A building with this id already exists.
    DuplicateId(String),
    /// An action was queued but the executor recorded no result for it.
    NotExecuted(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NotEnoughRows { found } => write!(
                f,
                "CSV has no data rows: expected a header and at least one row, found {found} non-blank line(s)"
            ),
            LayoutError::EmptyDataset => {
                write!(f, "No data found in ingestion pool to auto-map.")
            }
            LayoutError::GroupCountMismatch { expected, found } => write!(
                f,
                "Architectural mismatch: your dataset requires exactly {expected} clusters. You have drafted {found}."
            ),
            LayoutError::NoOpenBlueprint => write!(f, "No blueprint is open in the editor"),
            LayoutError::GeneratedLayout(msg) => {
                write!(f, "Generated layout could not be read: {msg}")
            }
            LayoutError::UnknownId(id) => write!(f, "Unknown id: {id}"),
            LayoutError::DuplicateId(id) => write!(f, "Id already in use: {id}"),
            LayoutError::NotExecuted(action) => {
                write!(f, "{action} was queued but never executed")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::GeneratedLayout(e.to_string())
    }
}
