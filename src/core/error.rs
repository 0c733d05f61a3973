//! Error types for snapshot construction and scenario import
//!
//! Shape violations are reported with enough context to point at the bad row;
//! import failures collapse into a single opaque condition because the user can
//! only fix them by pasting a different document.

use thiserror::Error;

/// A snapshot whose matrices do not agree on their dimensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// `allocated` and `requested` have a different number of rows
    #[error("allocated has {allocated} rows but requested has {requested}")]
    ProcessCountMismatch { allocated: usize, requested: usize },

    /// A matrix row does not have one column per resource type
    #[error("{matrix} row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        matrix: &'static str,
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A scenario document that cannot be turned into a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Invalid scenario JSON. Please check the format.")]
    InvalidFormat,
}
