//! Error types for the association scorer
//!
//! Core matrix and significance operations return [`Error`]. Loading data from
//! disk or DataFrames goes through `anyhow` with context instead.

use thiserror::Error;

/// Errors raised before any computation takes place.
///
/// Degenerate inputs (zero grand total, empty margins) are not errors: they
/// surface as non-finite values in the result grids.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Sample and feature axes must be `(0, 1)` or `(1, 0)`.
    #[error("Invalid axis arguments: sample_axis={sample_axis}, feature_axis={feature_axis} (expected 0/1 or 1/0)")]
    InvalidAxis {
        sample_axis: usize,
        feature_axis: usize,
    },

    /// A count matrix needs at least one row and one column.
    #[error("Count matrix must have at least one row and one column, got {rows}x{cols}")]
    EmptyMatrix { rows: usize, cols: usize },

    /// Number of cells does not match `rows * cols`.
    #[error("Shape mismatch: expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Labels along one axis must be distinct.
    #[error("Duplicate {axis} label '{label}'")]
    DuplicateLabel { axis: &'static str, label: String },

    /// The hypergeometric distribution rejected its parameters.
    #[error("Hypergeometric distribution error: {0}")]
    Distribution(String),

    /// Origin element for a positional lookup is absent from its context.
    #[error("Element not found in context")]
    ElementNotInContext,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_axis_message() {
        let err = Error::InvalidAxis { sample_axis: 0, feature_axis: 0 };
        let msg = err.to_string();
        assert!(msg.contains("sample_axis=0"));
        assert!(msg.contains("feature_axis=0"));
    }

    #[test]
    fn test_duplicate_label_message() {
        let err = Error::DuplicateLabel { axis: "row", label: "w1".to_string() };
        assert_eq!(err.to_string(), "Duplicate row label 'w1'");
    }
}
