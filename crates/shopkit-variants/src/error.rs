//! Engine error types.
//!
//! Data-quality problems (malformed numerics, missing optional cells) are
//! never errors here; they degrade to defaults inside the codec. Errors are
//! reserved for structural parse failures and validation verdicts, and carry
//! enough structure for the caller to point at the offending row or
//! combination. This crate does no user-facing formatting of its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural failures of the tabular codec.
///
/// These are the only conditions under which parsing aborts; everything else
/// degrades to per-cell defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TableError {
    /// Input had no data rows (empty or header-only text).
    #[error("table has no data rows")]
    NoDataRows,

    /// A quoted field was still open at the end of a line.
    #[error("unterminated quoted field on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Errors returned by the variant builder entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The import text could not be parsed at all.
    #[error("malformed table: {0}")]
    Table(#[from] TableError),

    /// The generation request's base price was non-finite or not strictly
    /// positive. Nothing is generated from such a request.
    #[error("invalid base price {0}")]
    InvalidBasePrice(f64),

    /// One or more generated combinations failed batch validation.
    ///
    /// The generation path is all-or-nothing: no partial variant list is
    /// returned alongside these issues.
    #[error("{} combination(s) failed batch validation", .0.len())]
    InvalidBatch(Vec<BatchIssue>),

    /// One or more imported rows failed validation.
    ///
    /// The import path collects every row's problems before reporting, so
    /// this list covers the whole file in one pass.
    #[error("{} row(s) failed import validation", .0.len())]
    InvalidImport(Vec<RowIssue>),
}

/// A validation failure for one generated combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchIssue {
    /// Zero-based index of the combination in generation order.
    pub combination_index: usize,
    /// The SKU the combination resolved to.
    pub sku: String,
    /// What went wrong.
    pub kind: BatchIssueKind,
}

/// The ways a generated combination can fail validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum BatchIssueKind {
    /// Resolved price was non-finite or not strictly positive.
    #[error("invalid price {price}")]
    InvalidPrice { price: f64 },

    /// SKU collided with an earlier combination's SKU (exact match).
    #[error("duplicate of SKU first generated at index {first_index}")]
    DuplicateSku { first_index: usize },
}

/// A validation failure for one imported data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    /// One-based data-row index (the header row is not counted).
    pub row_index: usize,
    /// What went wrong.
    pub kind: RowIssueKind,
}

/// The ways an imported row can fail validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum RowIssueKind {
    /// SKU cell was blank.
    #[error("blank SKU")]
    BlankSku,

    /// Price was non-finite or not strictly positive.
    #[error("invalid price {price}")]
    InvalidPrice { price: f64 },

    /// The row carried no attribute columns at all.
    #[error("no attribute columns matched")]
    NoAttributeColumns,

    /// An attribute column's header matched no known attribute.
    #[error("unknown attribute column {column:?}")]
    UnknownAttribute { column: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_display() {
        let err = TableError::UnterminatedQuote { line: 4 };
        assert_eq!(err.to_string(), "unterminated quoted field on line 4");
    }

    #[test]
    fn test_engine_error_counts_issues() {
        let err = EngineError::InvalidBatch(vec![
            BatchIssue {
                combination_index: 0,
                sku: "A".into(),
                kind: BatchIssueKind::InvalidPrice { price: -1.0 },
            },
            BatchIssue {
                combination_index: 2,
                sku: "A".into(),
                kind: BatchIssueKind::DuplicateSku { first_index: 0 },
            },
        ]);
        assert_eq!(err.to_string(), "2 combination(s) failed batch validation");
    }

    #[test]
    fn test_table_error_converts_to_engine_error() {
        let err: EngineError = TableError::NoDataRows.into();
        assert!(matches!(err, EngineError::Table(TableError::NoDataRows)));
    }
}
