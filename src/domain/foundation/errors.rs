//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised by the analysis engine.
///
/// Consistency failures (CR above the acceptance threshold) are NOT errors by
/// default; they travel as warnings on the result. `Inconsistent` is only
/// returned when the caller's policy asks for rejection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Index {index} is out of range for {count} items")]
    OutOfRange { index: usize, count: usize },

    #[error("Degenerate matrix: {reason}")]
    DegenerateMatrix { reason: String },

    #[error("Degenerate column {column}: {reason}")]
    DegenerateColumn { column: usize, reason: String },

    #[error("Dimension mismatch for '{what}': expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Incomplete input: {reason}")]
    IncompleteInput { reason: String },

    #[error("Invalid item set: {reason}")]
    InvalidItemSet { reason: String },

    #[error("Inconsistent judgments: {reason}")]
    Inconsistent { reason: String },

    #[error("Degenerate scores: {reason}")]
    DegenerateScores { reason: String },
}

impl AnalysisError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(index: usize, count: usize) -> Self {
        AnalysisError::OutOfRange { index, count }
    }

    /// Creates a degenerate matrix error.
    pub fn degenerate_matrix(reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateMatrix {
            reason: reason.into(),
        }
    }

    /// Creates a degenerate column error.
    pub fn degenerate_column(column: usize, reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateColumn {
            column,
            reason: reason.into(),
        }
    }

    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        AnalysisError::DimensionMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Creates an incomplete input error.
    pub fn incomplete(reason: impl Into<String>) -> Self {
        AnalysisError::IncompleteInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid item set error.
    pub fn invalid_item_set(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidItemSet {
            reason: reason.into(),
        }
    }

    /// Creates an inconsistency error.
    pub fn inconsistent(reason: impl Into<String>) -> Self {
        AnalysisError::Inconsistent {
            reason: reason.into(),
        }
    }

    /// Creates a degenerate scores error.
    pub fn degenerate_scores(reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateScores {
            reason: reason.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InvalidValue { .. } => ErrorCode::InvalidValue,
            AnalysisError::OutOfRange { .. } => ErrorCode::OutOfRange,
            AnalysisError::DegenerateMatrix { .. } => ErrorCode::DegenerateMatrix,
            AnalysisError::DegenerateColumn { .. } => ErrorCode::DegenerateColumn,
            AnalysisError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            AnalysisError::IncompleteInput { .. } => ErrorCode::IncompleteInput,
            AnalysisError::InvalidItemSet { .. } => ErrorCode::InvalidItemSet,
            AnalysisError::Inconsistent { .. } => ErrorCode::Inconsistent,
            AnalysisError::DegenerateScores { .. } => ErrorCode::DegenerateScores,
        }
    }
}

/// Error codes exposed to collaborators (HTTP layers, CLIs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors
    InvalidValue,
    OutOfRange,
    InvalidItemSet,
    DimensionMismatch,
    IncompleteInput,

    // Numerical errors
    DegenerateMatrix,
    DegenerateColumn,
    DegenerateScores,

    // Policy errors
    Inconsistent,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidItemSet => "INVALID_ITEM_SET",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::IncompleteInput => "INCOMPLETE_INPUT",
            ErrorCode::DegenerateMatrix => "DEGENERATE_MATRIX",
            ErrorCode::DegenerateColumn => "DEGENERATE_COLUMN",
            ErrorCode::DegenerateScores => "DEGENERATE_SCORES",
            ErrorCode::Inconsistent => "INCONSISTENT",
        };
        write!(f, "{}", s)
    }
}
