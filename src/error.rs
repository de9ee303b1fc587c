//! Error types for STRATA

use thiserror::Error;

/// Result type alias using STRATA's error
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised by matrix construction and multiplication
///
/// Every check runs before a result is allocated, so an `Err` never comes
/// with a partially computed matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Malformed input: ragged rows, no rows, non-square where a square
    /// operand is required, or inconsistent sparse arrays
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// What is wrong with the input
        reason: String,
    },

    /// Operand sizes are incompatible for the requested multiplication
    #[error("Dimension mismatch in {operation}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// The operation that rejected its operands
        operation: &'static str,
        /// The size the operation required
        expected: usize,
        /// The size it was given
        got: usize,
    },

    /// A tuning parameter is outside its valid range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The worker pool could not be created
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl MatrixError {
    pub(crate) fn invalid_shape(reason: impl Into<String>) -> Self {
        MatrixError::InvalidShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(operation: &'static str, expected: usize, got: usize) -> Self {
        MatrixError::DimensionMismatch {
            operation,
            expected,
            got,
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        MatrixError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
