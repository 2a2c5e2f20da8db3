//! Error types for AHP computations.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AhpError>;

/// Fatal errors raised while building matrices or evaluating a hierarchy.
///
/// Any of these aborts the current evaluation; no partial result is
/// returned. Inconsistent judgments are not errors, see
/// [`ConsistencyWarning`](crate::engine::ConsistencyWarning).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// A comparison value is non-positive, NaN, infinite, or a judgment
    /// strength lies outside the Saaty scale. A matrix with no items is
    /// reported at `(0, 0)` with value `0`.
    #[error("invalid comparison at ({row}, {col}): {value}")]
    InvalidComparison {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The rejected value.
        value: f64,
    },

    /// A criterion or alternative name is empty.
    #[error("empty {kind} name at position {index}")]
    InvalidName {
        /// `"criterion"` or `"alternative"`.
        kind: &'static str,
        /// Position of the empty name in the input list.
        index: usize,
    },

    /// Counts or sizes of the inputs do not line up.
    #[error("dimension mismatch in {context}: expected {expected}, actual {actual}")]
    DimensionMismatch {
        /// Which input was being checked.
        context: &'static str,
        /// Expected count or size.
        expected: usize,
        /// Count or size actually supplied.
        actual: usize,
    },

    /// No random index is tabulated for this matrix size.
    #[error("unsupported matrix size {size}: random index is tabulated up to {max}")]
    UnsupportedSize {
        /// Requested size.
        size: usize,
        /// Largest supported size.
        max: usize,
    },

    /// The eigen-solution cannot yield a priority vector: the eigenvector
    /// sums to zero or a non-finite value, has negative components, or the
    /// principal eigenvalue is below the matrix size.
    #[error("degenerate priority vector: {reason} is {value}")]
    DegenerateVector {
        /// Which quantity was out of range.
        reason: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The QR iteration did not converge within its budget.
    #[error("eigenvalue iteration did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations spent before giving up.
        iterations: usize,
    },

    /// A configuration struct failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AhpError {
    /// Create an InvalidComparison error.
    pub fn invalid_comparison(row: usize, col: usize, value: f64) -> Self {
        Self::InvalidComparison { row, col, value }
    }

    /// The InvalidComparison error for a matrix with no items.
    pub fn empty_matrix() -> Self {
        Self::invalid_comparison(0, 0, 0.0)
    }

    /// Create a DegenerateVector error.
    pub fn degenerate_vector(reason: &'static str, value: f64) -> Self {
        Self::DegenerateVector { reason, value }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Returns `true` for input-shape errors the caller can fix by
    /// correcting the questionnaire.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidComparison { .. }
                | Self::InvalidName { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}
