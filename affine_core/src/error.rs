//! Error types for tensor and layer operations
//!
//! Every documented shape precondition is checked at the call that detects
//! it and reported through [`TensorError`] before any mutation occurs, so a
//! tensor is never left half-updated.

use std::fmt;

/// Result type alias for tensor and layer operations
pub type TensorResult<T> = Result<T, TensorError>;

/// Error type for shape-guarded tensor and layer operations
#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    /// A construction or reshape received a zero dimension
    InvalidShape { rows: usize, cols: usize },

    /// A documented shape precondition failed
    ShapeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// The broadcast operand matches none of the four supported patterns
    IncompatibleBroadcast {
        target: [usize; 2],
        operand: [usize; 2],
    },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::InvalidShape { rows, cols } => {
                write!(
                    f,
                    "Invalid shape {}x{}: both dimensions must be positive",
                    rows, cols
                )
            }
            TensorError::ShapeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            TensorError::IncompatibleBroadcast { target, operand } => {
                write!(
                    f,
                    "Cannot broadcast operand of shape {}x{} onto tensor of shape {}x{}: \
                     operand must be (1,1), (1,N), (M,1), or (M,N)",
                    operand[0], operand[1], target[0], target[1]
                )
            }
        }
    }
}

impl std::error::Error for TensorError {}

// Convenience constructors for common error patterns
impl TensorError {
    /// Create an invalid shape error
    pub fn invalid_shape(rows: usize, cols: usize) -> Self {
        TensorError::InvalidShape { rows, cols }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(
        expected: impl Into<String>,
        got: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        TensorError::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
            context: context.into(),
        }
    }

    /// Create an incompatible broadcast error
    pub fn incompatible_broadcast(target: [usize; 2], operand: [usize; 2]) -> Self {
        TensorError::IncompatibleBroadcast { target, operand }
    }
}
