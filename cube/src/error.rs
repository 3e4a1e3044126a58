//! Typed construction errors for cube primitives.
//!
//! These are programming-contract violations: a correctly driven engine
//! never triggers them after configuration validation. None are retried.

/// Typed failure for vertex and path construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Requested dimension is outside the supported range.
    InvalidDimension { dimension: usize },
    /// A label's length (or a neighbor set's size) does not match the
    /// vertex dimension.
    DimensionMismatch { expected: usize, actual: usize },
    /// A parsed label contains a character other than `0` or `1`.
    InvalidLabel { text: String },
}

impl std::fmt::Display for CubeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension { dimension } => {
                write!(
                    f,
                    "invalid dimension {dimension}: supported range is {}..={}",
                    crate::vertex::MIN_DIMENSION,
                    crate::vertex::MAX_DIMENSION
                )
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidLabel { text } => {
                write!(f, "invalid label {text:?}: expected a binary string")
            }
        }
    }
}

impl std::error::Error for CubeError {}
