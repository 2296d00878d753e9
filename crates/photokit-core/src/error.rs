//! Errors surfaced by `apply` and the filter entry points.

use thiserror::Error;

use crate::params::ParamError;

/// Why a transform did not produce a new buffer.
///
/// In every case the source buffer is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A parameter was rejected before any pixel work started.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    /// The caller raised the cancel token while rows were being processed.
    #[error("Transform cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_param_error() {
        let err: TransformError = ParamError::EvenWindow(2).into();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: Window size must be odd, got 2"
        );
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(TransformError::Cancelled.to_string(), "Transform cancelled");
    }
}
