//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
///
/// All variants describe bad configuration. They are returned before any
/// pixel is read; numeric edge cases inside formulas are never errors.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Kernel dimensions are even or zero.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Data model error, such as a bad tile size.
    #[error(transparent)]
    Core(#[from] tessera_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Checks that `value` is a finite number in `[0, 1]`.
pub(crate) fn check_unit(name: &str, value: f32) -> OpsResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

/// Checks that `value` is a finite, strictly positive number.
pub(crate) fn check_positive(name: &str, value: f32) -> OpsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
