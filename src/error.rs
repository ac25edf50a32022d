//! Error types shared by the projection engines, loaders and planners

use thiserror::Error;

/// Errors raised by the projection core
///
/// Projections are deterministic once the input is valid, so every variant
/// describes either malformed input or a failure at an I/O boundary.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A numeric field is negative, non-finite or otherwise out of range
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Application period exceeds the supported horizon
    #[error("application period of {years} years exceeds the maximum of {max} years")]
    PeriodTooLong { years: u32, max: u32 },

    /// A study row could not be converted into a projection input
    #[error("invalid study record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::invalid(field, format!("{} is not a finite number", value)))
    }
}

/// Reject NaN, infinities and negative values
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, format!("{} must not be negative", value)));
    }
    Ok(())
}
