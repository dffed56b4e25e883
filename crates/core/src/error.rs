//! Validation errors raised at the input boundary.

/// Errors produced when a draft or edited entity is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A reward value was zero.
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    /// A clock time was not in `HH:MM` form.
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// A time block ends at or before its start.
    #[error("start time {start} must be before end time {end}")]
    StartNotBeforeEnd {
        /// Block start
        start: String,
        /// Block end
        end: String,
    },
}

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn require_positive(value: u32, field: &'static str) -> Result<()> {
    if value == 0 {
        Err(ValidationError::NonPositive(field))
    } else {
        Ok(())
    }
}
