//! Selection error types.

use thiserror::Error;

/// Result type for selection state construction.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors raised when building a selection state.
///
/// Runtime interactions (selecting a disabled day, toggling past the cap,
/// completing an out-of-bounds range) never produce errors; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Options that contradict each other or are out of range.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl SelectError {
    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_displayed() {
        let err = SelectError::invalid_options("min_date is after max_date");
        assert_eq!(err.to_string(), "Invalid options: min_date is after max_date");
    }
}
