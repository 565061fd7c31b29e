//! Mascot error types

use thiserror::Error;

/// Errors raised by the mascot engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MascotError {
    /// Caller asked for a display state outside {default, thinking, working, happy}
    #[error("Invalid display state: {0}")]
    InvalidState(String),

    /// Requested message category is unknown or has no entries.
    /// Recovered internally with the fallback greeting, never surfaced to the page.
    #[error("Invalid message category: {0}")]
    InvalidCategory(String),
}

/// Result type alias for mascot operations
pub type MascotResult<T> = Result<T, MascotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MascotError::InvalidState("bogus".to_string());
        assert_eq!(err.to_string(), "Invalid display state: bogus");

        let err = MascotError::InvalidCategory("jokes".to_string());
        assert_eq!(err.to_string(), "Invalid message category: jokes");
    }
}
