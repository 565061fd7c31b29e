//! Page chrome error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChromeError {
    /// The URL textarea holds more lines than one batch allows
    #[error("Please enter no more than {max} URLs at a time.")]
    TooManyUrls { count: usize, max: usize },

    /// A date string could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type ChromeResult<T> = Result<T, ChromeError>;
