//! Error handling for sift-log

use thiserror::Error;

/// Errors raised while installing a subscriber
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The filter directive could not be parsed
    #[error("Invalid filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    /// A global subscriber was already installed
    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

impl LogError {
    /// Create a filter parsing error
    pub fn filter(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for logger operations
pub type LogResult<T> = Result<T, LogError>;
