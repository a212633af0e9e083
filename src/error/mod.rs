//! Error types for registry cleanup runs

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CleanupError>;

/// Every error here is fatal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Bad regex, bad post-filter action or an unusable config source
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Listing repositories or images failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A batch delete call failed. Images removed by earlier batches stay deleted.
    #[error(
        "Delete error in repository {repository} ({deleted} images already deleted): {message}"
    )]
    Delete {
        repository: String,
        deleted: usize,
        message: String,
    },
}

impl CleanupError {
    pub fn config(message: impl Into<String>) -> Self {
        CleanupError::Configuration(message.into())
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        CleanupError::Fetch(message.into())
    }

    /// Configuration problems are detected before any registry call is made
    pub fn is_configuration(&self) -> bool {
        matches!(self, CleanupError::Configuration(_))
    }
}

impl From<regex::Error> for CleanupError {
    fn from(err: regex::Error) -> Self {
        CleanupError::Configuration(format!("Incorrect RegExp: {}", err))
    }
}
