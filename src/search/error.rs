//! Search-specific error types

use thiserror::Error;

/// Errors from the search boundary
#[derive(Debug, Error)]
pub enum SearchError {
    /// A sort key string could not be parsed
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    /// Record store could not be read
    #[error("Failed to read records: {0}")]
    Io(#[from] std::io::Error),

    /// Record store contents could not be decoded
    #[error("Malformed record file: {0}")]
    Format(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
