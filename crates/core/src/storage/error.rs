use thiserror::Error;

/// Errors that can occur during report store operations.
///
/// "Nothing matched" is never an error: queries return an empty `Vec`
/// and single-row lookups return `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Statement failed: {0}")]
    Statement(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Report not found: {id}")]
    NotFound { id: i64 },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Returns true for conditions that may succeed if the call is retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Result type for report store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
