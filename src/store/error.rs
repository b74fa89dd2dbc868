//! Error types for store operations.

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected the document: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<crate::models::PatchError> for StoreError {
    fn from(err: crate::models::PatchError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
