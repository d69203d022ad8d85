use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A document failed validation and was not persisted.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A search request was malformed. No results are returned.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The document store could not complete an insert or a retrieval.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}
