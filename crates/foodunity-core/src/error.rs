//! Error types and result handling for store operations.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for domain and store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document store operation failed.
    #[error("store error: {0}")]
    Store(String),

    /// Identifier does not have the store identifier shape.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Document could not be serialized for the store.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<mongodb::error::Error> for CoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for CoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
