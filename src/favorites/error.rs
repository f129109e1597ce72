//! Favorites storage error types

use thiserror::Error;

/// Errors raised while reading or writing the persisted favorites slot
#[derive(Debug, Error)]
pub enum StorageError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8 text
    #[error("Stored favorites are not valid text: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    /// JSON encoding or decoding failed
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
