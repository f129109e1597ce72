//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The terminal is not interactive
    #[error("Interactive browsing needs a terminal; use `explorer list` instead")]
    NotATerminal,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
