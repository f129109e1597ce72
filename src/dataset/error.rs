//! Dataset error types
//!
//! - **`LoadError`**: a fetch failed; the caller keeps its previous dataset
//! - **`SourceConfigError`**: a source could not be constructed from configuration
//! - **`CleanError`**: the data preparation pipeline could not run

use thiserror::Error;

/// Errors raised while fetching the record set
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport-level HTTP failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Reading a local dataset file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload did not match the record shape
    #[error("Invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV payload did not match the record shape
    #[error("Invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    /// File extension is neither `.json` nor `.csv`
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// Source-specific failure
    #[error("{0}")]
    Source(String),
}

/// Errors raised while building a dataset source from configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceConfigError {
    /// No endpoint URL and no dataset file configured
    #[error("No dataset endpoint configured (set source.url or source.file)")]
    MissingUrl,

    /// Endpoint URL is not an absolute http(s) URL
    #[error("Invalid dataset endpoint '{0}': {1}")]
    InvalidUrl(String, String),

    /// Endpoint configured without an API key
    #[error("No API key configured for the dataset endpoint (set source.api_key or EXPLORER_SOURCE__API_KEY)")]
    MissingApiKey,

    /// Table name is blank
    #[error("Dataset table name must not be empty")]
    MissingTable,

    /// Configured dataset file does not exist
    #[error("Dataset file not found: {0}")]
    FileNotFound(String),

    /// HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Errors raised by the data preparation pipeline
#[derive(Debug, Error)]
pub enum CleanError {
    /// Input file could not be read or output written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON writing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Spreadsheet has no worksheet to read
    #[error("Workbook has no sheets: {0}")]
    EmptyWorkbook(String),

    /// A cleaning pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Output format could not be determined
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
