//! Uttarakhand Explorer - a browsing engine for a catalog of destinations
//!
//! This library loads destination records from a hosted table or a local
//! export, keeps a persistent set of favorites in an embedded database, and
//! derives the filtered, sorted list that the grid, map and command-line
//! presentations display.
//!
//! # Modules
//!
//! - [`dataset`]: sources and the one-shot dataset loader, plus export cleaning
//! - [`favorites`]: the persisted favorites set
//! - [`query`]: filtering and ordering
//! - [`view`]: the controller that owns session state and the derived list
//! - [`ui`]: the interactive terminal browser

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod output;
pub mod query;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Dataset could not be fetched
    #[error("Load error: {0}")]
    LoadError(#[from] dataset::LoadError),
    /// Dataset source is misconfigured
    #[error("Source error: {0}")]
    SourceConfigError(#[from] dataset::SourceConfigError),
    /// Favorites storage error
    #[error("Storage error: {0}")]
    StorageError(#[from] favorites::StorageError),
    /// Export cleaning error
    #[error("Clean error: {0}")]
    CleanError(#[from] dataset::CleanError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used by the command layer
pub type Result<T> = std::result::Result<T, ExplorerError>;
