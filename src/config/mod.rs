//! Configuration module for the explorer
//!
//! Manages the dataset source, favorites storage location and display
//! defaults. Configuration is stored in the user's config directory and can
//! be overridden per setting through `EXPLORER_*` environment variables
//! (nested keys use `__`, e.g. `EXPLORER_SOURCE__API_KEY`).

mod setup;

pub use setup::first_time_setup;

use crate::dataset::{
    DEFAULT_TABLE, DatasetLoader, FileSource, RestSource, RestSourceConfig, SourceConfigError,
};
use crate::favorites::{DEFAULT_STORAGE_KEY, FavoritesStore, SledBackend, StorageError};
use crate::query::SortKey;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "uttarakhand-explorer";

/// Where the dataset comes from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL of the hosted database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public API key sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Table holding the destinations
    #[serde(default = "default_table")]
    pub table: String,

    /// Local dataset file; takes precedence over the endpoint when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            file: None,
        }
    }
}

impl SourceConfig {
    /// Validated endpoint settings
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError` if the URL or API key is missing or invalid.
    pub fn rest_config(&self) -> Result<RestSourceConfig, SourceConfigError> {
        RestSourceConfig::new(self.url.as_deref(), self.api_key.as_deref(), &self.table)
    }

    /// Resolve the configured source into a loader
    ///
    /// A configured file wins over the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError` if the file does not exist or the endpoint
    /// settings are incomplete.
    pub fn build(&self) -> Result<DatasetLoader, SourceConfigError> {
        if let Some(path) = &self.file {
            if !path.is_file() {
                return Err(SourceConfigError::FileNotFound(path.display().to_string()));
            }
            return Ok(DatasetLoader::new(FileSource::new(path.clone())));
        }

        let source = RestSource::new(&self.rest_config()?)?;
        Ok(DatasetLoader::new(source))
    }
}

/// Where favorites are persisted
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FavoritesConfig {
    /// Directory of the embedded favorites database
    #[serde(default = "default_favorites_path")]
    pub path: PathBuf,

    /// Storage slot holding the favorites list
    #[serde(default = "default_favorites_key")]
    pub key: String,
}

fn default_favorites_path() -> PathBuf {
    data_dir().join("favorites")
}

fn default_favorites_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: default_favorites_path(),
            key: default_favorites_key(),
        }
    }
}

impl FavoritesConfig {
    /// Open the favorites database and wrap it in a store
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database cannot be opened.
    pub fn open_store(&self) -> Result<FavoritesStore<SledBackend>, StorageError> {
        let backend = SledBackend::open(&self.path)?;
        Ok(FavoritesStore::with_key(backend, self.key.clone()))
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ExplorerConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Sort applied when none is given on the command line
    #[serde(default)]
    pub default_sort: SortKey,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub favorites: FavoritesConfig,
}

/// Per-user data directory for the favorites database and log file
///
/// Falls back to a dot-directory under the working directory when the
/// platform has no data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(format!(".{APP_DIR}")), |d| d.join(APP_DIR))
}

impl ExplorerConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from a specific file, layered with the environment
    ///
    /// A missing file yields defaults plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the
    /// wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("EXPLORER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration from `path`; when the file is missing, run
    /// first-time setup only if `prompt` is set, else fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup_at(path: &Path, prompt: bool) -> Result<Self, ConfigError> {
        if prompt && !path.exists() {
            first_time_setup()
        } else {
            Self::load_from(path)
        }
    }

    /// Use a local dataset file instead of the configured source
    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source.file = Some(path.into());
        self
    }

    /// Location of the log file used while the terminal UI is active
    #[must_use]
    pub fn log_path() -> PathBuf {
        data_dir().join("explorer.log")
    }
}
