//! Dataset loading
//!
//! The record set comes from an external source and is fetched once per
//! session. Sources implement [`DatasetSource`]; the [`DatasetLoader`] wraps
//! one and adds logging. A successful load replaces the caller's dataset
//! wholesale; a failed one leaves it untouched.
//!
//! # Sources
//!
//! - **`RestSource`**: hosted table behind a PostgREST-style endpoint
//! - **`FileSource`**: local `.json` or `.csv` export
//! - **`StaticSource`**: records held in memory
//!
//! The [`clean`] submodule prepares raw exports before they are published.

pub mod clean;
mod error;
mod file;
mod rest;

pub use error::{CleanError, LoadError, SourceConfigError};
pub use file::{DatasetFormat, FileSource, parse_records};
pub use rest::{DEFAULT_TABLE, RestSource, RestSourceConfig};

use crate::models::Destination;
use async_trait::async_trait;
use tracing::{error, info};

/// A place the full record set can be read from
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Short human-readable description for logs
    fn describe(&self) -> String;

    /// Fetch every record
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the records cannot be read or decoded.
    async fn fetch(&self) -> Result<Vec<Destination>, LoadError>;
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Destination>,
}

impl StaticSource {
    #[must_use]
    pub const fn new(records: Vec<Destination>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<Destination>, LoadError> {
        Ok(self.records.clone())
    }
}

/// Loads the dataset from one source
pub struct DatasetLoader {
    source: Box<dyn DatasetSource>,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Description of the wrapped source
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Fetch the full record set
    ///
    /// Not retried on failure.
    ///
    /// # Errors
    ///
    /// Returns the source's `LoadError`.
    pub async fn load(&self) -> Result<Vec<Destination>, LoadError> {
        let source = self.source.describe();
        info!(%source, "Loading destinations");

        match self.source.fetch().await {
            Ok(records) => {
                info!(%source, count = records.len(), "Loaded destinations");
                Ok(records)
            }
            Err(e) => {
                error!(%source, error = %e, "Error fetching destinations");
                Err(e)
            }
        }
    }
}
