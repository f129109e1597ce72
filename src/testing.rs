//! Testing utilities for the explorer
//!
//! Fixture records, a source that always fails, and a `TempStore` wrapper
//! that owns a throwaway sled database for favorites tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::dataset::{DatasetSource, LoadError};
use crate::favorites::SledBackend;
use crate::models::Destination;
use async_trait::async_trait;
use tempfile::TempDir;

/// The three-record dataset used throughout the tests
///
/// | id | name              | district    | category   | rating |
/// |----|-------------------|-------------|------------|--------|
/// | 1  | Valley of Flowers | Chamoli     | Nature     | 4.8    |
/// | 2  | Kedarnath         | Rudraprayag | Pilgrimage | 4.9    |
/// | 3  | Nainital Lake     | Nainital    | Nature     | 4.2    |
#[must_use]
pub fn sample_destinations() -> Vec<Destination> {
    vec![
        Destination::new(1, "Valley of Flowers", "Chamoli", "Nature", 4.8)
            .with_description("Alpine meadows of endemic flowers")
            .with_location(30.7266, 79.6053),
        Destination::new(2, "Kedarnath", "Rudraprayag", "Pilgrimage", 4.9)
            .with_description("Lord Shiva Temple")
            .with_location(30.7352, 79.0669),
        Destination::new(3, "Nainital Lake", "Nainital", "Nature", 4.2)
            .with_description("City of Lakes")
            .with_location(29.3919, 79.4542),
    ]
}

/// Source whose fetch always fails
pub struct FailingSource;

#[async_trait]
impl DatasetSource for FailingSource {
    fn describe(&self) -> String {
        "failing source".to_string()
    }

    async fn fetch(&self) -> Result<Vec<Destination>, LoadError> {
        Err(LoadError::Source("connection refused".to_string()))
    }
}

/// Wrapper for a temporary sled favorites database that cleans up on drop
///
/// # Examples
/// ```ignore
/// let store = TempStore::new();
/// store.backend().write("key", "[1]").unwrap();
/// // Directory removed when `store` goes out of scope
/// ```
pub struct TempStore {
    backend: SledBackend,
    // Dropped after the backend so sled can flush into an existing directory
    _dir: TempDir,
}

impl TempStore {
    /// Create a fresh, empty favorites database
    ///
    /// # Panics
    /// Panics if the temporary directory or database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let backend =
            SledBackend::open(dir.path().join("favorites")).expect("Failed to open test database");
        backend.clear().expect("Failed to clear test database");
        Self { backend, _dir: dir }
    }

    #[must_use]
    pub const fn backend(&self) -> &SledBackend {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesBackend;

    #[test]
    fn test_sample_ids_are_unique() {
        let records = sample_destinations();
        let mut ids: Vec<u64> = records.iter().map(|d| d.id.get()).collect();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_temp_store_starts_empty() {
        let store = TempStore::new();
        assert_eq!(store.backend().read("uttarakhand-favorites").unwrap(), None);
    }
}
