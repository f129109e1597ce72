//! Favorites store
//!
//! Keeps the set of favorited destination identifiers and mirrors it to a
//! persisted text slot holding a JSON array of numbers.
//!
//! - `load` reads the slot once at startup. A missing, unreadable or
//!   unparsable slot yields an empty set; the failure is logged, never raised.
//! - `toggle` flips membership of one identifier and overwrites the slot with
//!   the full set before returning.
//!
//! The store knows nothing about the dataset. Identifiers of destinations
//! that no longer exist are kept as they are.
//!
//! # Examples
//!
//! ```
//! use explorer::favorites::{FavoritesStore, MemoryBackend};
//! use explorer::models::DestinationId;
//!
//! let mut store = FavoritesStore::new(MemoryBackend::new());
//! store.load();
//!
//! let toggle = store.toggle(DestinationId(2)).unwrap();
//! assert!(toggle.was_added);
//! assert!(store.contains(DestinationId(2)));
//! ```

mod backend;
mod error;

pub use backend::{FavoritesBackend, MemoryBackend, SledBackend};
pub use error::StorageError;

use crate::models::DestinationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Storage key of the favorites slot
pub const DEFAULT_STORAGE_KEY: &str = "uttarakhand-favorites";

/// Set of favorited identifiers, serialized as an ascending JSON array
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<DestinationId>);

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: DestinationId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flip membership, returning `true` when `id` was added
    pub fn toggle(&mut self, id: DestinationId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Parse the persisted JSON text; duplicates collapse
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the text is not an array of identifiers.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<DestinationId> = serde_json::from_str(text)?;
        Ok(ids.into_iter().collect())
    }

    /// Serialize to the persisted JSON text
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<DestinationId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = DestinationId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a DestinationId;
    type IntoIter = std::collections::btree_set::Iter<'a, DestinationId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    /// The set after the toggle
    pub favorites: FavoriteSet,
    /// Whether the net effect was an addition
    pub was_added: bool,
}

impl Toggle {
    /// Confirmation text for the user
    #[must_use]
    pub const fn message(&self) -> &'static str {
        if self.was_added {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }
    }
}

/// Favorites set mirrored to a persisted slot
pub struct FavoritesStore<B: FavoritesBackend> {
    backend: B,
    key: String,
    favorites: FavoriteSet,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    /// Create a store using the default storage key
    ///
    /// The set starts empty until [`load`](Self::load) is called.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store using a custom storage key
    #[must_use]
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            favorites: FavoriteSet::new(),
        }
    }

    /// Read the persisted set, replacing the in-memory one
    ///
    /// Never fails: storage problems fall back to an empty set.
    pub fn load(&mut self) -> &FavoriteSet {
        self.favorites = match self.backend.read(&self.key) {
            Ok(Some(text)) => FavoriteSet::from_json(&text).unwrap_or_else(|e| {
                warn!(key = %self.key, error = %e, "Ignoring unparsable favorites");
                FavoriteSet::new()
            }),
            Ok(None) => {
                debug!(key = %self.key, "No stored favorites");
                FavoriteSet::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read favorites");
                FavoriteSet::new()
            }
        };
        info!(count = self.favorites.len(), "Loaded favorites");
        &self.favorites
    }

    /// Add `id` if absent, remove it if present, then persist the full set
    ///
    /// Accepts identifiers with no matching destination.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be written. The in-memory set
    /// is rolled back so it keeps matching what is stored.
    pub fn toggle(&mut self, id: DestinationId) -> Result<Toggle, StorageError> {
        let was_added = self.favorites.toggle(id);

        if let Err(e) = self.persist() {
            self.favorites.toggle(id);
            warn!(%id, error = %e, "Failed to persist favorites");
            return Err(e);
        }

        debug!(%id, was_added, count = self.favorites.len(), "Toggled favorite");
        Ok(Toggle {
            favorites: self.favorites.clone(),
            was_added,
        })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let text = self.favorites.to_json()?;
        self.backend.write(&self.key, &text)
    }

    /// Current favorites set
    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    #[must_use]
    pub fn contains(&self, id: DestinationId) -> bool {
        self.favorites.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Storage key in use
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying backend
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
