//! Persistence backends for the favorites slot
//!
//! A backend is a tiny key-value store holding text. The favorites store only
//! ever uses one key and always overwrites the whole value.
//!
//! - **`SledBackend`**: embedded sled database on disk
//! - **`MemoryBackend`**: in-process map, used as an injectable fake

use super::error::StorageError;
use sled::{Db, Tree};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Text slot storage used by [`FavoritesStore`](super::FavoritesStore)
pub trait FavoritesBackend {
    /// Read the text stored under `key`, `None` if the slot was never written
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the text stored under `key`
    ///
    /// Must not return before the value is durable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: FavoritesBackend + ?Sized> FavoritesBackend for &T {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Sled-backed slot storage
///
/// Values live in the `favorites` tree, one entry per key.
pub struct SledBackend {
    db: Db,
    slots: Tree,
}

impl SledBackend {
    /// Opens or creates a favorites database at the specified path
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let slots = db.open_tree("favorites")?;
        Ok(Self { db, slots })
    }

    /// Remove every stored slot
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the tree cannot be cleared or flushed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.slots.clear()?;
        self.db.flush()?;
        Ok(())
    }
}

impl FavoritesBackend for SledBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.slots.get(key.as_bytes())? {
            Some(value) => Ok(Some(String::from_utf8(value.to_vec())?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.as_bytes(), value.as_bytes())?;
        self.slots.flush()?;
        Ok(())
    }
}

/// In-memory slot storage
///
/// Writes can be made to fail with [`MemoryBackend::fail_writes`] to exercise
/// error paths.
#[derive(Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one slot already populated
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend.lock().insert(key.to_string(), value.to_string());
        backend
    }

    /// Make every following write fail (or succeed again)
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current raw text of a slot
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent whole-value writes
        self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl FavoritesBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
