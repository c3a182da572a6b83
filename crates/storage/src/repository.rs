use quiz_core::model::QuestionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key prefix for per-set bookmark lists.
pub const BOOKMARKS_PREFIX: &str = "bookmarks:";

/// Key holding the most recently selected data-set name.
pub const LAST_SET_KEY: &str = "last-set";

/// String key-value persistence, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Bookmark persistence scoped by data-set name.
pub trait BookmarkStore: Send + Sync {
    /// Load the bookmarked ids saved for `set_name`; a set never saved yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend or stored value cannot be read.
    fn load_bookmarks(&self, set_name: &str) -> Result<Vec<QuestionId>, StorageError>;

    /// Persist the bookmarked ids for `set_name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn save_bookmarks(&self, set_name: &str, ids: &[QuestionId]) -> Result<(), StorageError>;
}

/// Small app preferences that survive restarts.
pub trait SessionPreferences: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn last_set(&self) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_last_set(&self, set_name: &str) -> Result<(), StorageError>;
}

#[must_use]
pub fn bookmarks_key(set_name: &str) -> String {
    format!("{BOOKMARKS_PREFIX}{set_name}")
}

impl<T: KeyValueStore + ?Sized> BookmarkStore for T {
    fn load_bookmarks(&self, set_name: &str) -> Result<Vec<QuestionId>, StorageError> {
        let Some(raw) = self.get(&bookmarks_key(set_name))? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn save_bookmarks(&self, set_name: &str, ids: &[QuestionId]) -> Result<(), StorageError> {
        let key = bookmarks_key(set_name);
        if ids.is_empty() {
            return self.remove(&key);
        }
        let raw =
            serde_json::to_string(ids).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.set(&key, &raw)
    }
}

impl<T: KeyValueStore + ?Sized> SessionPreferences for T {
    fn last_set(&self) -> Result<Option<String>, StorageError> {
        self.get(LAST_SET_KEY)
    }

    fn set_last_set(&self, set_name: &str) -> Result<(), StorageError> {
        self.set(LAST_SET_KEY, set_name)
    }
}

/// Simple in-memory store for testing and prototyping.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the persistence contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub bookmarks: Arc<dyn BookmarkStore>,
    pub preferences: Arc<dyn SessionPreferences>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    #[must_use]
    pub fn from_store<S: KeyValueStore + Clone + 'static>(store: S) -> Self {
        let bookmarks: Arc<dyn BookmarkStore> = Arc::new(store.clone());
        let preferences: Arc<dyn SessionPreferences> = Arc::new(store);
        Self {
            bookmarks,
            preferences,
        }
    }
}
