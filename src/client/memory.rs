//! In-memory data store using `DashMap`.
//!
//! Data is lost on process restart; useful for tests and single-host runs.

use dashmap::DashMap;

use super::DataStore;
use crate::Result;

/// In-memory key-value store using lock-free concurrent hashmap.
///
/// Thread-safe, so producers and consumers on different threads can share
/// one store through an `Arc`.
///
/// # Example
///
/// ```rust
/// use trueno_ensemble::client::{DataStore, MemoryDataStore};
///
/// # fn example() -> trueno_ensemble::Result<()> {
/// let store = MemoryDataStore::new();
/// store.send("hello", b"world".to_vec())?;
/// assert_eq!(store.get("hello")?, Some(b"world".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryDataStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl DataStore for MemoryDataStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.store.get(key).map(|v| v.value().clone()))
    }

    fn send(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.store.contains_key(key))
    }
}
