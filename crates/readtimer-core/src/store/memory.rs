//! In-memory store for tests and embedding.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;

use super::PersistentStore;

/// HashMap-backed store with the same whole-value semantics as
/// [`super::SqliteStore`]. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.map.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistentStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get_raw("missing").unwrap().is_none());
        store.set_raw("k", "v").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn set_replaces_whole_value() {
        let store = MemoryStore::new();
        store.set_raw("k", "first").unwrap();
        store.set_raw("k", "second").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_value_decodes_to_default() {
        let store = MemoryStore::new();
        store.set_raw("nums", "not json at all").unwrap();
        let nums: Vec<u32> = store.get_or_default("nums");
        assert!(nums.is_empty());
    }

    #[test]
    fn absent_value_decodes_to_default() {
        let store = MemoryStore::new();
        let n: u64 = store.get_or_default("missing");
        assert_eq!(n, 0);
    }

    #[test]
    fn typed_roundtrip() {
        let store = MemoryStore::new();
        store.set_json("nums", &vec![1u32, 2, 3]).unwrap();
        let nums: Vec<u32> = store.get_or_default("nums");
        assert_eq!(nums, vec![1, 2, 3]);
    }
}
