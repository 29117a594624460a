//! In-process preference store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{PreferenceStore, StoreError};

/// A map-backed store. Clones are handles onto the same map, so a store
/// outlives any resolver it was handed to.
///
/// # Example
///
/// ```rust
/// use tonality::{MemoryStore, PreferenceStore};
///
/// let mut store = MemoryStore::new();
/// let handle = store.clone();
/// store.set("theme", "dark").unwrap();
/// assert_eq!(handle.get("theme").unwrap().as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: bool,
}

impl MemoryStore {
    /// Creates an empty, working store.
    pub fn new() -> Self {
        Self {
            entries: Rc::default(),
            available: true,
        }
    }

    /// Creates a store whose every operation fails with [`StoreError::Unavailable`],
    /// as a browser does when storage is disabled.
    pub fn unavailable() -> Self {
        Self {
            entries: Rc::default(),
            available: false,
        }
    }

    /// Creates a working store pre-filled with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::with_entries([("theme", "system")]);
        let mut other = store.clone();
        other.set("lang", "en").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("theme"), Err(StoreError::Unavailable)));
        assert!(matches!(
            store.set("theme", "dark"),
            Err(StoreError::Unavailable)
        ));
        assert!(store.is_empty());
    }
}
