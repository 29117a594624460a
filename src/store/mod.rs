//! Key-value storage for the raw theme preference.
//!
//! This module provides:
//!
//! - [`PreferenceStore`]: The string key-value contract the resolver persists through
//! - [`MemoryStore`]: An in-process store whose clones share one map
//! - [`FileStore`]: A JSON file on disk
//! - [`StoreError`]: Errors from store access
//!
//! Stores are best-effort. The resolver treats a failed read as "nothing
//! stored" and ignores failed writes.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// A synchronous string key-value store supplied by the host.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, or `None` if nothing is.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
