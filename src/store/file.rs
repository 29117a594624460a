//! JSON-file preference store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{PreferenceStore, StoreError};

/// A store backed by a JSON object on disk, e.g.
/// `{"theme": "dark", "font_size": 14}`.
///
/// The file is read on every access, so several stores (or processes) may
/// point at the same path. A missing file reads as empty; writing creates
/// it along with any missing parent directories. Keys other than the one
/// being written are preserved whatever their type. Only string values are
/// returned by `get`; a key holding any other JSON value reads as absent.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.load()?.remove(key) {
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => {
                tracing::debug!(key, value = %other, "ignoring non-string preference entry");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/app/prefs.json");
        let mut store = FileStore::new(&path);
        store.set("theme", "dark").unwrap();

        assert!(path.exists());
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"language": "fr", "theme": "light"}"#).unwrap();

        let mut store = FileStore::new(&path);
        store.set("theme", "system").unwrap();

        assert_eq!(store.get("language").unwrap().as_deref(), Some("fr"));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("system"));
    }

    #[test]
    fn test_mixed_value_types_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(
            &path,
            r#"{"theme": "dark", "font_size": 14, "panels": {"left": true}}"#,
        )
        .unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(store.get("font_size").unwrap().is_none());

        store.set("theme", "light").unwrap();
        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "light");
        assert_eq!(saved["font_size"], 14);
        assert_eq!(saved["panels"]["left"], true);
    }

    #[test]
    fn test_non_object_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"["dark"]"#).unwrap();
        assert!(matches!(
            FileStore::new(&path).get("theme"),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_empty_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "  \n").unwrap();
        assert!(FileStore::new(&path).get("theme").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get("theme"), Err(StoreError::Corrupt(_))));
        assert!(matches!(
            store.set("theme", "dark"),
            Err(StoreError::Corrupt(_))
        ));
        // Left untouched rather than clobbered.
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
