//! Persisted key-value storage for the chosen preference.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StoreError;

/// Durable string key-value storage scoped to the application.
///
/// Stores behave like handles: methods take `&self` and implementations share
/// their data between clones. Writes are fire-and-forget; an implementation
/// that cannot persist a change logs it and carries on.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing a missing key does nothing.
    fn remove(&self, key: &str);

    /// Returns `true` if a value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Store backed by a JSON object file, e.g. `{"theme": "dark"}`.
///
/// The file is read once at [`open`](FileStore::open) and rewritten after
/// every change. Clones share the same entries and file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Rc<PathBuf>,
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened preference store");
        Ok(Self {
            path: Rc::new(path),
            entries: Rc::new(RefCell::new(entries)),
        })
    }

    /// Opens the store at [`default_store_path`].
    ///
    /// Falls back to an in-directory `preferences.json` when the platform has
    /// no config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_store_path().unwrap_or_else(|| PathBuf::from("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let entries = self.entries.borrow();
        let body = match serde_json::to_string_pretty(&*entries) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize preferences");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    tracing::warn!(
                        path = %parent.display(),
                        error = %err,
                        "failed to create preference directory"
                    );
                    return;
                }
            }
        }

        if let Err(err) = std::fs::write(&*self.path, body) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to write preferences"
            );
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let changed = self
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string())
            .as_deref()
            != Some(value);
        if changed {
            self.flush();
        }
    }

    fn remove(&self, key: &str) {
        let removed = self.entries.borrow_mut().remove(key).is_some();
        if removed {
            self.flush();
        }
    }
}

/// Default location of the preference file: `<config dir>/shade/preferences.json`.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shade").join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert!(store.contains("theme"));

        store.remove("theme");
        assert!(handle.is_empty());
    }

    #[test]
    fn test_memory_store_remove_missing_is_noop() {
        let store = MemoryStore::with_entry("other", "x");
        store.remove("theme");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("prefs.json")).unwrap();
        assert_eq!(store.get("theme"), None);
        assert!(!dir.path().join("prefs.json").exists());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = FileStore::open(&path).unwrap();
        store.set("theme", "dark");
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));

        reopened.remove("theme");
        let again = FileStore::open(&path).unwrap();
        assert_eq!(again.get("theme"), None);
    }

    #[test]
    fn test_file_store_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "  \n").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_file_store_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_file_store_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("prefs.json");
        std::fs::create_dir(&path).unwrap();

        let store = FileStore {
            path: Rc::new(path),
            entries: Rc::new(RefCell::new(BTreeMap::new())),
        };
        store.set("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }
}
