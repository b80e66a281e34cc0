use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arc_swap::ArcSwap;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode local storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable string key/value store, shaped like a browser's local storage.
///
/// Reads never fail: a missing or unreadable entry is simply absent.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns [`StorageError`] if the value could not be persisted.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    items: ArcSwap<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.load().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.rcu(|items| {
            let mut next = HashMap::clone(items);
            next.insert(key.to_owned(), value.to_owned());
            next
        });
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// The file is re-read on every access so several processes sharing it see
/// each other's writes.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::debug!(path = %self.path.display(), "ignoring unreadable local storage file");
                Map::new()
            }
        }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.read_all().remove(key)? {
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut all = self.read_all();
        all.insert(key.to_owned(), Value::String(value.to_owned()));
        let encoded = serde_json::to_string_pretty(&Value::Object(all))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, encoded).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("themeMode"), None);
        storage.set_item("themeMode", "dark").unwrap();
        storage.set_item("themeMode", "light").unwrap();
        assert_eq!(storage.get_item("themeMode").as_deref(), Some("light"));
    }

    #[test]
    fn file_storage_survives_reopen_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local-storage.json");

        let first = FileStorage::new(&path);
        first.set_item("themeMode", "dark").unwrap();
        first.set_item("lang", "en").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("themeMode").as_deref(), Some("dark"));
        assert_eq!(reopened.get_item("lang").as_deref(), Some("en"));
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("themeMode"), None);

        storage.set_item("themeMode", "dark").unwrap();
        assert_eq!(storage.get_item("themeMode").as_deref(), Some("dark"));
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let storage = FileStorage::new(blocker.join("local-storage.json"));
        assert!(matches!(
            storage.set_item("themeMode", "dark"),
            Err(StorageError::Io { .. })
        ));
    }
}
