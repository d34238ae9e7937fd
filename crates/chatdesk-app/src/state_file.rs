use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chatdesk_chat::{SessionStore, StoreError};

/// Key/value store backed by a small JSON object on disk.
///
/// Every write rewrites the file, mirroring how `localStorage` behaves
/// for the browser front-end.
pub struct FileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Load `path`; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt state file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            values: RefCell::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(&*self.values.borrow())
            .map_err(|e| StoreError(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StoreError(e.to_string()))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.values.borrow_mut().remove(key);
        if removed.is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStore::open(&path);
        store.set("currentConversationId", "42").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("currentConversationId"), Some("42".to_string()));
    }

    #[test]
    fn test_remove_clears_key_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        store.set("currentConversationId", "7").unwrap();
        store.set("other", "kept").unwrap();
        store.remove("currentConversationId").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("currentConversationId"), None);
        assert_eq!(reopened.get("other"), Some("kept".to_string()));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("currentConversationId"), None);

        store.set("currentConversationId", "1").unwrap();
        assert_eq!(FileStore::open(&path).get("currentConversationId"), Some("1".to_string()));
    }

    #[test]
    fn test_remove_missing_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        store.remove("currentConversationId").unwrap();
        assert!(!path.exists());
    }
}
