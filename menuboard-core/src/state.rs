//! Durable client-side key/value state (the chosen menu language).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to access state file {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Corrupt state file {0}: {1}")]
    Parse(PathBuf, serde_json::Error),
}

/// Key/value store that survives between sessions.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// State kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    values: BTreeMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// State persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStateStore {
    /// Opens the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();
        let values = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| StateError::Io(path.clone(), e))?;
            serde_json::from_str(&contents).map_err(|e| StateError::Parse(path.clone(), e))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// Default location: `<data dir>/menuboard/state.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("menuboard")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StateError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StateError::Parse(self.path.clone(), e))?;
        std::fs::write(&self.path, json).map_err(|e| StateError::Io(self.path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStateStore::new().with("lang", "en");
        assert_eq!(store.get("lang").as_deref(), Some("en"));
        store.set("lang", "tr").unwrap();
        assert_eq!(store.get("lang").as_deref(), Some("tr"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("state.json");

        let mut store = FileStateStore::open(&path).unwrap();
        assert_eq!(store.get("menu_lang"), None);
        store.set("menu_lang", "en").unwrap();

        let reopened = FileStateStore::open(&path).unwrap();
        assert_eq!(reopened.get("menu_lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileStateStore::open(&path);
        assert!(matches!(result, Err(StateError::Parse(_, _))));
    }
}
