//! Durable key-value slots for client-side state.
//!
//! Mirrors browser local storage: string keys map to string values. The file
//! backend keeps every slot in one JSON object; the memory backend is shared
//! through an `Arc` so tests can inspect what was written.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

/// A string-to-string store that survives between sessions.
pub trait KeyValueStore: Send {
    /// Read a slot. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Slots persisted as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read storage: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse storage: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut slots = match self.read_all() {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!("discarding unreadable storage: {e:#}");
                BTreeMap::new()
            }
        };
        slots.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&slots).context("failed to serialize storage")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write storage: {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
}

/// In-memory slots that record every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one slot already populated.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.slots.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Every `(key, value)` written so far, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner
            .lock()
            .map(|inner| inner.writes.clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(inner.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        inner.slots.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip_keeps_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut store = FileStore::new(&path);

        assert_eq!(store.get("favoriteQuestions").unwrap(), None);

        store.set("favoriteQuestions", "[1,2]").unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("favoriteQuestions").unwrap().as_deref(),
            Some("[1,2]")
        );
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_corrupt_file_errors_on_read_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{{{ not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(store.get("favoriteQuestions").is_err());

        store.set("favoriteQuestions", "[3]").unwrap();
        assert_eq!(
            store.get("favoriteQuestions").unwrap().as_deref(),
            Some("[3]")
        );
    }

    #[test]
    fn memory_store_records_writes() {
        let store = MemoryStore::with_slot("k", "v0");
        let mut handle = store.clone();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v0"));

        handle.set("k", "v1").unwrap();
        handle.set("k", "v2").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(
            store.writes(),
            vec![
                ("k".to_string(), "v1".to_string()),
                ("k".to_string(), "v2".to_string())
            ]
        );
    }
}
