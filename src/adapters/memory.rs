//! In-memory adapters
//!
//! Used for `--ephemeral` sessions and in tests. Nothing survives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::ports::{DatasetSource, KeyValueStore, LoadError, StoreError};

/// Key/value store held in a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw bytes under `key`
    #[must_use]
    pub fn with_entry(self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), bytes.into());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.lock().map_err(|e| StoreError::read(key, e))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::write(key, e))?
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().map_err(|e| StoreError::write(key, e))?.remove(key);
        Ok(())
    }
}

/// Dataset held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    bytes: Vec<u8>,
}

impl StaticSource {
    /// Source serving `bytes` on every fetch
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
