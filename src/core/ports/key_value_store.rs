//! Key/value store port
//!
//! Raw byte storage addressed by a logical key. Backends report failures
//! through [`StoreError`]; the layer above turns every failure into
//! "absent" or a no-op so that persistence problems never reach the caller.

use thiserror::Error;

/// Failures a storage backend may report
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key failed
    #[error("failed to read '{key}': {reason}")]
    Read {
        /// Logical key
        key: String,
        /// Backend-specific cause
        reason: String,
    },

    /// Writing or deleting a key failed
    #[error("failed to write '{key}': {reason}")]
    Write {
        /// Logical key
        key: String,
        /// Backend-specific cause
        reason: String,
    },

    /// Stored bytes could not be decoded
    #[error("corrupt entry '{key}': {reason}")]
    Corrupt {
        /// Logical key
        key: String,
        /// Decoder message
        reason: String,
    },
}

impl StoreError {
    /// Read failure for `key`
    #[must_use]
    pub fn read(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Read {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Write failure for `key`
    #[must_use]
    pub fn write(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Write {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Byte-oriented storage backend
///
/// Implementations decide where bytes live (files, memory, ...). Keys are
/// short ASCII identifiers such as `"completed"` or `"dataset"`.
pub trait KeyValueStore: Send + Sync {
    /// Read the bytes stored under `key`, `Ok(None)` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace whatever is stored under `key`
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key succeeds
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
