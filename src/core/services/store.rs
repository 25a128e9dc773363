//! Persistent store
//!
//! Wraps a raw [`KeyValueStore`] with JSON envelopes, optional expiry, and
//! corruption recovery. Nothing in here returns an error: a failed read is
//! reported as absent, a failed write is dropped, and both are logged.
//!
//! Every value is stored as
//!
//! ```json
//! { "data": <value>, "storedAt": 1714564800000, "expiry": 1714651200000 }
//! ```
//!
//! where `expiry` is omitted for values that never expire. An expired or
//! undecodable entry is deleted on read.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ports::{Clock, KeyValueStore, StoreError, SystemClock};

/// Logical keys used by the engine
pub mod keys {
    /// Cached dataset (expires)
    pub const DATASET: &str = "dataset";
    /// Completed question ids
    pub const COMPLETED: &str = "completed";
    /// Notes per question id
    pub const NOTES: &str = "notes";
    /// Filter selections
    pub const FILTERS: &str = "filters";
    /// Sort preference
    pub const SORT: &str = "sort";
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(rename = "storedAt", default)]
    stored_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry: Option<i64>,
}

/// Best-effort JSON storage with expiry
pub struct PersistentStore {
    backend: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore").finish_non_exhaustive()
    }
}

impl PersistentStore {
    /// Store backed by `backend`, using the wall clock
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    /// Store backed by `backend`, using `clock` for timestamps and expiry
    #[must_use]
    pub const fn with_clock(backend: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Current time according to this store's clock
    #[must_use]
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is absent, unreadable, expired, or does not
    /// decode as `T`. Expired and undecodable entries are removed.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.backend.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Storage get error: {e}");
                return None;
            },
        };

        let envelope: Envelope<Value> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.discard_corrupt(key, &e);
                return None;
            },
        };

        if let Some(expiry) = envelope.expiry
            && self.now_millis() >= expiry
        {
            debug!("Entry '{key}' expired at {expiry}, removing");
            self.remove(key);
            return None;
        }

        match serde_json::from_value(envelope.data) {
            Ok(value) => Some(value),
            Err(e) => {
                self.discard_corrupt(key, &e);
                None
            },
        }
    }

    /// Encode and store `value` under `key`, expiring after `ttl` if given.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let now = self.now_millis();
        let expiry = ttl.map(|ttl| {
            let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
            now.saturating_add(millis)
        });
        let envelope = Envelope {
            data: value,
            stored_at: now,
            expiry,
        };

        let bytes = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Storage set error: could not encode '{key}': {e}");
                return;
            },
        };

        if let Err(e) = self.backend.write(key, &bytes) {
            warn!("Storage set error: {e}");
        }
    }

    /// Remove `key`, logging failures
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            warn!("Storage remove error: {e}");
        }
    }

    fn discard_corrupt(&self, key: &str, cause: &serde_json::Error) {
        let err = StoreError::Corrupt {
            key: key.to_string(),
            reason: cause.to_string(),
        };
        warn!("{err}; clearing slot");
        self.remove(key);
    }
}
