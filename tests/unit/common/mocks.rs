//! Hand-written test doubles for the port traits

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use qtrack::TeardownHandle;
use qtrack::core::ports::{Clock, DatasetSource, LoadError};

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self(AtomicI64::new(now_millis))
    }

    pub fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Dataset source that counts fetches and can be switched to fail
#[derive(Debug)]
pub struct CountingSource {
    bytes: Mutex<Vec<u8>>,
    failure: Mutex<Option<LoadError>>,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(bytes.into()),
            failure: Mutex::new(None),
            fetches: Arc::default(),
        }
    }

    pub fn failing(error: LoadError) -> Self {
        let source = Self::new(Vec::new());
        *source.failure.lock().unwrap() = Some(error);
        source
    }

    /// Shared fetch counter, usable after the source is boxed away
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_bytes(&self, bytes: impl Into<Vec<u8>>) {
        *self.bytes.lock().unwrap() = bytes.into();
    }
}

impl DatasetSource for CountingSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.bytes.lock().unwrap().clone())
    }

    fn describe(&self) -> String {
        "counting-source".to_string()
    }
}

/// Source that tears the session down while its fetch is in flight
#[derive(Debug)]
pub struct TeardownDuringFetch {
    pub handle: TeardownHandle,
    pub result: Result<Vec<u8>, LoadError>,
}

impl DatasetSource for TeardownDuringFetch {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.handle.teardown();
        self.result.clone()
    }

    fn describe(&self) -> String {
        "teardown-during-fetch".to_string()
    }
}
