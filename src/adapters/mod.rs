//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `file/` - One JSON file per key, and datasets read from disk
//! - `memory` - In-process store and dataset, for `--ephemeral` and tests
//! - `http` - Dataset fetched over http(s) (`http` feature)

pub mod file;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;

pub use file::{FileSource, FileStore};
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use memory::{MemoryStore, StaticSource};

use crate::core::ports::{DatasetSource, LoadError};

/// Pick a dataset source for `location`: http(s) URLs go over the network,
/// anything else is a file path.
pub fn source_for(location: &str) -> Result<Box<dyn DatasetSource>, LoadError> {
    let lower = location.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return remote_source(location.trim());
    }
    Ok(Box::new(FileSource::new(location)))
}

#[cfg(feature = "http")]
fn remote_source(url: &str) -> Result<Box<dyn DatasetSource>, LoadError> {
    Ok(Box::new(HttpSource::new(url)?))
}

#[cfg(not(feature = "http"))]
fn remote_source(url: &str) -> Result<Box<dyn DatasetSource>, LoadError> {
    Err(LoadError::NetworkFailure(format!(
        "cannot fetch {url}: built without the 'http' feature"
    )))
}
