//! Dataset source port
//!
//! Where the static question dataset comes from: a local file, an HTTP
//! endpoint, or an in-memory fixture.

use thiserror::Error;

/// Why the dataset could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source could not be reached or read
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The source answered with a non-success status
    #[error("unexpected status {0}")]
    BadStatus(u16),

    /// The source returned something that is not a question list
    #[error("could not parse dataset: {0}")]
    ParseFailure(String),
}

/// A single fetch of the dataset document
pub trait DatasetSource: Send + Sync {
    /// Fetch the raw dataset bytes
    fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}
