//! Services
//!
//! - [`store`] - Best-effort JSON persistence with expiry over a raw store
//! - [`repository`] - Dataset parsing, indexing, cached loading
//! - [`progress`] - Completion and notes, persisted per mutation
//! - [`engine`] - Pure filter/sort pipeline
//! - [`transfer`] - Export, validation, idempotent import

pub mod engine;
pub mod progress;
pub mod repository;
pub mod store;
pub mod transfer;

pub use engine::{derive_indices, derive_view};
pub use progress::ProgressTracker;
pub use repository::{FetchedDataset, LoadOrigin, QuestionRepository, TagCount, TagKind};
pub use store::PersistentStore;
pub use transfer::{ImportError, ImportSummary};
