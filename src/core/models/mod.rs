//! Domain models for qtrack
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Question`] - One sanitized dataset record with a stable id
//! - [`Difficulty`] - Easy / Medium / Hard / Unknown
//! - [`FilterCriteria`] - The user's filter and sort selections
//! - [`ProgressState`] - Completed ids and notes
//! - [`ExportDocument`] - Portable backup of progress

mod criteria;
mod difficulty;
mod export;
mod progress;
mod question;
pub mod text;

pub use criteria::{CompletionState, FilterCriteria, SortKey};
pub use difficulty::Difficulty;
pub use export::{EXPORT_VERSION, ExportData, ExportDocument, GeneratedAt};
pub use progress::{CompletionStats, Note, ProgressState};
pub use question::{Question, QuestionId, UNTITLED, is_valid_url};
