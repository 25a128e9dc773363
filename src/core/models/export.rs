//! Portable progress document
//!
//! Wire shape, kept verbatim for compatibility with earlier exports:
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "generatedAt": "2024-05-01T12:00:00+00:00",
//!   "data": {
//!     "completedProblems": ["two-sum"],
//!     "notes": { "two-sum": [{ "text": "hash map", "ts": 1714564800000 }] }
//!   }
//! }
//! ```
//!
//! `notes` is absent in older exports and is then treated as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Note, QuestionId};

/// Version string written into new exports
pub const EXPORT_VERSION: &str = "2.0";

/// When an export was generated. Older exports carry epoch millis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedAt {
    /// RFC 3339 timestamp
    Rfc3339(String),
    /// Epoch milliseconds
    EpochMillis(i64),
}

/// A complete export document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Format version
    pub version: String,

    /// Generation time
    #[serde(rename = "generatedAt")]
    pub generated_at: GeneratedAt,

    /// Exported progress
    pub data: ExportData,
}

/// Progress payload of an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportData {
    /// Completed question ids
    #[serde(rename = "completedProblems")]
    pub completed_problems: Vec<QuestionId>,

    /// Notes per question id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<BTreeMap<QuestionId, Vec<Note>>>,
}
