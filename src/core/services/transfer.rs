//! Import/export of progress
//!
//! Export snapshots the progress state into an [`ExportDocument`]. Import is a
//! delta-merge, never a replace: ids are added to the completed set, notes are
//! appended unless an identical note (same text and timestamp) already exists.
//! Importing the same document twice is therefore the same as importing it once.
//!
//! Ids are not checked against the current dataset; unknown ids are inert.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::models::{
    EXPORT_VERSION, ExportData, ExportDocument, GeneratedAt, ProgressState,
};

/// Why an import document was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Not JSON at all
    #[error("malformed import document: {0}")]
    Malformed(String),

    /// JSON, but not an export document
    #[error("invalid import document: {0}")]
    InvalidShape(String),
}

/// What an import changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Ids newly marked complete
    pub completed_added: usize,
    /// Notes newly appended
    pub notes_added: usize,
}

impl ImportSummary {
    /// Whether the import changed nothing
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.completed_added == 0 && self.notes_added == 0
    }
}

/// Snapshot `progress` as an export generated at `now_millis`
#[must_use]
pub fn export(progress: &ProgressState, now_millis: i64) -> ExportDocument {
    let generated_at = chrono::DateTime::from_timestamp_millis(now_millis)
        .map_or(GeneratedAt::EpochMillis(now_millis), |t| GeneratedAt::Rfc3339(t.to_rfc3339()));

    ExportDocument {
        version: EXPORT_VERSION.to_string(),
        generated_at,
        data: ExportData {
            completed_problems: progress.completed.iter().cloned().collect(),
            notes: Some(progress.notes.clone()),
        },
    }
}

/// Structural check: right shape, arrays where arrays are expected.
#[must_use]
pub fn validate(document: &Value) -> bool {
    shape_error(document).is_none()
}

/// Parse and validate an import document. Never mutates anything.
pub fn parse_document(text: &str) -> Result<ExportDocument, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    if let Some(problem) = shape_error(&value) {
        return Err(ImportError::InvalidShape(problem));
    }
    serde_json::from_value(value).map_err(|e| ImportError::InvalidShape(e.to_string()))
}

/// Merge `document` into `progress`
pub fn import_merge(document: &ExportDocument, progress: &mut ProgressState) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for id in &document.data.completed_problems {
        if progress.completed.insert(id.clone()) {
            summary.completed_added += 1;
        }
    }

    if let Some(notes) = &document.data.notes {
        for (id, incoming) in notes {
            for note in incoming {
                let existing = progress.notes.entry(id.clone()).or_default();
                if !existing.contains(note) {
                    existing.push(note.clone());
                    summary.notes_added += 1;
                }
            }
            if progress.notes.get(id).is_some_and(Vec::is_empty) {
                progress.notes.remove(id);
            }
        }
    }

    summary
}

fn shape_error(document: &Value) -> Option<String> {
    let Some(root) = document.as_object() else {
        return Some("document must be an object".to_string());
    };
    if !root.get("version").is_some_and(Value::is_string) {
        return Some("'version' must be a string".to_string());
    }
    match root.get("generatedAt") {
        None => return Some("'generatedAt' is missing".to_string()),
        Some(generated) if !(generated.is_string() || generated.is_i64()) => {
            return Some("'generatedAt' must be a timestamp".to_string());
        },
        Some(_) => {},
    }
    let Some(data) = root.get("data").and_then(Value::as_object) else {
        return Some("'data' must be an object".to_string());
    };
    let Some(completed) = data.get("completedProblems").and_then(Value::as_array) else {
        return Some("'data.completedProblems' must be an array".to_string());
    };
    if !completed.iter().all(Value::is_string) {
        return Some("'data.completedProblems' must contain only ids".to_string());
    }

    match data.get("notes") {
        None | Some(Value::Null) => None,
        Some(Value::Object(notes)) => notes.iter().find_map(|(id, list)| {
            let valid = list.as_array().is_some_and(|entries| {
                entries.iter().all(|entry| {
                    entry.get("text").is_some_and(Value::is_string)
                        && entry.get("ts").is_some_and(Value::is_i64)
                })
            });
            (!valid).then(|| format!("'data.notes.{id}' must be an array of notes"))
        }),
        Some(_) => Some("'data.notes' must be an object".to_string()),
    }
}
