//! Personal progress: completed questions and notes

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::QuestionId;

/// A free-text note attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Note body
    pub text: String,

    /// Creation time, epoch milliseconds
    #[serde(rename = "ts")]
    pub created_at: i64,
}

impl Note {
    /// Create a note
    #[must_use]
    pub fn new(text: impl Into<String>, created_at: i64) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }
}

/// Completed ids plus notes keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Ids of questions marked complete
    #[serde(default)]
    pub completed: BTreeSet<QuestionId>,

    /// Notes per question, oldest first
    #[serde(default)]
    pub notes: BTreeMap<QuestionId, Vec<Note>>,
}

impl ProgressState {
    /// Whether the question is marked complete
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Notes for a question, empty if none
    #[must_use]
    pub fn notes_for(&self, id: &str) -> &[Note] {
        self.notes.get(id).map_or(&[], Vec::as_slice)
    }

    /// Total number of notes across all questions
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }
}

/// Completion summary over some set of questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompletionStats {
    /// Questions in the set
    pub total: usize,
    /// Of those, how many are complete
    pub completed: usize,
    /// `round(100 * completed / total)`, 0 when the set is empty
    pub percentage: u8,
}

impl CompletionStats {
    /// Compute stats from raw counts. `completed` is clamped to `total`.
    #[must_use]
    pub fn from_counts(total: usize, completed: usize) -> Self {
        let completed = completed.min(total);
        let percentage = if total == 0 {
            0
        } else {
            // Integer round-half-up of 100 * completed / total
            let scaled = (200 * completed + total) / (2 * total);
            u8::try_from(scaled).unwrap_or(100)
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}
