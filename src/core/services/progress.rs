//! Progress tracker
//!
//! Owns the completed set and the notes, and writes the affected collection
//! back to the store after every single mutation. Nothing is batched: a crash
//! right after a toggle or a note never loses it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::debug;

use super::store::{PersistentStore, keys};
use super::transfer::{self, ImportSummary};
use crate::core::models::{CompletionStats, ExportDocument, Note, ProgressState, Question};

/// Completion and note state, persisted on every change
#[derive(Debug)]
pub struct ProgressTracker {
    store: Arc<PersistentStore>,
    state: ProgressState,
}

impl ProgressTracker {
    /// Restore persisted progress. Missing or corrupt slots start empty.
    #[must_use]
    pub fn restore(store: Arc<PersistentStore>) -> Self {
        let completed = store.get::<BTreeSet<String>>(keys::COMPLETED).unwrap_or_default();
        let notes = store.get::<BTreeMap<String, Vec<Note>>>(keys::NOTES).unwrap_or_default();
        debug!("Restored {} completed, {} noted question(s)", completed.len(), notes.len());

        Self {
            store,
            state: ProgressState { completed, notes },
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Flip completion of `id`. Returns whether it is complete afterwards.
    pub fn toggle_completion(&mut self, id: &str) -> bool {
        let completed = if self.state.completed.remove(id) {
            false
        } else {
            self.state.completed.insert(id.to_string());
            true
        };
        self.save_completed();
        completed
    }

    /// Whether `id` is complete
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.state.is_completed(id)
    }

    /// Append a note to `id`, text kept as entered.
    /// Blank text is rejected and returns `None`.
    pub fn add_note(&mut self, id: &str, text: &str) -> Option<&Note> {
        if text.trim().is_empty() {
            return None;
        }

        let note = Note::new(text, self.store.now_millis());
        self.state.notes.entry(id.to_string()).or_default().push(note);
        self.save_notes();
        self.state.notes.get(id).and_then(|notes| notes.last())
    }

    /// Remove the note at `index` (oldest first) from `id`
    pub fn remove_note(&mut self, id: &str, index: usize) -> Option<Note> {
        let notes = self.state.notes.get_mut(id)?;
        if index >= notes.len() {
            return None;
        }
        let removed = notes.remove(index);
        if notes.is_empty() {
            self.state.notes.remove(id);
        }
        self.save_notes();
        Some(removed)
    }

    /// Notes on `id`, oldest first
    #[must_use]
    pub fn notes_for(&self, id: &str) -> &[Note] {
        self.state.notes_for(id)
    }

    /// Completion summary over `questions`
    #[must_use]
    pub fn completion_stats<'a>(
        &self,
        questions: impl IntoIterator<Item = &'a Question>,
    ) -> CompletionStats {
        let (total, completed) = questions.into_iter().fold((0, 0), |(total, done), q| {
            (total + 1, done + usize::from(self.is_completed(&q.id)))
        });
        CompletionStats::from_counts(total, completed)
    }

    /// Snapshot as a portable document
    #[must_use]
    pub fn export(&self) -> ExportDocument {
        transfer::export(&self.state, self.store.now_millis())
    }

    /// Merge an import, persisting whatever changed
    pub fn import(&mut self, document: &ExportDocument) -> ImportSummary {
        let summary = transfer::import_merge(document, &mut self.state);
        if summary.completed_added > 0 {
            self.save_completed();
        }
        if summary.notes_added > 0 {
            self.save_notes();
        }
        summary
    }

    fn save_completed(&self) {
        self.store.set(keys::COMPLETED, &self.state.completed, None);
    }

    fn save_notes(&self) {
        self.store.set(keys::NOTES, &self.state.notes, None);
    }
}
