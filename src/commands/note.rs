//! Note command - add, list and remove notes

use qtrack::output::{NoteRow, NotesResult, OperationResult, OutputMode};
use qtrack::{Intent, IntentOutcome};

use super::session::{open_loaded, require_question};
use crate::cli::{NoteAction, SessionArgs};

/// Handle note subcommands
pub fn note_cmd(session: &SessionArgs, action: NoteAction, mode: OutputMode) -> anyhow::Result<()> {
    let mut tracker = open_loaded(session)?;

    match action {
        NoteAction::Add { id, text } => {
            require_question(&tracker, &id)?;
            let outcome = tracker.apply_intent(Intent::AddNote {
                id: id.clone(),
                text: text.join(" "),
            })?;
            if outcome == IntentOutcome::Unchanged {
                anyhow::bail!("Note text is empty");
            }
            OperationResult::ok(format!("Added note to {id}")).render(mode);
        },
        NoteAction::List { id } => {
            require_question(&tracker, &id)?;
            NotesResult {
                notes: NoteRow::numbered(tracker.notes_for(&id)),
                id,
            }
            .render(mode);
        },
        NoteAction::Remove { id, index } => {
            let outcome = tracker.apply_intent(Intent::RemoveNote {
                id: id.clone(),
                index,
            })?;
            if outcome == IntentOutcome::Unchanged {
                anyhow::bail!("No note #{index} on '{id}'");
            }
            OperationResult::ok(format!("Removed note #{index} from {id}")).render(mode);
        },
    }

    Ok(())
}
