//! List and show commands - browse the current view

use qtrack::Tracker;
use qtrack::core::models::Question;
use qtrack::output::{ListResult, NoteRow, OutputMode, QuestionDetail, QuestionRow};

use super::session::{open_loaded, require_question};
use crate::cli::SessionArgs;

fn row(tracker: &Tracker, question: &Question) -> QuestionRow {
    QuestionRow::new(
        question,
        tracker.is_completed(&question.id),
        tracker.notes_for(&question.id).len(),
    )
}

/// List questions under the persisted filters
pub fn list(session: &SessionArgs, limit: Option<usize>, mode: OutputMode) -> anyhow::Result<()> {
    let tracker = open_loaded(session)?;
    let view = tracker.current_view();

    let result = ListResult {
        questions: view
            .questions
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|q| row(&tracker, q))
            .collect(),
        visible: view.visible,
        total: view.total,
        stats: view.stats,
    };
    result.render(mode);
    Ok(())
}

/// Show one question with notes and completion
pub fn show(session: &SessionArgs, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let tracker = open_loaded(session)?;
    let question = require_question(&tracker, id)?;

    QuestionDetail {
        question: row(&tracker, question),
        note_list: NoteRow::numbered(tracker.notes_for(id)),
    }
    .render(mode);
    Ok(())
}
