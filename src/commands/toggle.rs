//! Toggle command - flip completion of a question

use qtrack::Intent;
use qtrack::output::{OperationResult, OutputMode};

use super::session::{open_loaded, require_question};
use crate::cli::SessionArgs;

/// Flip completion of `id`
pub fn toggle(session: &SessionArgs, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let mut tracker = open_loaded(session)?;
    let title = require_question(&tracker, id)?.title.clone();

    tracker.apply_intent(Intent::ToggleCompletion(id.to_string()))?;

    let message = if tracker.is_completed(id) {
        format!("Completed: {title}")
    } else {
        format!("Not completed: {title}")
    };
    OperationResult::ok(message).render(mode);
    Ok(())
}
