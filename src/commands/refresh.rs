//! Refresh command - refetch the dataset

use qtrack::LoadOutcome;
use qtrack::output::{OperationResult, OutputMode};

use super::session::open;
use crate::cli::SessionArgs;

/// Refetch the dataset, bypassing the cache
pub fn refresh(session: &SessionArgs, mode: OutputMode) -> anyhow::Result<()> {
    let mut tracker = open(session)?;
    let message = match tracker.reload()? {
        LoadOutcome::Abandoned => "Refresh abandoned".to_string(),
        LoadOutcome::Loaded(_) | LoadOutcome::AlreadyLoaded => {
            format!("Fetched {} questions", tracker.repository().len())
        },
    };
    OperationResult::ok(message).render(mode);
    Ok(())
}
