//! Suggest command - company and topic name completion

use qtrack::core::services::TagKind;
use qtrack::output::{OutputMode, SuggestResult};

use super::session::open_loaded;
use crate::cli::SessionArgs;

/// Suggest company or topic names containing `query`
pub fn suggest(
    session: &SessionArgs,
    kind: &str,
    query: &str,
    limit: usize,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let kind: TagKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let tracker = open_loaded(session)?;

    SuggestResult {
        kind,
        query: query.to_string(),
        suggestions: tracker.suggest(kind, query, limit).into_iter().cloned().collect(),
    }
    .render(mode);
    Ok(())
}
