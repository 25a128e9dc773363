//! Filter command - show or change filters and sort

use qtrack::core::models::{CompletionState, Difficulty, SortKey};
use qtrack::output::{CriteriaResult, OutputMode};
use qtrack::{Intent, IntentOutcome};

use super::session::open_loaded;
use crate::cli::{FilterAction, SessionArgs};

fn parse<T>(value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Handle filter subcommands
pub fn filter_cmd(
    session: &SessionArgs,
    action: FilterAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let intent = match action {
        FilterAction::Show => None,
        FilterAction::Search { text } => Some(Intent::SetSearch(text.join(" "))),
        FilterAction::Difficulty { value } => Some(Intent::SetDifficulty(
            value.as_deref().map(parse::<Difficulty>).transpose()?,
        )),
        FilterAction::Status { value } => Some(Intent::SetCompletion(
            value.as_deref().map(parse::<CompletionState>).transpose()?,
        )),
        FilterAction::Company { name } => Some(Intent::ToggleCompany(name)),
        FilterAction::Topic { name } => Some(Intent::ToggleTopic(name)),
        FilterAction::Sort { key, asc } => Some(Intent::SetSort {
            key: parse::<SortKey>(&key)?,
            descending: !asc,
        }),
        FilterAction::Clear => Some(Intent::ClearFilters),
    };

    let mut tracker = open_loaded(session)?;
    let changed = match intent {
        Some(intent) => tracker.apply_intent(intent)? == IntentOutcome::Changed,
        None => false,
    };

    let view = tracker.current_view();
    CriteriaResult {
        criteria: tracker.criteria().clone(),
        changed,
        visible: view.visible,
        total: view.total,
    }
    .render(mode);
    Ok(())
}
