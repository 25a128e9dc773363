//! Stats command - completion over the view and the whole set

use qtrack::core::models::Difficulty;
use qtrack::output::{DifficultyStats, OutputMode, StatsResult};

use super::session::open_loaded;
use crate::cli::SessionArgs;

/// Show completion statistics
pub fn stats(session: &SessionArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tracker = open_loaded(session)?;
    let questions = tracker.repository().questions();

    let by_difficulty = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Unknown]
        .into_iter()
        .map(|difficulty| DifficultyStats {
            difficulty,
            stats: tracker
                .progress()
                .completion_stats(questions.iter().filter(|q| q.difficulty == difficulty)),
        })
        .filter(|entry| entry.stats.total > 0)
        .collect();

    StatsResult {
        visible: tracker.current_view().stats,
        overall: tracker.overall_stats(),
        by_difficulty,
    }
    .render(mode);
    Ok(())
}
