//! Export and import commands - move progress between machines

use std::fs;
use std::path::Path;

use anyhow::Context;

use qtrack::output::{ImportResult, OperationResult, OutputMode};
use qtrack::{Intent, IntentOutcome};

use super::session::open;
use crate::cli::SessionArgs;

/// Export progress to `output`, or to stdout
pub fn export(session: &SessionArgs, output: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let mut tracker = open(session)?;
    let IntentOutcome::Exported(document) = tracker.apply_intent(Intent::Export)? else {
        anyhow::bail!("Export produced no document");
    };
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
            OperationResult::ok(format!(
                "Exported {} completed question(s) to {}",
                document.data.completed_problems.len(),
                path.display()
            ))
            .render(mode);
        },
        None => println!("{json}"),
    }
    Ok(())
}

/// Merge progress from an export file
pub fn import(session: &SessionArgs, file: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()))?;

    let mut tracker = open(session)?;
    let outcome = tracker
        .apply_intent(Intent::Import(text))
        .with_context(|| format!("Rejected {}", file.display()))?;
    let IntentOutcome::Imported(summary) = outcome else {
        anyhow::bail!("Import produced no summary");
    };

    ImportResult {
        file: file.display().to_string(),
        summary,
    }
    .render(mode);
    Ok(())
}
