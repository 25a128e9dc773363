//! Config command - show and change configuration

use qtrack::config::Config;
use qtrack::output::{ConfigResult, OperationResult, OutputMode};

use crate::cli::ConfigAction;

/// Handle config subcommands
pub fn config_cmd(action: ConfigAction, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = Config::load();

    match action {
        ConfigAction::Show => {
            ConfigResult {
                path: Config::config_path().display().to_string(),
                data_dir: config.data_dir().display().to_string(),
                config,
            }
            .render(mode);
        },
        ConfigAction::SetSource { source } => {
            config.dataset.source.clone_from(&source);
            config.save()?;
            OperationResult::ok(format!("Dataset source set to {source}")).render(mode);
        },
        ConfigAction::SetTtl { hours } => {
            config.dataset.cache_ttl_hours = hours;
            config.save()?;
            OperationResult::ok(format!("Dataset cache TTL set to {hours}h")).render(mode);
        },
    }

    Ok(())
}
