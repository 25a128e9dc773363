//! Centralized path definitions for qtrack
//!
//! This module provides a single source of truth for all filesystem paths used by qtrack.
//!
//! ## Storage Layout
//!
//! ```text
//! <config_dir>/qtrack/
//! └── config.toml               # Dataset source, cache TTL, storage override
//!
//! <data_dir>/qtrack/
//! ├── dataset.json              # Cached dataset (expires)
//! ├── completed.json            # Completed question ids
//! ├── notes.json                # Notes per question id
//! ├── filters.json              # Filter selections
//! └── sort.json                 # Sort preference
//! ```
//!
//! Setting `QTRACK_HOME` puts both under that one directory instead, which is
//! what the integration tests do.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding both the config and data locations
pub const HOME_ENV: &str = "QTRACK_HOME";

/// Application directory name under the platform config/data dirs
const APP_DIR: &str = "qtrack";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Data subdirectory when `QTRACK_HOME` is set
const DATA_SUBDIR: &str = "data";

fn home_override() -> Option<PathBuf> {
    env::var_os(HOME_ENV).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Get the config directory.
///
/// Returns `$QTRACK_HOME` if set, otherwise `<config_dir>/qtrack/`.
#[must_use]
pub fn config_dir() -> PathBuf {
    home_override().unwrap_or_else(|| {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
    })
}

/// Get the config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Get the default data directory for persisted state.
///
/// Returns `$QTRACK_HOME/data` if set, otherwise `<data_dir>/qtrack/`.
#[must_use]
pub fn data_dir() -> PathBuf {
    home_override().map_or_else(
        || dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR),
        |home| home.join(DATA_SUBDIR),
    )
}
