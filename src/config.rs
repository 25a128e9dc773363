//! Global configuration management
//!
//! Config is stored at `<config_dir>/qtrack/config.toml` and only ever read
//! tolerantly: a missing or unparsable file yields the defaults.
//!
//! ```toml
//! [dataset]
//! source = "questions_data.json"   # path or http(s) URL
//! cache_ttl_hours = 24
//!
//! [storage]
//! data_dir = "/somewhere/else"     # optional
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Dataset location used when nothing is configured
pub const DEFAULT_SOURCE: &str = "questions_data.json";

/// Dataset cache lifetime used when nothing is configured
pub const DEFAULT_CACHE_TTL_HOURS: u64 = 24;

/// Global qtrack configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the dataset comes from
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Where progress is kept
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Dataset settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// File path or http(s) URL
    #[serde(default = "default_source")]
    pub source: String,
    /// Hours a fetched dataset stays cached
    #[serde(default = "default_ttl_hours")]
    pub cache_ttl_hours: u64,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

const fn default_ttl_hours() -> u64 {
    DEFAULT_CACHE_TTL_HOURS
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            cache_ttl_hours: default_ttl_hours(),
        }
    }
}

impl DatasetConfig {
    /// Cache lifetime as a duration
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(60 * 60))
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override of the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from the default location
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, falling back to defaults
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map(|content| toml::from_str(&content)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                warn!("Ignoring unparsable config {}: {e}", path.display());
                Self::default()
            },
            Err(e) => {
                warn!("Ignoring unreadable config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding persisted state
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(paths::data_dir)
    }
}
