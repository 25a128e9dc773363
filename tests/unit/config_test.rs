//! Tests for config loading and path resolution
//!
//! These mutate `QTRACK_HOME`, so they run serially.

use std::env;
use std::fs;
use std::path::PathBuf;

use qtrack::config::{Config, DEFAULT_CACHE_TTL_HOURS, DEFAULT_SOURCE};
use qtrack::paths::{self, HOME_ENV};
use serial_test::serial;
use tempfile::TempDir;

/// Point `QTRACK_HOME` at `dir` for the lifetime of the guard
struct HomeGuard {
    previous: Option<std::ffi::OsString>,
}

impl HomeGuard {
    fn set(dir: &std::path::Path) -> Self {
        let previous = env::var_os(HOME_ENV);
        // SAFETY: serialized with every other test touching the environment
        unsafe { env::set_var(HOME_ENV, dir) };
        Self { previous }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: serialized with every other test touching the environment
        unsafe {
            match &self.previous {
                Some(value) => env::set_var(HOME_ENV, value),
                None => env::remove_var(HOME_ENV),
            }
        }
    }
}

#[test]
#[serial]
fn test_home_override_moves_config_and_data() {
    let dir = TempDir::new().unwrap();
    let _guard = HomeGuard::set(dir.path());

    assert_eq!(paths::config_dir(), dir.path());
    assert_eq!(paths::config_file(), dir.path().join("config.toml"));
    assert_eq!(paths::data_dir(), dir.path().join("data"));
}

#[test]
#[serial]
fn test_config_defaults_when_absent() {
    let dir = TempDir::new().unwrap();
    let _guard = HomeGuard::set(dir.path());

    let config = Config::load();
    assert_eq!(config.dataset.source, DEFAULT_SOURCE);
    assert_eq!(config.dataset.cache_ttl_hours, DEFAULT_CACHE_TTL_HOURS);
    assert_eq!(config.data_dir(), dir.path().join("data"));
}

#[test]
#[serial]
fn test_save_and_load_through_home() {
    let dir = TempDir::new().unwrap();
    let _guard = HomeGuard::set(dir.path());

    let mut config = Config::default();
    config.dataset.source = "https://example.com/questions.json".to_string();
    config.dataset.cache_ttl_hours = 6;
    config.save().unwrap();

    let content = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(content.contains("cache_ttl_hours = 6"));

    let loaded = Config::load();
    assert_eq!(loaded.dataset.source, "https://example.com/questions.json");
    assert_eq!(loaded.dataset.cache_ttl().as_secs(), 6 * 60 * 60);
}

#[test]
#[serial]
fn test_storage_override_wins_over_home() {
    let dir = TempDir::new().unwrap();
    let _guard = HomeGuard::set(dir.path());

    fs::write(
        dir.path().join("config.toml"),
        "[storage]\ndata_dir = \"/var/lib/qtrack\"\n",
    )
    .unwrap();

    let config = Config::load();
    assert_eq!(config.data_dir(), PathBuf::from("/var/lib/qtrack"));
    assert_eq!(config.dataset.source, DEFAULT_SOURCE);
}
