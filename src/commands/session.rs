//! Opening a tracker for one CLI invocation

use std::sync::Arc;

use anyhow::Context;
use log::debug;

use qtrack::Tracker;
use qtrack::adapters::{self, FileStore, MemoryStore};
use qtrack::config::Config;
use qtrack::core::models::Question;
use qtrack::core::ports::KeyValueStore;
use qtrack::core::services::PersistentStore;

use crate::cli::SessionArgs;

/// Build a tracker from config and flags without loading the dataset
pub fn open(args: &SessionArgs) -> anyhow::Result<Tracker> {
    let config = Config::load();
    let location = args.dataset.clone().unwrap_or_else(|| config.dataset.source.clone());

    let backend: Box<dyn KeyValueStore> = if args.ephemeral {
        debug!("Ephemeral session, state kept in memory");
        Box::new(MemoryStore::new())
    } else {
        let dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir());
        debug!("Persisting state under {}", dir.display());
        Box::new(FileStore::new(dir))
    };

    let source = adapters::source_for(&location)
        .with_context(|| format!("Cannot use dataset source '{location}'"))?;
    let store = Arc::new(PersistentStore::new(backend));

    Ok(Tracker::new(store, source).with_cache_ttl(config.dataset.cache_ttl()))
}

/// Build a tracker and load the dataset
pub fn open_loaded(args: &SessionArgs) -> anyhow::Result<Tracker> {
    let mut tracker = open(args)?;
    tracker.load().context("Could not load the question dataset")?;
    Ok(tracker)
}

/// The loaded question named `id`, or an error
pub fn require_question<'t>(tracker: &'t Tracker, id: &str) -> anyhow::Result<&'t Question> {
    tracker.question(id).ok_or_else(|| anyhow::anyhow!("No question with id '{id}'"))
}
