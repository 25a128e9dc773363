//! qtrack - Filter, sort and track progress through a coding-interview question set
//!
//! This library provides the engine behind the `qtrack` CLI: loading the
//! question dataset with a TTL cache, tracking completion and notes, deriving
//! the filtered and sorted view, and importing/exporting progress.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod tracker;

pub use tracker::{Intent, IntentOutcome, LoadOutcome, TeardownHandle, Tracker, ViewSnapshot};
