//! Core engine for qtrack
//!
//! Everything here is independent of how questions are displayed. I/O is
//! reached only through the port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Question, FilterCriteria, ProgressState, ExportDocument)
//! - `services/` - Persistence wrapper, repository, progress, filter/sort, import/export
//! - `ports/` - Trait definitions for storage, dataset source, and clock

pub mod models;
pub mod ports;
pub mod services;
