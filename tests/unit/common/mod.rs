//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing qtrack components.

pub mod mocks;

use std::sync::Arc;

use qtrack::Tracker;
use qtrack::adapters::MemoryStore;
use qtrack::core::models::{Difficulty, Question};
use qtrack::core::services::PersistentStore;

use mocks::{CountingSource, ManualClock};

/// A small dataset in the tracker's column format.
///
/// ```text
/// two-sum        Easy    10  GOOGLE, AMAZON   Array, Hash Table
/// lru-cache      Medium  20  AMAZON, META     Design, Hash Table
/// median-of-...  Hard     5  GOOGLE           Array, Binary Search
/// (no link)      ???      5  META             Graph
/// ```
pub const DATASET: &str = r#"[
    {
        "Question": "Two Sum",
        "Difficulty": "Easy",
        "Frequency (Number of Companies)": "10",
        "Link of Question": "https://leetcode.com/problems/two-sum/",
        "Companies Asking This Question": "Google, Amazon",
        "Topics": "Array, Hash Table"
    },
    {
        "Question": "LRU Cache",
        "Difficulty": "MEDIUM",
        "Frequency (Number of Companies)": 20,
        "Link of Question": "https://leetcode.com/problems/lru-cache/",
        "Companies Asking This Question": "Amazon, Meta",
        "Topics": "Design, Hash Table"
    },
    {
        "Question": "Median of Two Sorted Arrays",
        "Difficulty": "hard",
        "Frequency (Number of Companies)": 5,
        "Link of Question": "https://leetcode.com/problems/median-of-two-sorted-arrays/",
        "Companies Asking This Question": "Google",
        "Topics": "Array, Binary Search"
    },
    {
        "Question": "Clone   Graph",
        "Difficulty": "",
        "Frequency (Number of Companies)": "5 companies",
        "Companies Asking This Question": "Meta",
        "Topics": "Graph"
    }
]"#;

/// Build a question with no link
pub fn question(title: &str, difficulty: Difficulty, company_count: u32) -> Question {
    Question::new(title, difficulty, company_count, None, ["Google"], ["Array"])
}

/// Build a question with a link-derived id and the given companies
pub fn question_at(slug: &str, company_count: u32, companies: &[&str]) -> Question {
    let link = format!("https://leetcode.com/problems/{slug}/");
    Question::new(slug, Difficulty::Medium, company_count, Some(&link), companies, ["Array"])
}

/// In-memory persistent store on a manual clock
pub fn memory_store(clock: &Arc<ManualClock>) -> Arc<PersistentStore> {
    Arc::new(PersistentStore::with_clock(Box::new(MemoryStore::new()), clock.clone()))
}

/// A tracker over [`DATASET`] backed by `store`
pub fn tracker_on(store: &Arc<PersistentStore>) -> Tracker {
    Tracker::new(Arc::clone(store), Box::new(CountingSource::new(DATASET)))
}

/// A loaded tracker over [`DATASET`] with fresh in-memory state
pub fn loaded_tracker() -> Tracker {
    let store = memory_store(&Arc::new(ManualClock::new(0)));
    let mut tracker = tracker_on(&store);
    tracker.load().unwrap();
    tracker
}

/// Titles of the current view, in order
pub fn visible_titles(tracker: &Tracker) -> Vec<String> {
    tracker.current_view().questions.iter().map(|q| q.title.clone()).collect()
}
