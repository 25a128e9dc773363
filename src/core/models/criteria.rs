//! Filter and sort criteria
//!
//! Criteria are the user's current selections. Each criterion is vacuously
//! satisfied when unset or empty, so [`FilterCriteria::default`] shows every
//! question, most-asked first.

use serde::{Deserialize, Serialize};

use super::Difficulty;
use super::text::{normalize_company, push_unique};

/// Completion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    /// Only questions marked complete
    Completed,
    /// Only questions not marked complete
    Incomplete,
}

impl std::fmt::Display for CompletionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

impl std::str::FromStr for CompletionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "incomplete" | "todo" | "pending" => Ok(Self::Incomplete),
            _ => Err(format!("Invalid status: {s}. Use: completed, incomplete")),
        }
    }
}

/// Field the visible list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Number of companies asking the question
    #[default]
    CompanyCount,
    /// Easy, Medium, Hard; unknown always last
    Difficulty,
    /// Case-insensitive title
    Title,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompanyCount => write!(f, "company-count"),
            Self::Difficulty => write!(f, "difficulty"),
            Self::Title => write!(f, "title"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "company-count" | "companies" | "frequency" | "count" => Ok(Self::CompanyCount),
            "difficulty" => Ok(Self::Difficulty),
            "title" | "name" => Ok(Self::Title),
            _ => Err(format!("Invalid sort key: {s}. Use: company-count, difficulty, title")),
        }
    }
}

/// The user's current filter and sort selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text matched against the normalized title
    #[serde(default)]
    pub search_text: String,

    /// Exact difficulty, if filtering by one
    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    /// Completed / incomplete, if filtering by one
    #[serde(default)]
    pub completion_state: Option<CompletionState>,

    /// Selected companies (any may match), upper-cased, selection order
    #[serde(default)]
    pub companies: Vec<String>,

    /// Selected topics (any may match), selection order
    #[serde(default)]
    pub topics: Vec<String>,

    /// Sort field
    #[serde(default)]
    pub sort_key: SortKey,

    /// Sort direction
    #[serde(default = "default_descending")]
    pub sort_descending: bool,
}

const fn default_descending() -> bool {
    true
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            difficulty: None,
            completion_state: None,
            companies: Vec::new(),
            topics: Vec::new(),
            sort_key: SortKey::default(),
            sort_descending: default_descending(),
        }
    }
}

impl FilterCriteria {
    /// Whether any filter (not sort) is active
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || self.difficulty.is_some()
            || self.completion_state.is_some()
            || !self.companies.is_empty()
            || !self.topics.is_empty()
    }

    /// Select the company if unselected, deselect it otherwise.
    /// Returns whether it is selected afterwards.
    pub fn toggle_company(&mut self, name: &str) -> bool {
        let name = normalize_company(name);
        if name.is_empty() {
            return false;
        }
        toggle(&mut self.companies, name, |a, b| a == b)
    }

    /// Select the topic if unselected (case-insensitive), deselect it otherwise.
    /// Returns whether it is selected afterwards.
    pub fn toggle_topic(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        toggle(&mut self.topics, name.to_string(), |a, b| a.eq_ignore_ascii_case(b))
    }

    /// Reset every filter, keeping the sort order
    pub fn clear_filters(&mut self) {
        *self = Self {
            sort_key: self.sort_key,
            sort_descending: self.sort_descending,
            ..Self::default()
        };
    }
}

fn toggle(items: &mut Vec<String>, item: String, same: impl Fn(&str, &str) -> bool) -> bool {
    let before = items.len();
    items.retain(|existing| !same(existing, &item));
    if items.len() < before {
        false
    } else {
        push_unique(items, item)
    }
}
