//! Filter/sort engine
//!
//! A pure function from (questions, criteria, progress) to the ordered visible
//! subset. Filters are ANDed; within the company and topic selections any one
//! match is enough. Sorting is stable, so ties keep repository order.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::models::text::normalize;
use crate::core::models::{
    CompletionState, Difficulty, FilterCriteria, ProgressState, Question, SortKey,
};

/// Criteria pre-normalized once per derivation
struct Prepared<'c> {
    search: String,
    criteria: &'c FilterCriteria,
    companies: HashSet<String>,
    topics: HashSet<String>,
}

impl<'c> Prepared<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            search: normalize(&criteria.search_text),
            criteria,
            companies: criteria.companies.iter().map(|c| c.trim().to_uppercase()).collect(),
            topics: criteria.topics.iter().map(|t| t.trim().to_lowercase()).collect(),
        }
    }

    fn matches(&self, question: &Question, progress: &ProgressState) -> bool {
        if !self.search.is_empty() && !question.normalized_title().contains(&self.search) {
            return false;
        }

        if self.criteria.difficulty.is_some_and(|d| d != question.difficulty) {
            return false;
        }

        if let Some(state) = self.criteria.completion_state {
            let done = progress.is_completed(&question.id);
            let wanted = matches!(state, CompletionState::Completed);
            if done != wanted {
                return false;
            }
        }

        if !self.companies.is_empty()
            && !question.companies.iter().any(|c| self.companies.contains(c))
        {
            return false;
        }

        if !self.topics.is_empty()
            && !question.topics.iter().any(|t| self.topics.contains(&t.to_lowercase()))
        {
            return false;
        }

        true
    }
}

/// Indices into `questions` of the visible subset, in display order
#[must_use]
pub fn derive_indices(
    questions: &[Question],
    criteria: &FilterCriteria,
    progress: &ProgressState,
) -> Vec<usize> {
    let prepared = Prepared::new(criteria);
    let mut visible: Vec<usize> = questions
        .iter()
        .enumerate()
        .filter(|(_, q)| prepared.matches(q, progress))
        .map(|(i, _)| i)
        .collect();

    // slice::sort_by is stable
    visible.sort_by(|&a, &b| {
        compare(&questions[a], &questions[b], criteria.sort_key, criteria.sort_descending)
    });
    visible
}

/// The visible subset, in display order
#[must_use]
pub fn derive_view<'q>(
    questions: &'q [Question],
    criteria: &FilterCriteria,
    progress: &ProgressState,
) -> Vec<&'q Question> {
    derive_indices(questions, criteria, progress)
        .into_iter()
        .map(|i| &questions[i])
        .collect()
}

/// Order two questions by `key`. Unknown difficulty trails in both directions.
#[must_use]
pub fn compare(a: &Question, b: &Question, key: SortKey, descending: bool) -> Ordering {
    let directed = |ordering: Ordering| if descending { ordering.reverse() } else { ordering };

    match key {
        SortKey::CompanyCount => directed(a.company_count.cmp(&b.company_count)),
        SortKey::Title => directed(a.normalized_title().cmp(b.normalized_title())),
        SortKey::Difficulty => match (a.difficulty, b.difficulty) {
            (Difficulty::Unknown, Difficulty::Unknown) => Ordering::Equal,
            (Difficulty::Unknown, _) => Ordering::Greater,
            (_, Difficulty::Unknown) => Ordering::Less,
            (x, y) => directed(x.ordinal().cmp(&y.ordinal())),
        },
    }
}
