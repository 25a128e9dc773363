//! Question model
//!
//! A question is one sanitized dataset record. Once built it never changes;
//! progress (completion, notes) is tracked separately, keyed by [`QuestionId`].
//!
//! Identity is derived from the record itself so that progress stays attached
//! across reloads: the problem slug (or the normalized link) when one is
//! usable, otherwise a SHA-256 digest of the normalized title and the difficulty.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::Difficulty;
use super::text::{normalize, normalize_company, push_unique};

/// Stable identifier of a question
pub type QuestionId = String;

/// Title used when the source record has none
pub const UNTITLED: &str = "Untitled";

/// Absolute http(s) URL with a host
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)https?://[^\s/?#@]+(:\d+)?([/?#][^\s]*)?$").expect("URL pattern is valid")
});

/// A single interview question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Stable identifier (link slug or content digest)
    pub id: QuestionId,

    /// Display title, never empty
    pub title: String,

    /// Normalized difficulty
    pub difficulty: Difficulty,

    /// How many companies ask this question
    pub company_count: u32,

    /// Problem link as given by the source, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Upper-cased company names, first-seen order, no duplicates
    pub companies: Vec<String>,

    /// Trimmed topic names, first-seen order, no duplicates
    pub topics: Vec<String>,

    #[serde(skip)]
    normalized_title: String,
}

impl Question {
    /// Build a question from already-extracted fields, sanitizing each one.
    #[must_use]
    pub fn new<C, T>(
        title: &str,
        difficulty: Difficulty,
        company_count: u32,
        link: Option<&str>,
        companies: C,
        topics: T,
    ) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let title = match title.trim() {
            "" => UNTITLED.to_string(),
            t => t.to_string(),
        };
        let link = link.map(str::trim).filter(|l| !l.is_empty()).map(String::from);

        let mut company_list = Vec::new();
        for company in companies {
            let company = normalize_company(company.as_ref());
            if !company.is_empty() {
                push_unique(&mut company_list, company);
            }
        }

        let mut topic_list = Vec::new();
        for topic in topics {
            let topic = topic.as_ref().trim();
            if !topic.is_empty() {
                push_unique(&mut topic_list, topic.to_string());
            }
        }

        let normalized_title = normalize(&title);
        let id = derive_id(link.as_deref(), &normalized_title, difficulty);

        Self {
            id,
            title,
            difficulty,
            company_count,
            link,
            companies: company_list,
            topics: topic_list,
            normalized_title,
        }
    }

    /// Title lowercased, trimmed, whitespace collapsed
    #[must_use]
    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    /// The link, only if it is a well-formed absolute http(s) URL.
    ///
    /// Renderers offer a "solve" action only when this is `Some`.
    #[must_use]
    pub fn solve_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| is_valid_url(l))
    }
}

/// Whether `candidate` is a syntactically valid absolute http(s) URL
#[must_use]
pub fn is_valid_url(candidate: &str) -> bool {
    URL_RE.is_match(candidate)
}

fn derive_id(link: Option<&str>, normalized_title: &str, difficulty: Difficulty) -> QuestionId {
    if let Some(slug) = link.filter(|l| is_valid_url(l)).and_then(link_slug) {
        return slug;
    }

    let mut hasher = Sha256::new();
    hasher.update(normalized_title.as_bytes());
    hasher.update([0x1f]);
    hasher.update(difficulty.as_str().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("q-{}", &digest[..12])
}

/// Identity of a link, lowercased.
///
/// The segment after `/problems/` when there is one
/// (`https://leetcode.com/problems/two-sum/description/` -> `two-sum`),
/// otherwise host and path without scheme, query, fragment or trailing slash.
/// A link with no path identifies nothing.
fn link_slug(link: &str) -> Option<String> {
    let without_scheme = link.split_once("://").map_or(link, |(_, rest)| rest);
    let location = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let mut segments = location.split('/').filter(|s| !s.is_empty());
    let host = segments.next()?;
    let path: Vec<&str> = segments.collect();

    if let Some(pos) = path.iter().position(|s| *s == "problems")
        && let Some(slug) = path.get(pos + 1)
    {
        return Some((*slug).to_string());
    }
    if path.is_empty() {
        return None;
    }
    Some(format!("{host}/{}", path.join("/")))
}
