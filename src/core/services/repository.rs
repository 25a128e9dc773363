//! Question repository
//!
//! Owns the canonical, immutable question list and two derived indexes: every
//! company and every topic, most frequent first (ties keep first-seen order).
//!
//! Loading tries the persisted cache first; a miss, an expired entry, or an
//! unusable cached document falls through to the [`DatasetSource`], and a
//! successful fetch is written back to the cache.
//!
//! Parsing is tolerant. Each record may use either the tracker's column names
//! or the generator script's, companies and topics may be a comma-separated
//! string or a JSON array, and frequency may be a number or numeric text.
//! Records that are not JSON objects are skipped.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use super::store::{PersistentStore, keys};
use crate::core::models::text::split_list;
use crate::core::models::{Difficulty, Question};
use crate::core::ports::{DatasetSource, LoadError};

/// Default lifetime of the cached dataset
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Queries shorter than this yield no suggestions
pub const MIN_SUGGESTION_QUERY: usize = 2;

/// Default number of suggestions returned
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

const TITLE_FIELDS: &[&str] = &["Question", "Title", "title"];
const DIFFICULTY_FIELDS: &[&str] = &["Difficulty", "difficulty"];
const FREQUENCY_FIELDS: &[&str] = &[
    "Frequency (Number of Companies)",
    "Frequency",
    "Number of Companies",
    "frequency",
];
const LINK_FIELDS: &[&str] = &["Link of Question", "Link", "link", "url"];
const COMPANY_FIELDS: &[&str] = &["Companies Asking This Question", "Companies", "companies"];
const TOPIC_FIELDS: &[&str] = &["Topics", "topics"];
const NAME_FIELDS: &[&str] = &["Name", "name"];

/// A freshly fetched dataset that has not been written to the cache yet
#[derive(Debug)]
pub struct FetchedDataset {
    repository: QuestionRepository,
    document: Value,
}

impl FetchedDataset {
    /// Write the raw document to the cache and hand back the repository
    #[must_use]
    pub fn cache_in(self, store: &PersistentStore, ttl: Duration) -> QuestionRepository {
        store.set(keys::DATASET, &self.document, Some(ttl));
        self.repository
    }
}

/// A company or topic with the number of questions carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// Company or topic name
    pub name: String,
    /// Questions tagged with it
    pub count: usize,
}

/// Which index a suggestion query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Company names
    Company,
    /// Topic names
    Topic,
}

impl std::str::FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" | "companies" => Ok(Self::Company),
            "topic" | "topics" => Ok(Self::Topic),
            _ => Err(format!("Unknown tag kind: {s}. Use 'companies' or 'topics'")),
        }
    }
}

/// Where a loaded repository came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOrigin {
    /// Unexpired cached copy
    Cache,
    /// Fresh fetch from the dataset source
    Source,
}

/// The loaded question set with derived indexes
#[derive(Debug, Clone, Default)]
pub struct QuestionRepository {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
    all_companies: Vec<TagCount>,
    all_topics: Vec<TagCount>,
}

impl QuestionRepository {
    /// Build from sanitized questions, dropping later duplicates of an id.
    #[must_use]
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut kept = Vec::new();
        let mut by_id = HashMap::new();
        let mut dropped = 0_usize;

        for question in questions {
            if by_id.contains_key(&question.id) {
                debug!("Duplicate question id '{}' ({}), keeping first", question.id, question.title);
                dropped += 1;
                continue;
            }
            by_id.insert(question.id.clone(), kept.len());
            kept.push(question);
        }

        if dropped > 0 {
            warn!("Dropped {dropped} question(s) with duplicate ids");
        }

        let all_companies = tally(kept.iter().map(|q| q.companies.as_slice()));
        let all_topics = tally(kept.iter().map(|q| q.topics.as_slice()));

        Self {
            questions: kept,
            by_id,
            all_companies,
            all_topics,
        }
    }

    /// Parse a dataset document (a JSON array of records)
    pub fn from_value(document: &Value) -> Result<Self, LoadError> {
        let records = document.as_array().ok_or_else(|| {
            LoadError::ParseFailure("expected a JSON array of question records".to_string())
        })?;

        let mut skipped = 0_usize;
        let questions: Vec<Question> = records
            .iter()
            .filter_map(|record| {
                let parsed = record.as_object().map(parse_record);
                if parsed.is_none() {
                    skipped += 1;
                }
                parsed
            })
            .collect();

        if skipped > 0 {
            warn!("Skipped {skipped} malformed record(s) in dataset");
        }

        Ok(Self::from_questions(questions))
    }

    /// Parse raw dataset bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| LoadError::ParseFailure(e.to_string()))?;
        Self::from_value(&document)
    }

    /// Load from cache if present and unexpired, otherwise from `source`.
    pub fn load(
        store: &PersistentStore,
        source: &dyn DatasetSource,
        ttl: Duration,
    ) -> Result<(Self, LoadOrigin), LoadError> {
        if let Some(repo) = Self::from_cache(store) {
            return Ok((repo, LoadOrigin::Cache));
        }
        Self::fetch(store, source, ttl).map(|repo| (repo, LoadOrigin::Source))
    }

    /// The cached dataset, if present, unexpired and parseable.
    ///
    /// An unparseable cache entry is removed.
    #[must_use]
    pub fn from_cache(store: &PersistentStore) -> Option<Self> {
        let cached = store.get::<Value>(keys::DATASET)?;
        match Self::from_value(&cached) {
            Ok(repo) => {
                info!("Loaded {} questions from cache", repo.len());
                Some(repo)
            },
            Err(e) => {
                warn!("Cached dataset unusable ({e}), refetching");
                store.remove(keys::DATASET);
                None
            },
        }
    }

    /// Fetch from `source`, bypassing the cache, and refresh the cache on success.
    pub fn fetch(
        store: &PersistentStore,
        source: &dyn DatasetSource,
        ttl: Duration,
    ) -> Result<Self, LoadError> {
        Ok(Self::download(source)?.cache_in(store, ttl))
    }

    /// Fetch and parse from `source` without touching the cache
    pub fn download(source: &dyn DatasetSource) -> Result<FetchedDataset, LoadError> {
        debug!("Fetching dataset from {}", source.describe());
        let bytes = source.fetch()?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(|e| LoadError::ParseFailure(e.to_string()))?;
        let repository = Self::from_value(&document)?;

        info!("Fetched {} questions from {}", repository.len(), source.describe());
        Ok(FetchedDataset {
            repository,
            document,
        })
    }

    /// All questions in load order
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look a question up by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    /// Number of questions
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the repository holds no questions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Every company, most frequent first
    #[must_use]
    pub fn all_companies(&self) -> &[TagCount] {
        &self.all_companies
    }

    /// Every topic, most frequent first
    #[must_use]
    pub fn all_topics(&self) -> &[TagCount] {
        &self.all_topics
    }

    /// Case-insensitive substring matches from the company or topic index.
    ///
    /// Queries shorter than [`MIN_SUGGESTION_QUERY`] characters (after
    /// trimming) match nothing.
    #[must_use]
    pub fn suggest(&self, kind: TagKind, query: &str, limit: usize) -> Vec<&TagCount> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_SUGGESTION_QUERY {
            return Vec::new();
        }

        let index = match kind {
            TagKind::Company => &self.all_companies,
            TagKind::Topic => &self.all_topics,
        };
        index
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&query))
            .take(limit)
            .collect()
    }
}

/// Count tag occurrences, ordered by count desc then first appearance.
fn tally<'a>(tag_lists: impl Iterator<Item = &'a [String]>) -> Vec<TagCount> {
    let mut order: Vec<TagCount> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for tags in tag_lists {
        for tag in tags {
            let i = *position.entry(tag.as_str()).or_insert_with(|| {
                order.push(TagCount {
                    name: tag.clone(),
                    count: 0,
                });
                order.len() - 1
            });
            order[i].count += 1;
        }
    }

    // Stable: equal counts keep first-seen order
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

fn parse_record(record: &Map<String, Value>) -> Question {
    let title = text_field(record, TITLE_FIELDS).unwrap_or_default();
    let difficulty = text_field(record, DIFFICULTY_FIELDS)
        .map_or(Difficulty::Unknown, |d| Difficulty::from_label(&d));
    let link = text_field(record, LINK_FIELDS);
    let companies = field(record, COMPANY_FIELDS).map(list_field).unwrap_or_default();
    let topics = field(record, TOPIC_FIELDS).map(list_field).unwrap_or_default();
    let frequency = field(record, FREQUENCY_FIELDS).map(parse_count);

    let mut question =
        Question::new(&title, difficulty, frequency.unwrap_or(0), link.as_deref(), companies, topics);
    // Generator output has no frequency column; count the asking companies
    if frequency.is_none() {
        question.company_count = u32::try_from(question.companies.len()).unwrap_or(u32::MAX);
    }
    question
}

/// First present, non-null value among `names`
fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| record.get(*name).filter(|v| !v.is_null()))
}

fn text_field(record: &Map<String, Value>, names: &[&str]) -> Option<String> {
    match field(record, names)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Frequency as a non-negative integer; text is read like a leading-integer parse.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().map_or_else(
            || {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map_or(0, |f| f.min(f64::from(u32::MAX)) as u32)
            },
            |n| u32::try_from(n).unwrap_or(u32::MAX),
        ),
        Value::String(s) => parse_leading_integer(s),
        _ => 0,
    }
}

fn parse_leading_integer(text: &str) -> u32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let digits = &digits[..end];
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn list_field(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_list(s).map(String::from).collect(),
        Value::Array(items) => {
            let mut seen = HashSet::new();
            items
                .iter()
                .filter_map(list_item)
                .flat_map(split_list)
                .filter(|item| seen.insert(item.to_string()))
                .map(String::from)
                .collect()
        },
        _ => Vec::new(),
    }
}

/// A list entry: plain text, or an object carrying a `Name`
fn list_item(item: &Value) -> Option<&str> {
    match item {
        Value::String(s) => Some(s.as_str()),
        Value::Object(entry) => NAME_FIELDS
            .iter()
            .find_map(|name| entry.get(*name).and_then(Value::as_str)),
        _ => None,
    }
}
