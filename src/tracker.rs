//! Application facade
//!
//! [`Tracker`] owns the repository, the progress tracker and the filter
//! criteria, and keeps the last derived view. Callers never touch those
//! collections directly: they send an [`Intent`] through
//! [`Tracker::apply_intent`] and pull the result with
//! [`Tracker::current_view`].
//!
//! Loading is the only fallible step that reaches the caller. `load` takes
//! `&mut self`, so a second load cannot start while one is running. A load
//! that completes after [`TeardownHandle::teardown`] commits nothing and its
//! error, if any, is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::models::{
    CompletionState, CompletionStats, Difficulty, ExportDocument, FilterCriteria, Note,
    Question, QuestionId, SortKey,
};
use crate::core::ports::{DatasetSource, LoadError};
use crate::core::services::repository::DEFAULT_CACHE_TTL;
use crate::core::services::store::keys;
use crate::core::services::transfer;
use crate::core::services::{
    ImportError, ImportSummary, LoadOrigin, PersistentStore, ProgressTracker,
    QuestionRepository, TagCount, TagKind, derive_indices,
};

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the search text
    SetSearch(String),
    /// Filter by one difficulty, or clear it
    SetDifficulty(Option<Difficulty>),
    /// Filter by completion, or clear it
    SetCompletion(Option<CompletionState>),
    /// Add or remove a company from the selection
    ToggleCompany(String),
    /// Add or remove a topic from the selection
    ToggleTopic(String),
    /// Change the sort
    SetSort {
        /// Sort field
        key: SortKey,
        /// Direction
        descending: bool,
    },
    /// Drop every filter, keep the sort
    ClearFilters,
    /// Flip completion of a question
    ToggleCompletion(QuestionId),
    /// Append a note to a question
    AddNote {
        /// Question
        id: QuestionId,
        /// Note text
        text: String,
    },
    /// Delete a note by position (oldest first)
    RemoveNote {
        /// Question
        id: QuestionId,
        /// Position in the question's notes
        index: usize,
    },
    /// Merge an export document, given as its JSON text
    Import(String),
    /// Produce an export document
    Export,
}

/// What applying an intent did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// State changed and the view was refreshed
    Changed,
    /// Nothing to do (same value, blank note, unknown note index, ...)
    Unchanged,
    /// An import was merged
    Imported(ImportSummary),
    /// An export was produced
    Exported(ExportDocument),
}

/// Result of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A repository was loaded and the view derived from it
    Loaded(LoadOrigin),
    /// A repository was already loaded; nothing was done
    AlreadyLoaded,
    /// Teardown happened before the load could be committed
    Abandoned,
}

/// Shared flag that abandons in-flight and future loads
#[derive(Debug, Clone, Default)]
pub struct TeardownHandle(Arc<AtomicBool>);

impl TeardownHandle {
    /// Mark the session as torn down
    pub fn teardown(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether [`teardown`](Self::teardown) was called
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The derived state a renderer pulls
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    /// Visible questions, in display order
    pub questions: Vec<&'a Question>,
    /// Completion over the visible questions
    pub stats: CompletionStats,
    /// Number of visible questions
    pub visible: usize,
    /// Number of questions in the repository
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Idle,
    Ready(LoadOrigin),
    Failed,
}

/// Persisted filter selections
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SavedFilters {
    search_text: String,
    difficulty: Option<Difficulty>,
    completion_state: Option<CompletionState>,
    companies: Vec<String>,
    topics: Vec<String>,
}

/// Persisted sort preference
#[derive(Debug, Serialize, Deserialize)]
struct SavedSort {
    key: SortKey,
    descending: bool,
}

/// The application facade
pub struct Tracker {
    store: Arc<PersistentStore>,
    source: Box<dyn DatasetSource>,
    cache_ttl: Duration,
    repository: QuestionRepository,
    progress: ProgressTracker,
    criteria: FilterCriteria,
    visible: Vec<usize>,
    stats: CompletionStats,
    load_state: LoadState,
    teardown: TeardownHandle,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("source", &self.source.describe())
            .field("questions", &self.repository.len())
            .field("visible", &self.visible.len())
            .field("criteria", &self.criteria)
            .field("load_state", &self.load_state)
            .finish_non_exhaustive()
    }
}

impl Tracker {
    /// Restore progress and criteria from `store`. Nothing is loaded yet.
    #[must_use]
    pub fn new(store: Arc<PersistentStore>, source: Box<dyn DatasetSource>) -> Self {
        let progress = ProgressTracker::restore(Arc::clone(&store));
        let criteria = restore_criteria(&store);

        Self {
            store,
            source,
            cache_ttl: DEFAULT_CACHE_TTL,
            repository: QuestionRepository::default(),
            progress,
            criteria,
            visible: Vec::new(),
            stats: CompletionStats::default(),
            load_state: LoadState::Idle,
            teardown: TeardownHandle::default(),
        }
    }

    /// Use `ttl` for the dataset cache instead of the default 24 hours
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Share an existing teardown handle instead of a fresh one
    #[must_use]
    pub fn with_teardown_handle(mut self, handle: TeardownHandle) -> Self {
        self.teardown = handle;
        self
    }

    /// Handle the boundary keeps to abandon loads
    #[must_use]
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    /// Load the repository, from cache when possible.
    ///
    /// Does nothing once a load has succeeded; call [`reload`](Self::reload)
    /// to refetch. After a failure, calling again retries.
    pub fn load(&mut self) -> Result<LoadOutcome, LoadError> {
        if matches!(self.load_state, LoadState::Ready(_)) {
            debug!("Dataset already loaded, ignoring load request");
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        self.run_load(false)
    }

    /// Refetch the dataset, bypassing and then rewriting the cache
    pub fn reload(&mut self) -> Result<LoadOutcome, LoadError> {
        self.run_load(true)
    }

    fn run_load(&mut self, bypass_cache: bool) -> Result<LoadOutcome, LoadError> {
        if self.teardown.is_torn_down() {
            return Ok(LoadOutcome::Abandoned);
        }

        if !bypass_cache && let Some(repository) = QuestionRepository::from_cache(&self.store) {
            return Ok(self.install(repository, LoadOrigin::Cache));
        }

        let result = QuestionRepository::download(self.source.as_ref());

        // Nothing is committed once torn down, not even the cache
        if self.teardown.is_torn_down() {
            match result {
                Ok(_) => debug!("Load finished after teardown, discarding"),
                Err(e) => debug!("Load failed after teardown, ignoring: {e}"),
            }
            return Ok(LoadOutcome::Abandoned);
        }

        match result {
            Ok(fetched) => {
                let repository = fetched.cache_in(&self.store, self.cache_ttl);
                Ok(self.install(repository, LoadOrigin::Source))
            },
            Err(e) => {
                warn!("Failed to load dataset from {}: {e}", self.source.describe());
                if !matches!(self.load_state, LoadState::Ready(_)) {
                    self.load_state = LoadState::Failed;
                }
                Err(e)
            },
        }
    }

    fn install(&mut self, repository: QuestionRepository, origin: LoadOrigin) -> LoadOutcome {
        self.repository = repository;
        self.load_state = LoadState::Ready(origin);
        self.refresh_view();
        info!("{} questions ready ({} visible)", self.repository.len(), self.visible.len());
        LoadOutcome::Loaded(origin)
    }

    /// Whether a repository has been loaded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.load_state, LoadState::Ready(_))
    }

    /// Where the loaded repository came from, if loaded
    #[must_use]
    pub const fn load_origin(&self) -> Option<LoadOrigin> {
        match self.load_state {
            LoadState::Ready(origin) => Some(origin),
            LoadState::Idle | LoadState::Failed => None,
        }
    }

    /// Apply one user action and refresh whatever it affects.
    ///
    /// Only a rejected import document is an error; it leaves every piece of
    /// state untouched.
    pub fn apply_intent(&mut self, intent: Intent) -> Result<IntentOutcome, ImportError> {
        debug!("Applying {intent:?}");

        let outcome = match intent {
            Intent::SetSearch(text) => self.update_criteria(|c| {
                let changed = c.search_text != text;
                c.search_text = text;
                changed
            }),
            Intent::SetDifficulty(difficulty) => self.update_criteria(|c| {
                let changed = c.difficulty != difficulty;
                c.difficulty = difficulty;
                changed
            }),
            Intent::SetCompletion(state) => self.update_criteria(|c| {
                let changed = c.completion_state != state;
                c.completion_state = state;
                changed
            }),
            Intent::ToggleCompany(name) => self.update_criteria(|c| c.toggle_company(&name)),
            Intent::ToggleTopic(name) => self.update_criteria(|c| c.toggle_topic(&name)),
            Intent::SetSort { key, descending } => self.update_criteria(|c| {
                let changed = c.sort_key != key || c.sort_descending != descending;
                c.sort_key = key;
                c.sort_descending = descending;
                changed
            }),
            Intent::ClearFilters => self.update_criteria(|c| {
                let changed = c.has_filters();
                c.clear_filters();
                changed
            }),
            Intent::ToggleCompletion(id) => {
                self.progress.toggle_completion(&id);
                self.after_progress_change();
                IntentOutcome::Changed
            },
            Intent::AddNote { id, text } => {
                if self.progress.add_note(&id, &text).is_some() {
                    IntentOutcome::Changed
                } else {
                    IntentOutcome::Unchanged
                }
            },
            Intent::RemoveNote { id, index } => {
                if self.progress.remove_note(&id, index).is_some() {
                    IntentOutcome::Changed
                } else {
                    IntentOutcome::Unchanged
                }
            },
            Intent::Import(text) => {
                let document = transfer::parse_document(&text)?;
                let summary = self.progress.import(&document);
                if summary.completed_added > 0 {
                    self.after_progress_change();
                }
                info!(
                    "Imported {} completion(s), {} note(s)",
                    summary.completed_added, summary.notes_added
                );
                IntentOutcome::Imported(summary)
            },
            Intent::Export => IntentOutcome::Exported(self.progress.export()),
        };

        Ok(outcome)
    }

    /// The visible questions and their stats
    #[must_use]
    pub fn current_view(&self) -> ViewSnapshot<'_> {
        let questions = self.repository.questions();
        ViewSnapshot {
            questions: self.visible.iter().map(|&i| &questions[i]).collect(),
            stats: self.stats,
            visible: self.visible.len(),
            total: self.repository.len(),
        }
    }

    /// Completion over the whole repository
    #[must_use]
    pub fn overall_stats(&self) -> CompletionStats {
        self.progress.completion_stats(self.repository.questions())
    }

    /// Current criteria
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Loaded repository (empty before the first load)
    #[must_use]
    pub const fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    /// Progress tracker
    #[must_use]
    pub const fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Look a question up by id
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.repository.get(id)
    }

    /// Whether `id` is complete
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.progress.is_completed(id)
    }

    /// Notes on `id`, oldest first
    #[must_use]
    pub fn notes_for(&self, id: &str) -> &[Note] {
        self.progress.notes_for(id)
    }

    /// Company or topic suggestions for a partially typed name
    #[must_use]
    pub fn suggest(&self, kind: TagKind, query: &str, limit: usize) -> Vec<&TagCount> {
        self.repository.suggest(kind, query, limit)
    }

    fn update_criteria(&mut self, update: impl FnOnce(&mut FilterCriteria) -> bool) -> IntentOutcome {
        if !update(&mut self.criteria) {
            return IntentOutcome::Unchanged;
        }
        save_criteria(&self.store, &self.criteria);
        self.refresh_view();
        IntentOutcome::Changed
    }

    fn after_progress_change(&mut self) {
        if self.criteria.completion_state.is_some() {
            self.refresh_view();
        } else {
            self.refresh_stats();
        }
    }

    fn refresh_view(&mut self) {
        self.visible =
            derive_indices(self.repository.questions(), &self.criteria, self.progress.state());
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        let questions = self.repository.questions();
        self.stats = self.progress.completion_stats(self.visible.iter().map(|&i| &questions[i]));
    }
}

fn restore_criteria(store: &PersistentStore) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();

    if let Some(saved) = store.get::<SavedFilters>(keys::FILTERS) {
        criteria.search_text = saved.search_text;
        criteria.difficulty = saved.difficulty;
        criteria.completion_state = saved.completion_state;
        for company in &saved.companies {
            criteria.toggle_company(company);
        }
        for topic in &saved.topics {
            criteria.toggle_topic(topic);
        }
    }

    if let Some(sort) = store.get::<SavedSort>(keys::SORT) {
        criteria.sort_key = sort.key;
        criteria.sort_descending = sort.descending;
    }

    criteria
}

fn save_criteria(store: &PersistentStore, criteria: &FilterCriteria) {
    let filters = SavedFilters {
        search_text: criteria.search_text.clone(),
        difficulty: criteria.difficulty,
        completion_state: criteria.completion_state,
        companies: criteria.companies.clone(),
        topics: criteria.topics.clone(),
    };
    store.set(keys::FILTERS, &filters, None);
    store.set(
        keys::SORT,
        &SavedSort {
            key: criteria.sort_key,
            descending: criteria.sort_descending,
        },
        None,
    );
}
