//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::config::Config;
use crate::core::models::{CompletionStats, Difficulty, FilterCriteria, Note, Question};
use crate::core::services::{ImportSummary, TagCount, TagKind};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn difficulty_label(difficulty: Difficulty) -> colored::ColoredString {
    match difficulty {
        Difficulty::Easy => "Easy".green(),
        Difficulty::Medium => "Medium".yellow(),
        Difficulty::Hard => "Hard".red(),
        Difficulty::Unknown => "Unknown".dimmed(),
    }
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// One question as listed
#[derive(Debug, Serialize)]
pub struct QuestionRow {
    /// Question id
    pub id: String,
    /// Display title
    pub title: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Number of companies asking it
    pub company_count: u32,
    /// Whether it is marked complete
    pub completed: bool,
    /// Number of notes on it
    pub notes: usize,
    /// Solve link, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Companies asking it
    pub companies: Vec<String>,
    /// Topics
    pub topics: Vec<String>,
}

impl QuestionRow {
    /// Row for `question` with its progress
    #[must_use]
    pub fn new(question: &Question, completed: bool, notes: usize) -> Self {
        Self {
            id: question.id.clone(),
            title: question.title.clone(),
            difficulty: question.difficulty,
            company_count: question.company_count,
            completed,
            notes,
            link: question.solve_link().map(String::from),
            companies: question.companies.clone(),
            topics: question.topics.clone(),
        }
    }

    fn render_line(&self) {
        let mark = if self.completed { "[x]".green() } else { "[ ]".normal() };
        let notes = if self.notes > 0 {
            format!(" ({} note{})", self.notes, if self.notes == 1 { "" } else { "s" })
        } else {
            String::new()
        };
        println!(
            "{mark} {:<6} {} {}{}",
            self.company_count,
            self.title.bold(),
            difficulty_label(self.difficulty),
            notes.dimmed()
        );
        println!("      {}", self.id.dimmed());
    }
}

/// Result of listing the current view
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Visible questions, in display order (possibly truncated)
    pub questions: Vec<QuestionRow>,
    /// Number of visible questions before truncation
    pub visible: usize,
    /// Number of questions in the repository
    pub total: usize,
    /// Completion over the visible questions
    pub stats: CompletionStats,
}

impl ListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.visible == 0 {
            println!("No questions match the current filters.");
            return;
        }

        for row in &self.questions {
            row.render_line();
        }

        println!();
        if self.questions.len() < self.visible {
            println!("... {} more", self.visible - self.questions.len());
        }
        println!(
            "Showing {} of {} questions, {}/{} complete ({}%)",
            self.visible, self.total, self.stats.completed, self.stats.total, self.stats.percentage
        );
    }
}

/// One note with its position
#[derive(Debug, Serialize)]
pub struct NoteRow {
    /// Position, oldest first
    pub index: usize,
    /// Note text
    pub text: String,
    /// Creation time, epoch millis
    pub ts: i64,
}

impl NoteRow {
    /// Rows for `notes`, numbered from zero
    #[must_use]
    pub fn numbered(notes: &[Note]) -> Vec<Self> {
        notes
            .iter()
            .enumerate()
            .map(|(index, note)| Self {
                index,
                text: note.text.clone(),
                ts: note.created_at,
            })
            .collect()
    }

    fn render_line(&self) {
        println!("  {} {} {}", format!("#{}", self.index).cyan(), format_timestamp(self.ts).dimmed(), self.text);
    }
}

/// Result of showing a single question
#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    /// The question
    #[serde(flatten)]
    pub question: QuestionRow,
    /// Its notes
    pub note_list: Vec<NoteRow>,
}

impl QuestionDetail {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let q = &self.question;
        println!("{}", q.title.bold());
        println!("  ID:         {}", q.id);
        println!("  Difficulty: {}", difficulty_label(q.difficulty));
        println!("  Companies:  {} ({})", q.company_count, q.companies.join(", "));
        if !q.topics.is_empty() {
            println!("  Topics:     {}", q.topics.join(", "));
        }
        let solve = q.link.as_deref().map_or_else(|| "(no valid link)".dimmed(), Colorize::underline);
        println!("  Solve:      {solve}");
        let status = if q.completed { "completed".green() } else { "not completed".normal() };
        println!("  Status:     {status}");

        if !self.note_list.is_empty() {
            println!();
            println!("Notes:");
            for note in &self.note_list {
                note.render_line();
            }
        }
    }
}

/// Result of listing notes
#[derive(Debug, Serialize)]
pub struct NotesResult {
    /// Question id
    pub id: String,
    /// Notes, oldest first
    pub notes: Vec<NoteRow>,
}

impl NotesResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.notes.is_empty() {
            println!("No notes on {}.", self.id);
            return;
        }
        println!("Notes on {}:", self.id);
        for note in &self.notes {
            note.render_line();
        }
    }
}

/// Result of showing or changing filter criteria
#[derive(Debug, Serialize)]
pub struct CriteriaResult {
    /// Criteria after the change
    pub criteria: FilterCriteria,
    /// Whether anything changed
    pub changed: bool,
    /// Number of visible questions
    pub visible: usize,
    /// Number of questions in the repository
    pub total: usize,
}

impl CriteriaResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let c = &self.criteria;
        let unset = || "(any)".dimmed().to_string();

        println!(
            "Search:     {}",
            if c.search_text.is_empty() { unset() } else { format!("\"{}\"", c.search_text) }
        );
        println!("Difficulty: {}", c.difficulty.map_or_else(unset, |d| d.to_string()));
        println!("Status:     {}", c.completion_state.map_or_else(unset, |s| s.to_string()));
        println!(
            "Companies:  {}",
            if c.companies.is_empty() { unset() } else { c.companies.join(" | ") }
        );
        println!("Topics:     {}", if c.topics.is_empty() { unset() } else { c.topics.join(" | ") });
        println!(
            "Sort:       {} ({})",
            c.sort_key,
            if c.sort_descending { "descending" } else { "ascending" }
        );
        println!();
        println!("{} of {} questions visible", self.visible, self.total);
    }
}

/// Result of the stats command
#[derive(Debug, Serialize)]
pub struct StatsResult {
    /// Completion over the visible questions
    pub visible: CompletionStats,
    /// Completion over every question
    pub overall: CompletionStats,
    /// Completion per difficulty over every question
    pub by_difficulty: Vec<DifficultyStats>,
}

/// Completion for one difficulty
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DifficultyStats {
    /// Difficulty
    pub difficulty: Difficulty,
    /// Completion among questions of that difficulty
    pub stats: CompletionStats,
}

impl StatsResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let line = |label: &str, s: &CompletionStats| {
            println!("{label:<10} {:>5}/{:<5} {:>3}%", s.completed, s.total, s.percentage);
        };

        line("Visible", &self.visible);
        line("Overall", &self.overall);
        println!();
        for entry in &self.by_difficulty {
            line(entry.difficulty.as_str(), &entry.stats);
        }
    }
}

/// Result of a suggestion query
#[derive(Debug, Serialize)]
pub struct SuggestResult {
    /// Index queried
    pub kind: TagKind,
    /// Query as given
    pub query: String,
    /// Matches, most frequent first
    pub suggestions: Vec<TagCount>,
}

impl SuggestResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.suggestions.is_empty() {
            println!("No matches for \"{}\".", self.query);
            return;
        }
        for tag in &self.suggestions {
            println!("{:>5}  {}", tag.count, tag.name);
        }
    }
}

/// Result of an import
#[derive(Debug, Serialize)]
pub struct ImportResult {
    /// File imported
    pub file: String,
    /// What changed
    #[serde(flatten)]
    pub summary: ImportSummary,
}

impl ImportResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.summary.is_noop() {
            println!("Nothing new in {}.", self.file);
        } else {
            println!(
                "{} {} completion(s) and {} note(s) from {}",
                "Imported".green(),
                self.summary.completed_added,
                self.summary.notes_added,
                self.file
            );
        }
    }
}

/// Result of showing the config
#[derive(Debug, Serialize)]
pub struct ConfigResult {
    /// Config file location
    pub path: String,
    /// Effective data directory
    pub data_dir: String,
    /// Loaded config
    pub config: Config,
}

impl ConfigResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Config file:  {}", self.path);
        println!("Data dir:     {}", self.data_dir);
        println!("Dataset:      {}", self.config.dataset.source);
        println!("Cache TTL:    {}h", self.config.dataset.cache_ttl_hours);
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful result carrying `message`
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
