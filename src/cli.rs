//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use qtrack::core::services::repository::DEFAULT_SUGGESTION_LIMIT;
use qtrack::output::OutputMode;

/// qtrack - Work through a coding-interview question set
#[derive(Parser, Debug)]
#[command(
    name = "qtrack",
    version,
    about = "Filter, sort and track progress through interview questions",
    long_about = "Browse a coding-interview question set by company, topic and difficulty.\n\n\
                  Completion, notes and the current filters persist between runs.\n\
                  Progress can be exported and merged back in on another machine."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where the dataset and persisted state live for this run
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Dataset file or http(s) URL (overrides config)
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    /// Directory for persisted state (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List questions under the current filters
    List {
        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one question with its notes
    Show {
        /// Question ID
        id: String,
    },

    /// Show or change filters and sort
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Mark a question complete, or not complete again
    Toggle {
        /// Question ID
        id: String,
    },

    /// Manage notes on a question
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Show completion statistics
    Stats,

    /// Suggest company or topic names
    Suggest {
        /// companies or topics
        kind: String,

        /// Part of the name (at least 2 characters)
        query: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Export progress as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge progress from an export file
    Import {
        /// Export file
        file: PathBuf,
    },

    /// Refetch the dataset, ignoring the cache
    Refresh,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum FilterAction {
    /// Show the current filters and sort
    Show,

    /// Set the title search (no words clears it)
    Search {
        /// Search words
        text: Vec<String>,
    },

    /// Filter by difficulty (omit to clear)
    Difficulty {
        /// easy, medium, hard or unknown
        value: Option<String>,
    },

    /// Filter by completion (omit to clear)
    Status {
        /// completed or incomplete
        value: Option<String>,
    },

    /// Add or remove a company from the selection
    Company {
        /// Company name
        name: String,
    },

    /// Add or remove a topic from the selection
    Topic {
        /// Topic name
        name: String,
    },

    /// Set the sort order
    Sort {
        /// company-count, difficulty or title
        key: String,

        /// Ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Clear every filter (the sort is kept)
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Add a note
    Add {
        /// Question ID
        id: String,

        /// Note text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List notes
    List {
        /// Question ID
        id: String,
    },

    /// Remove a note by its number
    Remove {
        /// Question ID
        id: String,

        /// Note number as shown by `note list`
        index: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Set the dataset file or URL
    SetSource {
        /// File path or http(s) URL
        source: String,
    },

    /// Set how long a fetched dataset stays cached
    SetTtl {
        /// Hours
        hours: u64,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let session = &cli.session;

    match cli.command {
        Some(Command::List { limit }) => commands::list(session, limit, output_mode),
        Some(Command::Show { id }) => commands::show(session, &id, output_mode),
        Some(Command::Filter { action }) => commands::filter_cmd(session, action, output_mode),
        Some(Command::Toggle { id }) => commands::toggle(session, &id, output_mode),
        Some(Command::Note { action }) => commands::note_cmd(session, action, output_mode),
        Some(Command::Stats) => commands::stats(session, output_mode),
        Some(Command::Suggest { kind, query, limit }) => {
            commands::suggest(session, &kind, &query, limit, output_mode)
        },
        Some(Command::Export { output }) => {
            commands::export(session, output.as_deref(), output_mode)
        },
        Some(Command::Import { file }) => commands::import(session, &file, output_mode),
        Some(Command::Refresh) => commands::refresh(session, output_mode),
        Some(Command::Config { action }) => commands::config_cmd(action, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": qtrack::VERSION
                    })
                );
            } else {
                println!("qtrack v{}", qtrack::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": qtrack::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("qtrack v{}", qtrack::VERSION);
                println!("\nRun 'qtrack --help' for usage");
                println!("Run 'qtrack list' to browse questions");
            }
            Ok(())
        },
    }
}
