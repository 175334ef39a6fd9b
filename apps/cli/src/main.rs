//! `drill`: terminal translation drills over a JSON course file.

mod commands;
mod config;
mod db;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drill_core::{Direction, ItemKind, ProgressStore, STORAGE_KEY};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::StudyArgs;
use crate::config::Config;
use crate::db::SqliteStorage;

#[derive(Parser)]
#[command(name = "drill", version, about = "English/Serbian translation drills")]
struct Cli {
    /// Progress database (overrides DRILL_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the lessons of a course with stored accuracy
    Lessons {
        /// Course JSON file
        course: PathBuf,
    },
    /// Study one lesson
    Study {
        /// Course JSON file
        course: PathBuf,
        /// Lesson title or number
        lesson: String,
        /// Drill the vocabulary list instead of sentences
        #[arg(long)]
        words: bool,
        /// "en-sr" or "sr-en" (overrides DRILL_DIRECTION)
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        /// Answer by picking a numbered option
        #[arg(long)]
        choice: bool,
        /// Stop after this many answers
        #[arg(long)]
        limit: Option<usize>,
        /// Seed the shuffles for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show stored progress
    Stats {
        /// Progress key (lesson title, or "<title>#words")
        key: Option<String>,
    },
    /// Export all progress as JSON ("-" for stdout)
    Export { file: PathBuf },
    /// Replace all progress with an exported JSON file ("-" for stdin)
    Import { file: PathBuf },
    /// Erase all stored progress
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::from_name(value)
        .ok_or_else(|| format!("unknown direction {value:?}, expected en-sr or sr-en"))
}

fn open_store(config: &Config) -> Result<ProgressStore<SqliteStorage>> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    tracing::debug!(path = %config.db_path.display(), "opening progress database");
    let storage = SqliteStorage::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    ProgressStore::load(storage).context("failed to load progress")
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let mut store = open_store(&config)?;
    let mut stdout = io::stdout();

    match cli.command {
        Commands::Lessons { course } => {
            let course = commands::load_course(&course)?;
            commands::list_lessons(&course, &store, &mut stdout)?;
        }
        Commands::Study {
            course,
            lesson,
            words,
            direction,
            choice,
            limit,
            seed,
        } => {
            let course = commands::load_course(&course)?;
            let args = StudyArgs {
                lesson,
                kind: if words { ItemKind::Words } else { ItemKind::Sentences },
                direction: direction.unwrap_or(config.direction),
                multiple_choice: choice,
                limit,
                seed,
            };
            let mut stdin = io::stdin().lock();
            commands::study_lesson(
                &course,
                &args,
                &config.match_settings,
                &mut store,
                &mut stdin,
                &mut stdout,
            )?;
        }
        Commands::Stats { key } => {
            commands::show_stats(&store, key.as_deref(), &mut stdout)?;
            if let Some(saved) = store.medium().updated_at(STORAGE_KEY)? {
                writeln!(stdout, "saved {saved}")?;
            }
        }
        Commands::Export { file } => commands::export_progress(&store, &file)?,
        Commands::Import { file } => commands::import_progress(&mut store, &file)?,
        Commands::Clear { yes } => {
            if yes || confirm("Erase all stored progress?")? {
                commands::clear_progress(&mut store)?;
            }
        }
    }

    store.flush().context("failed to save progress")?;
    Ok(())
}
