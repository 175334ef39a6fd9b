//! Host configuration from the environment.
//!
//! Env variables (a `.env` file is honoured):
//!   DRILL_DB_PATH           : SQLite progress database (default: local data dir)
//!   DRILL_SCRIPT_FALLBACK   : accept Cyrillic/Latin script mismatch (default true)
//!   DRILL_DIALECT_LEVELING  : accept ijekavian answers for ekavian content (default false)
//!   DRILL_DIRECTION         : "en-sr" (default) or "sr-en"
//!   RUST_LOG                : tracing filter

use drill_core::{Direction, MatchSettings};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub match_settings: MatchSettings,
    pub direction: Direction,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MatchSettings::default();

        let db_path = lookup("DRILL_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let direction = match lookup("DRILL_DIRECTION") {
            Some(name) => Direction::from_name(&name).unwrap_or_else(|| {
                tracing::warn!(%name, "unknown DRILL_DIRECTION, using default");
                Direction::default()
            }),
            None => Direction::default(),
        };

        Self {
            db_path,
            match_settings: MatchSettings {
                script_fallback: lookup("DRILL_SCRIPT_FALLBACK")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(defaults.script_fallback),
                dialect_leveling: lookup("DRILL_DIALECT_LEVELING")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(defaults.dialect_leveling),
                punctuation: defaults.punctuation,
            },
            direction,
        }
    }
}

fn default_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("serbian-drill")
        .join("progress.db")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
