//! `stats`: stored progress totals.

use anyhow::Result;
use chrono::{DateTime, Utc};
use drill_core::{ProgressStore, StorageMedium};
use std::io::Write;

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Print the counters for `key`, or every key plus the overall totals.
pub fn show_stats<M: StorageMedium, O: Write>(
    store: &ProgressStore<M>,
    key: Option<&str>,
    out: &mut O,
) -> Result<()> {
    if let Some(key) = key {
        let Some(counter) = store.counter(key) else {
            writeln!(out, "{key}: no answers recorded")?;
            return Ok(());
        };
        let stats = store.get_stats(key, 0);
        writeln!(
            out,
            "{key}: {} correct, {} incorrect, {:.1}% accuracy, last {}",
            counter.correct,
            counter.incorrect,
            stats.accuracy,
            format_time(counter.last_attempted)
        )?;
        return Ok(());
    }

    for (key, counter) in &store.snapshot().lessons {
        writeln!(
            out,
            "{key}: {}/{} correct, last {}",
            counter.correct,
            counter.attempts(),
            format_time(counter.last_attempted)
        )?;
    }

    let overall = store.overall_stats();
    writeln!(
        out,
        "overall: {} keys, {} correct, {} incorrect, {:.1}% accuracy",
        overall.keys_attempted, overall.correct_count, overall.incorrect_count, overall.accuracy
    )?;
    Ok(())
}
