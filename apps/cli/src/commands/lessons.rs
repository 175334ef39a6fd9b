//! `lessons`: course overview with stored accuracy.

use anyhow::Result;
use drill_core::{Course, ItemKind, ProgressStore, StorageMedium};
use std::io::Write;

use super::progress_key;

/// Print one line per lesson with item counts and sentence accuracy.
pub fn list_lessons<M: StorageMedium, O: Write>(
    course: &Course,
    store: &ProgressStore<M>,
    out: &mut O,
) -> Result<()> {
    if let Some(description) = &course.metadata.description {
        writeln!(out, "{description}")?;
    }
    let summary = course.summary();
    writeln!(
        out,
        "{} lessons, {} words, {} sentences",
        summary.lessons, summary.words, summary.sentences
    )?;

    for lesson in &course.lessons {
        let key = progress_key(lesson, ItemKind::Sentences);
        let stats = store.get_stats(&key, lesson.sentences.len());
        let accuracy = if store.counter(&key).is_none() {
            "-".to_string()
        } else {
            format!("{:.0}%", stats.accuracy)
        };
        writeln!(
            out,
            "{:>3}. {} ({} words, {} sentences) {}",
            lesson.number,
            lesson.title,
            lesson.words.len(),
            lesson.sentences.len(),
            accuracy
        )?;
    }
    Ok(())
}
