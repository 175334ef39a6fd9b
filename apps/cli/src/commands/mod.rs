//! Subcommand handlers.

pub mod backup;
pub mod lessons;
pub mod stats;
pub mod study;

use anyhow::{Context, Result};
use drill_core::{parse_course, Course, ItemKind, Lesson};
use std::fs;
use std::path::Path;

pub use backup::{clear_progress, export_progress, import_progress};
pub use lessons::list_lessons;
pub use stats::show_stats;
pub use study::{study_lesson, StudyArgs};

/// Read and parse a course file.
pub fn load_course(path: &Path) -> Result<Course> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read course file {}", path.display()))?;
    parse_course(&content).with_context(|| format!("invalid course file {}", path.display()))
}

/// Progress key for one lesson in one mode. Sentences use the bare title.
pub fn progress_key(lesson: &Lesson, kind: ItemKind) -> String {
    match kind {
        ItemKind::Sentences => lesson.title.clone(),
        ItemKind::Words => format!("{}#words", lesson.title),
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_COURSE: &str = r#"{
    "metadata": { "description": "Serbian basics" },
    "lessons": [
        {
            "lesson_number": 1,
            "title": "Greetings",
            "words": [
                { "english": "hello", "serbian": ["zdravo", "ćao"] },
                { "english": "yes", "serbian": "da" }
            ],
            "sentences": [
                { "id": "g1", "english": "Good morning.", "serbian": "Dobro jutro." }
            ]
        },
        {
            "lesson_number": 2,
            "title": "Numbers",
            "sentences": [
                { "english": "One.", "serbian": "Jedan." },
                { "english": "Two.", "serbian": "Dva." }
            ]
        }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn words_mode_has_own_key() {
        let course = parse_course(SAMPLE_COURSE).unwrap();
        let lesson = &course.lessons[0];
        assert_eq!(progress_key(lesson, ItemKind::Sentences), "Greetings");
        assert_eq!(progress_key(lesson, ItemKind::Words), "Greetings#words");
    }

    #[test]
    fn load_course_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(&path, "{").unwrap();
        let err = load_course(&path).unwrap_err();
        assert!(err.to_string().contains("course.json"));

        let missing = load_course(&dir.path().join("absent.json")).unwrap_err();
        assert!(missing.to_string().starts_with("failed to read course file"));
    }
}
