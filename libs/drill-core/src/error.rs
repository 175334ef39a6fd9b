//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using LessonError.
pub type Result<T> = std::result::Result<T, LessonError>;

/// Errors that can occur while loading course content.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("invalid course JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("course has no lessons")]
    EmptyCourse,

    #[error("lesson {lesson} has no items")]
    EmptyLesson { lesson: String },

    #[error("empty text in lesson {lesson}, entry {entry}")]
    EmptyText { lesson: String, entry: usize },

    #[error("duplicate item ID {id} in lesson {lesson}")]
    DuplicateId { id: String, lesson: String },

    #[error("duplicate lesson {0}")]
    DuplicateLesson(String),

    #[error("lesson not found: {0}")]
    LessonNotFound(String),
}

/// Errors raised by the item scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("cannot schedule an empty lesson")]
    EmptyLesson,
}

/// Errors raised by the progress store and its storage media.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
