//! Core drill library shared by host applications.
//!
//! Provides:
//! - Course JSON loader for English/Serbian lessons
//! - Item scheduler (shuffled pool with random requeue) and multiple-choice options
//! - Answer verification (normalization, Cyrillic transliteration, dialect leveling)
//! - Progress store with pluggable storage media and JSON snapshots
//! - Shared types (TextVariant, DrillItem, settings, stats)

pub mod error;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod scheduler;
pub mod types;

pub use error::{LessonError, SchedulerError, StoreError};
pub use matching::{is_correct, normalize, verify, MatchPass, MatchResult};
pub use parser::parse_course;
pub use progress::storage::{FileStorage, MemoryStorage, StorageMedium};
pub use progress::{
    LessonStats, OutcomeCounter, OverallStats, ProgressStore, Snapshot, STORAGE_KEY,
};
pub use scheduler::choices::{multiple_choice, MultipleChoice};
pub use scheduler::{ItemScheduler, PassProgress};
pub use types::{
    Course, CourseMetadata, CourseSummary, Direction, DrillItem, EffectiveSettings, ItemId,
    ItemKind, Language, Lesson, LessonSettings, MatchSettings, TextVariant,
};
