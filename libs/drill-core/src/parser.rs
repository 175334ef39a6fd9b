//! Course file loader.
//!
//! # Format
//! ```json
//! {
//!   "metadata": { "description": "A1 English-Serbian", "total_lessons": 1 },
//!   "lessons": [
//!     {
//!       "lesson_number": 1,
//!       "title": "Greetings",
//!       "words": [{ "english": "hello", "serbian": ["zdravo", "ćao"] }],
//!       "sentences": [{ "id": "greet-1", "english": "Good morning.", "serbian": "Dobro jutro." }]
//!     }
//!   ]
//! }
//! ```
//!
//! Text fields take a string or a list of accepted spellings (first is shown).
//! Entries without an `id` get `L{lesson}-S{n}` / `L{lesson}-W{n}`.

use crate::error::{LessonError, Result};
use crate::types::{Course, CourseMetadata, DrillItem, ItemId, Lesson, LessonSettings, TextVariant};
use serde::Deserialize;
use std::collections::HashSet;

/// Parse course JSON into lessons of drill items.
pub fn parse_course(content: &str) -> Result<Course> {
    let raw: RawCourse = serde_json::from_str(content)?;
    if raw.lessons.is_empty() {
        return Err(LessonError::EmptyCourse);
    }

    let lessons = raw
        .lessons
        .into_iter()
        .enumerate()
        .map(|(idx, lesson)| LessonBuilder::new(idx, lesson).build())
        .collect::<Result<Vec<_>>>()?;

    // Titles key stored progress; numbers select lessons.
    let mut seen_titles = HashSet::new();
    let mut seen_numbers = HashSet::new();
    for lesson in &lessons {
        if !seen_titles.insert(lesson.title.as_str()) {
            return Err(LessonError::DuplicateLesson(format!("title {:?}", lesson.title)));
        }
        if !seen_numbers.insert(lesson.number) {
            return Err(LessonError::DuplicateLesson(format!("number {}", lesson.number)));
        }
    }

    tracing::debug!(lessons = lessons.len(), "parsed course");
    Ok(Course {
        metadata: raw.metadata,
        lessons,
    })
}

#[derive(Deserialize)]
struct RawCourse {
    #[serde(default)]
    metadata: CourseMetadata,
    lessons: Vec<RawLesson>,
}

#[derive(Deserialize)]
struct RawLesson {
    #[serde(default)]
    lesson_number: Option<u32>,
    title: String,
    #[serde(default)]
    words: Vec<RawEntry>,
    #[serde(default)]
    sentences: Vec<RawEntry>,
    #[serde(default)]
    settings: Option<LessonSettings>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<RawId>,
    english: TextVariant,
    serbian: TextVariant,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

struct LessonBuilder {
    number: u32,
    raw: RawLesson,
    seen_ids: HashSet<ItemId>,
}

impl LessonBuilder {
    fn new(position: usize, raw: RawLesson) -> Self {
        let number = raw.lesson_number.unwrap_or(position as u32 + 1);
        Self {
            number,
            raw,
            seen_ids: HashSet::new(),
        }
    }

    fn build(mut self) -> Result<Lesson> {
        if self.raw.words.is_empty() && self.raw.sentences.is_empty() {
            return Err(LessonError::EmptyLesson {
                lesson: self.raw.title,
            });
        }

        let words = std::mem::take(&mut self.raw.words);
        let sentences = std::mem::take(&mut self.raw.sentences);
        let words = self.convert(words, 'W')?;
        let sentences = self.convert(sentences, 'S')?;

        Ok(Lesson {
            number: self.number,
            title: self.raw.title,
            words,
            sentences,
            settings: self.raw.settings,
        })
    }

    /// `tag` is the section letter used in derived ids.
    fn convert(&mut self, entries: Vec<RawEntry>, tag: char) -> Result<Vec<DrillItem>> {
        let mut items = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.into_iter().enumerate() {
            let entry_num = idx + 1;
            let blank = entry
                .english
                .members()
                .chain(entry.serbian.members())
                .any(|m| m.trim().is_empty());
            if blank {
                return Err(LessonError::EmptyText {
                    lesson: self.raw.title.clone(),
                    entry: entry_num,
                });
            }

            let id = match entry.id {
                Some(raw_id) => ItemId::new(raw_id.into_string()),
                None => ItemId::new(format!("L{}-{tag}{entry_num}", self.number)),
            };
            if !self.seen_ids.insert(id.clone()) {
                return Err(LessonError::DuplicateId {
                    id: id.to_string(),
                    lesson: self.raw.title.clone(),
                });
            }

            items.push(DrillItem {
                id,
                english: entry.english,
                serbian: entry.serbian,
            });
        }

        Ok(items)
    }
}
