//! Core types for the drill library.

use crate::error::LessonError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text with one or more interchangeable accepted spellings.
///
/// The primary form is always member 0 and is the only form shown to the
/// learner. Matching accepts any member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawText", into = "RawText")]
pub struct TextVariant {
    primary: String,
    alternatives: Vec<String>,
}

impl TextVariant {
    /// Create a variant with no alternatives.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alternatives: Vec::new(),
        }
    }

    /// Create a variant with additional accepted spellings.
    pub fn with_alternatives<I, S>(primary: impl Into<String>, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary: primary.into(),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from an ordered member list. Returns None for an empty list.
    pub fn from_members(members: Vec<String>) -> Option<Self> {
        let mut members = members.into_iter();
        let primary = members.next()?;
        Some(Self {
            primary,
            alternatives: members.collect(),
        })
    }

    /// The display form.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Accepted spellings other than the primary.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// All accepted spellings, primary first.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.alternatives.iter().map(String::as_str))
    }

    /// Number of accepted spellings (always at least 1).
    pub fn len(&self) -> usize {
        1 + self.alternatives.len()
    }

    /// A variant always holds its primary, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for TextVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)
    }
}

impl From<&str> for TextVariant {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Wire form: a plain string or a non-empty array of strings.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawText {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawText> for TextVariant {
    type Error = String;

    fn try_from(raw: RawText) -> Result<Self, Self::Error> {
        match raw {
            RawText::One(s) => Ok(Self::new(s)),
            RawText::Many(members) => {
                Self::from_members(members).ok_or_else(|| "text list must not be empty".to_string())
            }
        }
    }
}

impl From<TextVariant> for RawText {
    fn from(v: TextVariant) -> Self {
        if v.alternatives.is_empty() {
            RawText::One(v.primary)
        } else {
            let mut members = Vec::with_capacity(v.alternatives.len() + 1);
            members.push(v.primary);
            members.extend(v.alternatives);
            RawText::Many(members)
        }
    }
}

/// Stable identifier of a drill item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Language slot of a drill item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Serbian,
}

/// Which slot is prompted and which is expected as the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EnglishToSerbian,
    SerbianToEnglish,
}

impl Default for Direction {
    fn default() -> Self {
        Self::EnglishToSerbian
    }
}

impl Direction {
    pub fn prompt_language(self) -> Language {
        match self {
            Self::EnglishToSerbian => Language::English,
            Self::SerbianToEnglish => Language::Serbian,
        }
    }

    pub fn answer_language(self) -> Language {
        match self {
            Self::EnglishToSerbian => Language::Serbian,
            Self::SerbianToEnglish => Language::English,
        }
    }

    /// Get the direction name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnglishToSerbian => "en-sr",
            Self::SerbianToEnglish => "sr-en",
        }
    }

    /// Parse from a short name such as `en-sr`.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "en-sr" => Some(Self::EnglishToSerbian),
            "sr-en" => Some(Self::SerbianToEnglish),
            _ => None,
        }
    }
}

/// A single translation pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillItem {
    pub id: ItemId,
    pub english: TextVariant,
    pub serbian: TextVariant,
}

impl DrillItem {
    pub fn new(id: impl Into<String>, english: TextVariant, serbian: TextVariant) -> Self {
        Self {
            id: ItemId::new(id),
            english,
            serbian,
        }
    }

    /// Text in the given language slot.
    pub fn text(&self, language: Language) -> &TextVariant {
        match language {
            Language::English => &self.english,
            Language::Serbian => &self.serbian,
        }
    }

    /// Text shown to the learner.
    pub fn prompt(&self, direction: Direction) -> &TextVariant {
        self.text(direction.prompt_language())
    }

    /// Text the learner's answer is checked against.
    pub fn expected(&self, direction: Direction) -> &TextVariant {
        self.text(direction.answer_language())
    }
}

/// Which item list of a lesson is drilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Sentences,
    Words,
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::Sentences
    }
}

/// A lesson with its vocabulary and sentence items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub number: u32,
    pub title: String,
    pub words: Vec<DrillItem>,
    pub sentences: Vec<DrillItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<LessonSettings>,
}

impl Lesson {
    pub fn items(&self, kind: ItemKind) -> &[DrillItem] {
        match kind {
            ItemKind::Sentences => &self.sentences,
            ItemKind::Words => &self.words,
        }
    }
}

/// Course-level metadata carried by the course file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lessons: Option<usize>,
}

/// Item totals across a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub lessons: usize,
    pub words: usize,
    pub sentences: usize,
}

/// A loaded course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub metadata: CourseMetadata,
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Find a lesson by exact title or by lesson number.
    pub fn find_lesson(&self, name: &str) -> Result<&Lesson, LessonError> {
        let number = name.trim().parse::<u32>().ok();
        self.lessons
            .iter()
            .find(|l| l.title == name || Some(l.number) == number)
            .ok_or_else(|| LessonError::LessonNotFound(name.to_string()))
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            lessons: self.lessons.len(),
            words: self.lessons.iter().map(|l| l.words.len()).sum(),
            sentences: self.lessons.iter().map(|l| l.sentences.len()).sum(),
        }
    }
}

/// Characters stripped from answers before comparison.
pub const DEFAULT_PUNCTUATION: &str = ".!?,;:…";

/// Global answer matching settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Retry with Cyrillic→Latin transliteration when the direct pass misses.
    pub script_fallback: bool,
    /// Level ijekavian spellings to ekavian before comparing.
    pub dialect_leveling: bool,
    pub punctuation: String,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            script_fallback: true,
            dialect_leveling: false,
            punctuation: DEFAULT_PUNCTUATION.to_string(),
        }
    }
}

/// Per-lesson overrides (all fields optional).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect_leveling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punctuation: Option<String>,
}

/// Effective settings (global merged with lesson overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub script_fallback: bool,
    pub dialect_leveling: bool,
    pub punctuation: String,
}

impl EffectiveSettings {
    /// Merge global settings with optional lesson settings.
    pub fn merge(global: &MatchSettings, lesson: Option<&LessonSettings>) -> Self {
        let lesson = lesson.cloned().unwrap_or_default();
        Self {
            script_fallback: lesson.script_fallback.unwrap_or(global.script_fallback),
            dialect_leveling: lesson.dialect_leveling.unwrap_or(global.dialect_leveling),
            punctuation: lesson
                .punctuation
                .unwrap_or_else(|| global.punctuation.clone()),
        }
    }
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::merge(&MatchSettings::default(), None)
    }
}
