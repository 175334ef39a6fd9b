//! Multiple-choice option generation.

use crate::types::{DrillItem, Language, TextVariant};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Wrong options offered alongside the correct answer.
pub const DISTRACTOR_COUNT: usize = 4;

/// Shuffled options with the position of the correct one.
#[derive(Debug, Clone, Serialize)]
pub struct MultipleChoice {
    pub options: Vec<TextVariant>,
    pub correct_index: usize,
}

impl MultipleChoice {
    /// True when the lesson had too few distinct answers for a full set.
    /// Hosts should fall back to typed answers in that case.
    pub fn is_degenerate(&self) -> bool {
        self.options.len() < DISTRACTOR_COUNT + 1
    }

    pub fn correct(&self) -> &TextVariant {
        &self.options[self.correct_index]
    }
}

/// Build options for `correct` from the other items of its lesson.
///
/// Distractors are the distinct `language` primary texts other than the
/// correct one, sampled uniformly without replacement. Sampling is over
/// texts, not items: a text shared by several items is as likely as any
/// other. With fewer than [`DISTRACTOR_COUNT`] eligible texts the result is
/// shorter; it is never padded.
pub fn multiple_choice<R: Rng>(
    correct: &DrillItem,
    items: &[DrillItem],
    language: Language,
    rng: &mut R,
) -> MultipleChoice {
    let answer = correct.text(language);

    let mut seen = HashSet::new();
    seen.insert(answer.primary());
    let eligible: Vec<&TextVariant> = items
        .iter()
        .map(|item| item.text(language))
        .filter(|text| seen.insert(text.primary()))
        .collect();

    let mut options: Vec<TextVariant> = eligible
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|text| (*text).clone())
        .collect();
    options.shuffle(rng);

    // Uniform insertion into a uniform shuffle is a uniform permutation.
    let correct_index = rng.gen_range(0..=options.len());
    options.insert(correct_index, answer.clone());

    MultipleChoice {
        options,
        correct_index,
    }
}
