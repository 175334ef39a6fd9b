//! Line-based study session.

use anyhow::Result;
use drill_core::{
    multiple_choice, verify, Direction, DrillItem, EffectiveSettings, ItemScheduler,
    MultipleChoice, ProgressStore, StorageMedium,
};
use rand::Rng;
use std::io::{BufRead, Write};

const QUIT: &str = ":q";

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub direction: Direction,
    /// Offer numbered options instead of free typing.
    pub multiple_choice: bool,
    /// Stop after this many answers.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub correct: usize,
}

/// One lesson session: scheduler state plus the store it records into.
pub struct Session<'a, M, R> {
    scheduler: ItemScheduler<R>,
    store: &'a mut ProgressStore<M>,
    progress_key: String,
    settings: EffectiveSettings,
    options: SessionOptions,
    rng: R,
}

impl<'a, M: StorageMedium, R: Rng> Session<'a, M, R> {
    pub fn new(
        scheduler: ItemScheduler<R>,
        store: &'a mut ProgressStore<M>,
        progress_key: impl Into<String>,
        settings: EffectiveSettings,
        options: SessionOptions,
        rng: R,
    ) -> Self {
        Self {
            scheduler,
            store,
            progress_key: progress_key.into(),
            settings,
            options,
            rng,
        }
    }

    /// Prompt until the learner quits, input ends, or the limit is reached.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        out: &mut O,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let direction = self.options.direction;
        let mut pass = self.scheduler.pass();

        loop {
            if self.options.limit.is_some_and(|limit| summary.answered >= limit) {
                break;
            }

            let item = self.scheduler.next().clone();
            if self.scheduler.pass() != pass {
                pass = self.scheduler.pass();
                writeln!(out, "-- pass {pass} --")?;
            }

            let progress = self.scheduler.progress();
            writeln!(
                out,
                "[{}/{}] {}",
                progress.completed,
                progress.total,
                item.prompt(direction)
            )?;

            let choice = self.options_for(&item);
            if let Some(choice) = &choice {
                for (idx, option) in choice.options.iter().enumerate() {
                    writeln!(out, "  {}) {}", idx + 1, option)?;
                }
            }
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let answer = line.trim();
            if answer.is_empty() || answer == QUIT {
                break;
            }

            let correct = judge(answer, choice.as_ref(), &item, direction, &self.settings);
            self.scheduler.record_outcome(&item.id, correct);
            self.store.record_answer(&self.progress_key, correct);
            self.store.flush()?;

            summary.answered += 1;
            if correct {
                summary.correct += 1;
                writeln!(out, "✓ correct")?;
            } else {
                writeln!(out, "✗ expected: {}", item.expected(direction))?;
            }
            tracing::debug!(item = %item.id, correct, "answer recorded");
        }

        writeln!(out, "{} of {} correct", summary.correct, summary.answered)?;
        Ok(summary)
    }

    fn options_for(&mut self, item: &DrillItem) -> Option<MultipleChoice> {
        if !self.options.multiple_choice {
            return None;
        }
        let language = self.options.direction.answer_language();
        let choice = multiple_choice(item, self.scheduler.items(), language, &mut self.rng);
        if choice.is_degenerate() {
            tracing::debug!(item = %item.id, "too few distinct answers, using typed mode");
            return None;
        }
        Some(choice)
    }
}

/// Accept an option number in choice mode, otherwise verify the typed text.
fn judge(
    answer: &str,
    choice: Option<&MultipleChoice>,
    item: &DrillItem,
    direction: Direction,
    settings: &EffectiveSettings,
) -> bool {
    if let Some(choice) = choice {
        if let Ok(number) = answer.parse::<usize>() {
            return number.checked_sub(1) == Some(choice.correct_index);
        }
    }
    verify(answer, item.expected(direction), settings).is_correct
}
