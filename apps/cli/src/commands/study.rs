//! `study`: run a prompt loop over one lesson.

use anyhow::{Context, Result};
use drill_core::{
    Course, Direction, EffectiveSettings, ItemKind, ItemScheduler, MatchSettings, ProgressStore,
    StorageMedium,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};

use super::progress_key;
use crate::session::{Session, SessionOptions, SessionSummary};

#[derive(Debug, Clone, Default)]
pub struct StudyArgs {
    /// Lesson title or number.
    pub lesson: String,
    pub kind: ItemKind,
    pub direction: Direction,
    pub multiple_choice: bool,
    pub limit: Option<usize>,
    /// Fixed RNG seed, for reproducible sessions.
    pub seed: Option<u64>,
}

pub fn study_lesson<M, I, O>(
    course: &Course,
    args: &StudyArgs,
    global: &MatchSettings,
    store: &mut ProgressStore<M>,
    input: &mut I,
    out: &mut O,
) -> Result<SessionSummary>
where
    M: StorageMedium,
    I: BufRead,
    O: Write,
{
    let lesson = course.find_lesson(&args.lesson)?;
    let items = lesson.items(args.kind).to_vec();
    let settings = EffectiveSettings::merge(global, lesson.settings.as_ref());

    let (scheduler_rng, choice_rng) = match args.seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };
    let scheduler = ItemScheduler::with_rng(items, scheduler_rng)
        .with_context(|| format!("lesson {} has no {:?} to study", lesson.title, args.kind))?;

    tracing::info!(
        lesson = %lesson.title,
        kind = ?args.kind,
        direction = args.direction.as_str(),
        "starting session"
    );
    writeln!(out, "Lesson {}: {}", lesson.number, lesson.title)?;

    let options = SessionOptions {
        direction: args.direction,
        multiple_choice: args.multiple_choice,
        limit: args.limit,
    };
    let key = progress_key(lesson, args.kind);
    let mut session = Session::new(scheduler, store, key, settings, options, choice_rng);
    session.run(input, out)
}
