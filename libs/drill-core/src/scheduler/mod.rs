//! Item scheduling for a lesson session.
//!
//! The pool starts as a shuffled copy of the lesson's items. A correct answer
//! drops the item for the rest of the pass; a wrong answer puts it back at a
//! uniformly random position. An exhausted pool is refilled with a fresh
//! shuffle, which starts a new pass.

pub mod choices;

use crate::error::SchedulerError;
use crate::types::{DrillItem, ItemId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Progress within the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassProgress {
    pub completed: usize,
    pub total: usize,
}

/// Session scheduler over a fixed master set of items.
#[derive(Debug)]
pub struct ItemScheduler<R = StdRng> {
    master: Vec<DrillItem>,
    pool: Vec<usize>,
    current: Option<usize>,
    pass: u32,
    rng: R,
}

impl ItemScheduler<StdRng> {
    /// Start a session with an entropy-seeded RNG.
    pub fn new(master: Vec<DrillItem>) -> Result<Self, SchedulerError> {
        Self::with_rng(master, StdRng::from_entropy())
    }
}

impl<R: Rng> ItemScheduler<R> {
    /// Start a session with the given RNG.
    pub fn with_rng(master: Vec<DrillItem>, rng: R) -> Result<Self, SchedulerError> {
        if master.is_empty() {
            return Err(SchedulerError::EmptyLesson);
        }

        let mut scheduler = Self {
            master,
            pool: Vec::new(),
            current: None,
            pass: 0,
            rng,
        };
        scheduler.refill();
        Ok(scheduler)
    }

    fn refill(&mut self) {
        self.pool = (0..self.master.len()).collect();
        self.pool.shuffle(&mut self.rng);
        self.pass += 1;
        tracing::debug!(pass = self.pass, items = self.pool.len(), "refilled pool");
    }

    /// The item to present next. It stays current until an outcome is recorded.
    pub fn next(&mut self) -> &DrillItem {
        if self.pool.is_empty() {
            self.refill();
        }
        let idx = self.pool[0];
        self.current = Some(idx);
        &self.master[idx]
    }

    /// Apply the outcome for the current item.
    ///
    /// Returns false (and changes nothing) when there is no current item or
    /// `id` is not the current item, e.g. a duplicate submit.
    pub fn record_outcome(&mut self, id: &ItemId, correct: bool) -> bool {
        let Some(idx) = self.current else {
            tracing::debug!(%id, "outcome without current item ignored");
            return false;
        };
        if self.master[idx].id != *id {
            tracing::debug!(%id, current = %self.master[idx].id, "outcome for stale item ignored");
            return false;
        }
        self.current = None;

        let Some(pos) = self.pool.iter().position(|&i| i == idx) else {
            return false;
        };
        self.pool.remove(pos);

        if !correct {
            let at = self.rng.gen_range(0..=self.pool.len());
            self.pool.insert(at, idx);
        }
        true
    }

    /// Items answered correctly in this pass, out of the lesson size.
    pub fn progress(&self) -> PassProgress {
        PassProgress {
            completed: self.master.len() - self.pool.len(),
            total: self.master.len(),
        }
    }

    /// The item awaiting an outcome, if any.
    pub fn current(&self) -> Option<&DrillItem> {
        self.current.map(|idx| &self.master[idx])
    }

    /// 1-based number of the current pass.
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Items still in the pool, in presentation order.
    pub fn remaining(&self) -> impl Iterator<Item = &DrillItem> {
        self.pool.iter().map(|&idx| &self.master[idx])
    }

    /// The lesson's full item set.
    pub fn items(&self) -> &[DrillItem] {
        &self.master
    }
}
