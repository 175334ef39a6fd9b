//! Durable per-key outcome counters.
//!
//! Keys are opaque strings chosen by the host: an item id, or a lesson title
//! when stats are tracked per lesson. Switching schemes orphans old counters.

pub mod storage;

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storage::StorageMedium;

type Result<T> = std::result::Result<T, StoreError>;

/// Key under which the whole snapshot is stored in the medium.
pub const STORAGE_KEY: &str = "drill.progress";

/// Outcome counts for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeCounter {
    pub correct: u64,
    pub incorrect: u64,
    #[serde(default)]
    pub last_attempted: Option<DateTime<Utc>>,
}

impl OutcomeCounter {
    pub fn attempts(&self) -> u64 {
        self.correct.saturating_add(self.incorrect)
    }
}

/// Entire durable state; also the export file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lessons: BTreeMap<String, OutcomeCounter>,
}

/// Statistics for a single key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonStats {
    pub total_sentences: usize,
    pub correct_count: u64,
    pub incorrect_count: u64,
    pub accuracy: f64,
    pub last_attempted: Option<DateTime<Utc>>,
}

/// Statistics across every key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub keys_attempted: usize,
    pub correct_count: u64,
    pub incorrect_count: u64,
    pub accuracy: f64,
    pub last_attempted: Option<DateTime<Utc>>,
}

/// Summed in `f64`: imported counts may sit near `u64::MAX`.
fn accuracy(correct: u64, incorrect: u64) -> f64 {
    let attempts = correct as f64 + incorrect as f64;
    if attempts == 0.0 {
        0.0
    } else {
        correct as f64 / attempts * 100.0
    }
}

/// Progress store over an injected storage medium.
///
/// Answers are recorded in memory and persisted by [`ProgressStore::flush`].
/// Import and clear write through immediately.
#[derive(Debug)]
pub struct ProgressStore<M> {
    medium: M,
    state: Snapshot,
    dirty: bool,
}

impl<M: StorageMedium> ProgressStore<M> {
    /// Load the stored snapshot, starting empty if the medium has none.
    pub fn load(medium: M) -> Result<Self> {
        let state = match medium.read(STORAGE_KEY)? {
            Some(blob) => parse_snapshot(&blob)?,
            None => Snapshot::default(),
        };
        tracing::debug!(keys = state.lessons.len(), "loaded progress");
        Ok(Self {
            medium,
            state,
            dirty: false,
        })
    }

    /// Record one answer for `key` at the current time.
    pub fn record_answer(&mut self, key: &str, correct: bool) {
        self.record_answer_at(key, correct, Utc::now());
    }

    /// Record one answer for `key` at `now`.
    pub fn record_answer_at(&mut self, key: &str, correct: bool, now: DateTime<Utc>) {
        let counter = self.state.lessons.entry(key.to_string()).or_default();
        if correct {
            counter.correct = counter.correct.saturating_add(1);
        } else {
            counter.incorrect = counter.incorrect.saturating_add(1);
        }
        counter.last_attempted = Some(now);
        self.dirty = true;
    }

    /// Statistics for `key`; `total_items` is the size of the key's scope.
    pub fn get_stats(&self, key: &str, total_items: usize) -> LessonStats {
        let counter = self.state.lessons.get(key).cloned().unwrap_or_default();
        LessonStats {
            total_sentences: total_items,
            correct_count: counter.correct,
            incorrect_count: counter.incorrect,
            accuracy: accuracy(counter.correct, counter.incorrect),
            last_attempted: counter.last_attempted,
        }
    }

    /// Aggregate statistics over all keys.
    pub fn overall_stats(&self) -> OverallStats {
        let counters = self.state.lessons.values();
        let correct = counters
            .clone()
            .fold(0u64, |sum, c| sum.saturating_add(c.correct));
        let incorrect = counters
            .clone()
            .fold(0u64, |sum, c| sum.saturating_add(c.incorrect));
        OverallStats {
            keys_attempted: self.state.lessons.len(),
            correct_count: correct,
            incorrect_count: incorrect,
            accuracy: accuracy(correct, incorrect),
            last_attempted: counters.filter_map(|c| c.last_attempted).max(),
        }
    }

    pub fn counter(&self, key: &str) -> Option<&OutcomeCounter> {
        self.state.lessons.get(key)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    /// Whether recorded answers are waiting for [`ProgressStore::flush`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the in-memory state if it changed since the last write.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let blob = serde_json::to_string(&self.state)?;
        self.medium.write(STORAGE_KEY, &blob)?;
        self.dirty = false;
        tracing::debug!(keys = self.state.lessons.len(), "flushed progress");
        Ok(())
    }

    /// Serialize the entire state for saving as a user file.
    pub fn export_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    /// Replace the entire state with `data`.
    ///
    /// On any validation or storage failure the current state is kept.
    pub fn import_snapshot(&mut self, data: &str) -> Result<()> {
        let snapshot = parse_snapshot(data).map_err(|e| {
            tracing::warn!(error = %e, "rejected progress import");
            e
        })?;
        let blob = serde_json::to_string(&snapshot)?;
        self.medium.write(STORAGE_KEY, &blob)?;
        tracing::debug!(keys = snapshot.lessons.len(), "imported progress");
        self.state = snapshot;
        self.dirty = false;
        Ok(())
    }

    /// Erase all durable state.
    pub fn clear(&mut self) -> Result<()> {
        self.medium.remove(STORAGE_KEY)?;
        self.state = Snapshot::default();
        self.dirty = false;
        tracing::debug!("cleared progress");
        Ok(())
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }
}

/// Parse and validate a snapshot document.
fn parse_snapshot(data: &str) -> Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| StoreError::InvalidSnapshot(format!("not JSON: {e}")))?;

    let has_container = value
        .as_object()
        .and_then(|root| root.get("lessons"))
        .is_some_and(serde_json::Value::is_object);
    if !has_container {
        return Err(StoreError::InvalidSnapshot(
            "expected an object with a \"lessons\" object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| StoreError::InvalidSnapshot(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::storage::{FileStorage, MemoryStorage};
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap()
    }

    fn store() -> ProgressStore<MemoryStorage> {
        ProgressStore::load(MemoryStorage::new()).unwrap()
    }

    /// Medium whose writes always fail.
    #[derive(Default)]
    struct BrokenStorage {
        inner: MemoryStorage,
    }

    impl StorageMedium for BrokenStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }
    }

    #[test]
    fn counter_created_lazily() {
        let mut store = store();
        assert!(store.counter("Greetings").is_none());
        store.record_answer_at("Greetings", true, at(8));
        let counter = store.counter("Greetings").unwrap();
        assert_eq!(counter.correct, 1);
        assert_eq!(counter.incorrect, 0);
        assert_eq!(counter.last_attempted, Some(at(8)));
    }

    #[test]
    fn one_right_one_wrong_is_fifty_percent() {
        let mut store = store();
        store.record_answer("k", true);
        store.record_answer("k", false);
        let stats = store.get_stats("k", 12);
        assert_eq!(stats.accuracy, 50.0);
        assert_eq!(stats.total_sentences, 12);
        assert_eq!(stats.correct_count, 1);
        assert_eq!(stats.incorrect_count, 1);
    }

    #[test]
    fn stats_for_unknown_key_are_zero() {
        let store = store();
        let stats = store.get_stats("missing", 5);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.correct_count + stats.incorrect_count, 0);
        assert_eq!(stats.last_attempted, None);
        assert!(store.counter("missing").is_none());
    }

    #[test]
    fn rapid_updates_are_not_lost() {
        let mut store = store();
        for i in 0..1000 {
            store.record_answer("k", i % 4 != 0);
        }
        let counter = store.counter("k").unwrap();
        assert_eq!(counter.correct, 750);
        assert_eq!(counter.incorrect, 250);
    }

    #[test]
    fn overall_stats_aggregate_keys() {
        let mut store = store();
        store.record_answer_at("a", true, at(8));
        store.record_answer_at("a", true, at(9));
        store.record_answer_at("b", false, at(10));
        store.record_answer_at("c", true, at(7));

        let overall = store.overall_stats();
        assert_eq!(overall.keys_attempted, 3);
        assert_eq!(overall.correct_count, 3);
        assert_eq!(overall.incorrect_count, 1);
        assert_eq!(overall.accuracy, 75.0);
        assert_eq!(overall.last_attempted, Some(at(10)));
    }

    #[test]
    fn export_shape() {
        let mut store = store();
        store.record_answer_at("Greetings", false, at(8));
        let value: serde_json::Value =
            serde_json::from_str(&store.export_snapshot().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "lessons": {
                    "Greetings": {
                        "correct": 0,
                        "incorrect": 1,
                        "lastAttempted": "2026-10-17T08:00:00Z"
                    }
                }
            })
        );
    }

    #[test]
    fn import_of_export_is_a_noop() {
        let mut store = store();
        store.record_answer_at("a", true, at(8));
        store.record_answer_at("b", false, at(9));
        let before = store.snapshot().clone();

        let stats_before = store.get_stats("a", 1);

        let exported = store.export_snapshot().unwrap();
        store.import_snapshot(&exported).unwrap();
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.get_stats("a", 1), stats_before);
    }

    #[test]
    fn import_replaces_whole_state() {
        let mut store = store();
        store.record_answer("old", true);
        store
            .import_snapshot(r#"{"lessons": {"new": {"correct": 2, "incorrect": 1}}}"#)
            .unwrap();
        assert!(store.counter("old").is_none());
        assert_eq!(store.counter("new").unwrap().attempts(), 3);
        assert!(!store.is_dirty());
    }

    #[test]
    fn invalid_import_leaves_state_untouched() {
        let mut store = store();
        store.record_answer_at("kept", true, at(8));
        let before = store.snapshot().clone();

        for bad in [
            "not json",
            "[]",
            r#"{"progress": {}}"#,
            r#"{"lessons": []}"#,
            r#"{"lessons": {"x": {"correct": -1, "incorrect": 0}}}"#,
            r#"{"lessons": {"x": {"correct": "many"}}}"#,
        ] {
            let result = store.import_snapshot(bad);
            assert!(matches!(result, Err(StoreError::InvalidSnapshot(_))), "{bad}");
            assert_eq!(store.snapshot(), &before);
        }
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut store = ProgressStore::load(BrokenStorage::default()).unwrap();
        store.record_answer_at("kept", true, at(8));
        let before = store.snapshot().clone();

        let result = store.import_snapshot(r#"{"lessons": {}}"#);
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.snapshot(), &before);

        assert!(store.flush().is_err());
        assert!(store.is_dirty());
    }

    #[test]
    fn flush_persists_across_loads() {
        let mut store = store();
        store.record_answer_at("k", true, at(8));
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());

        let medium = store.medium().clone();
        let reloaded = ProgressStore::load(medium).unwrap();
        assert_eq!(reloaded.counter("k").unwrap().correct, 1);
    }

    #[test]
    fn unflushed_answers_are_not_persisted() {
        let mut store = store();
        store.record_answer("k", true);
        let reloaded = ProgressStore::load(store.medium().clone()).unwrap();
        assert!(reloaded.counter("k").is_none());
    }

    #[test]
    fn clear_erases_durable_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProgressStore::load(FileStorage::new(dir.path())).unwrap();
        store.record_answer("k", false);
        store.flush().unwrap();

        store.clear().unwrap();
        assert!(store.counter("k").is_none());
        let reloaded = ProgressStore::load(FileStorage::new(dir.path())).unwrap();
        assert_eq!(reloaded.overall_stats().keys_attempted, 0);
    }

    #[test]
    fn corrupt_medium_fails_to_load() {
        let mut medium = MemoryStorage::new();
        medium.write(STORAGE_KEY, "{oops").unwrap();
        assert!(matches!(
            ProgressStore::load(medium),
            Err(StoreError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn boundary_counts_do_not_overflow() {
        let mut store = store();
        store
            .import_snapshot(
                r#"{"lessons":{
                    "k":{"correct":18446744073709551615,"incorrect":1},
                    "j":{"correct":4294967295,"incorrect":0}
                }}"#,
            )
            .unwrap();

        let stats = store.get_stats("k", 1);
        assert!(stats.accuracy > 99.9 && stats.accuracy <= 100.0);

        store.record_answer("k", true);
        store.record_answer("j", true);
        assert_eq!(store.counter("k").unwrap().correct, u64::MAX);
        assert_eq!(store.counter("k").unwrap().attempts(), u64::MAX);
        assert_eq!(store.counter("j").unwrap().correct, 4_294_967_296);

        let overall = store.overall_stats();
        assert_eq!(overall.correct_count, u64::MAX);
        assert_eq!(overall.incorrect_count, 1);
        assert!(overall.accuracy > 99.9);
    }
}
