//! Per-subject measurement history and the store that owns it.
//!
//! Histories are append-only: records are never removed or mutated, and
//! there is no eviction within process lifetime. Appends may arrive out
//! of timestamp order; evaluators that need monotonic time re-sort the
//! window they query, so the history itself only guarantees stable
//! insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::record::{MeasurementRecord, SubjectId};

/// Ordered, queryable collection of records for exactly one subject.
#[derive(Debug, Default)]
pub struct SubjectHistory {
    records: Vec<MeasurementRecord>,
}

impl SubjectHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. O(1) amortized.
    ///
    /// Timestamp order is preserved only if the caller appends in
    /// non-decreasing timestamp order; out-of-order appends are allowed.
    pub fn append(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    /// Records with `from <= timestamp_ms <= to`, in insertion order.
    ///
    /// Returns an empty vector (not an error) when nothing matches,
    /// including when `from > to`.
    pub fn query(&self, from: i64, to: i64) -> Vec<MeasurementRecord> {
        self.records
            .iter()
            .filter(|r| r.timestamp_ms >= from && r.timestamp_ms <= to)
            .cloned()
            .collect()
    }

    /// All retained records, in insertion order.
    pub fn all(&self) -> Vec<MeasurementRecord> {
        self.records.clone()
    }

    /// The most recently appended record, if any.
    pub fn latest(&self) -> Option<&MeasurementRecord> {
        self.records.last()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Store of subject histories, keyed by subject id.
///
/// Constructed explicitly and passed down to whatever composes the
/// system; there is no process-wide instance. Each subject's history
/// sits behind its own lock, so one appender and any number of readers
/// of the same subject never observe a torn record, and operations on
/// different subjects need no coordination.
#[derive(Debug, Default)]
pub struct SubjectStore {
    subjects: RwLock<HashMap<SubjectId, Arc<RwLock<SubjectHistory>>>>,
}

impl SubjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its subject's history, creating the history
    /// on first sight of the subject.
    pub fn append(&self, record: MeasurementRecord) {
        let history = self.history(record.subject_id);
        history.write().append(record);
    }

    /// Handle to one subject's history, created if absent.
    pub fn history(&self, subject_id: SubjectId) -> Arc<RwLock<SubjectHistory>> {
        if let Some(history) = self.subjects.read().get(&subject_id) {
            return Arc::clone(history);
        }
        let mut subjects = self.subjects.write();
        Arc::clone(subjects.entry(subject_id).or_default())
    }

    /// Records for a subject within `[from, to]`, empty when the subject
    /// is unknown.
    pub fn query(&self, subject_id: SubjectId, from: i64, to: i64) -> Vec<MeasurementRecord> {
        match self.subjects.read().get(&subject_id) {
            Some(history) => history.read().query(from, to),
            None => Vec::new(),
        }
    }

    /// The full retained window for a subject, empty when unknown.
    pub fn full_window(&self, subject_id: SubjectId) -> Vec<MeasurementRecord> {
        match self.subjects.read().get(&subject_id) {
            Some(history) => history.read().all(),
            None => Vec::new(),
        }
    }

    /// All known subject ids, ascending for deterministic iteration.
    pub fn subject_ids(&self) -> Vec<SubjectId> {
        let mut ids: Vec<SubjectId> = self.subjects.read().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of subjects with at least one record.
    pub fn subject_count(&self) -> usize {
        self.subjects.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::MeasurementKind;

    fn make_record(subject: u32, value: f64, ts: i64) -> MeasurementRecord {
        MeasurementRecord::new(subject, MeasurementKind::Saturation, value, ts)
    }

    #[test]
    fn empty_history() {
        let history = SubjectHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.query(0, i64::MAX).is_empty());
    }

    #[test]
    fn query_bounds_are_inclusive() {
        let mut history = SubjectHistory::new();
        history.append(make_record(1, 95.0, 100));
        history.append(make_record(1, 96.0, 200));
        history.append(make_record(1, 97.0, 300));

        let window = history.query(100, 300);
        assert_eq!(window.len(), 3);

        let window = history.query(101, 299);
        assert_eq!(window.len(), 1);
        assert!((window[0].value - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn inverted_range_is_empty_not_error() {
        let mut history = SubjectHistory::new();
        history.append(make_record(1, 95.0, 100));
        assert!(history.query(500, 100).is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut history = SubjectHistory::new();
        history.append(make_record(1, 1.0, 100));
        history.append(make_record(1, 2.0, 100));
        history.append(make_record(1, 3.0, 100));

        let window = history.query(100, 100);
        let values: Vec<f64> = window.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn out_of_order_append_is_permitted() {
        let mut history = SubjectHistory::new();
        history.append(make_record(1, 1.0, 300));
        history.append(make_record(1, 2.0, 100));
        assert_eq!(history.len(), 2);
        // Query preserves insertion order, not timestamp order.
        let window = history.query(0, 1000);
        assert_eq!(window[0].timestamp_ms, 300);
    }

    #[test]
    fn store_routes_by_subject() {
        let store = SubjectStore::new();
        store.append(make_record(1, 95.0, 100));
        store.append(make_record(2, 90.0, 100));
        store.append(make_record(1, 96.0, 200));

        assert_eq!(store.subject_count(), 2);
        assert_eq!(store.full_window(SubjectId::new(1)).len(), 2);
        assert_eq!(store.full_window(SubjectId::new(2)).len(), 1);
    }

    #[test]
    fn unknown_subject_queries_empty() {
        let store = SubjectStore::new();
        assert!(store.query(SubjectId::new(99), 0, i64::MAX).is_empty());
        assert!(store.full_window(SubjectId::new(99)).is_empty());
    }

    #[test]
    fn subject_ids_are_sorted() {
        let store = SubjectStore::new();
        store.append(make_record(3, 1.0, 0));
        store.append(make_record(1, 1.0, 0));
        store.append(make_record(2, 1.0, 0));
        let ids: Vec<u32> = store.subject_ids().iter().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn concurrent_append_and_read() {
        let store = Arc::new(SubjectStore::new());
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..1000 {
                    store.append(make_record(1, 95.0, i));
                }
            })
        };
        // Readers must never observe a torn record.
        for _ in 0..100 {
            for record in store.full_window(SubjectId::new(1)) {
                assert!((record.value - 95.0).abs() < f64::EPSILON);
            }
        }
        writer.join().unwrap();
        assert_eq!(store.full_window(SubjectId::new(1)).len(), 1000);
    }
}
