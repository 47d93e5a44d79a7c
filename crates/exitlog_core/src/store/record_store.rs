//! Ordered record store with monotonic id allocation.
//!
//! # Responsibility
//! - Append, remove and list records in insertion order.
//! - Provide name substring and exact date filters.
//!
//! # Invariants
//! - Ids are strictly increasing in issue order, including across hydration.
//! - Stored records are never mutated in place.

use crate::model::record::{NewRecord, Record, RecordId};
use log::{debug, warn};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for id allocation.
pub trait IdClock {
    /// Returns current Unix time in milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall-clock id source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl IdClock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Ordered in-memory collection of exit records.
pub struct RecordStore {
    records: Vec<Record>,
    last_id: RecordId,
    clock: Box<dyn IdClock>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Creates an empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty store with a caller-provided id clock.
    pub fn with_clock(clock: impl IdClock + 'static) -> Self {
        Self {
            records: Vec::new(),
            last_id: 0,
            clock: Box::new(clock),
        }
    }

    /// Replaces store contents with previously persisted records.
    ///
    /// Duplicate ids keep their first occurrence. The id allocator is moved
    /// past the largest loaded id so new records never collide.
    pub fn hydrate(&mut self, records: Vec<Record>) {
        let mut seen = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        let mut dropped = 0usize;

        for record in records {
            if seen.insert(record.id) {
                kept.push(record);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(
                "event=store_hydrate module=store status=degraded dropped_duplicates={}",
                dropped
            );
        }

        self.last_id = kept.iter().map(|record| record.id).max().unwrap_or(0);
        self.records = kept;
        debug!(
            "event=store_hydrate module=store status=ok count={}",
            self.records.len()
        );
    }

    /// Appends a new record built from `candidate` and returns it.
    ///
    /// # Contract
    /// - Id is the clock value, or `last_id + 1` when the clock has not
    ///   advanced past the last issued id.
    /// - Missing name/reason are defaulted by [`NewRecord::into_record`].
    pub fn add(&mut self, candidate: NewRecord) -> Record {
        let id = self.next_id();
        let record = candidate.into_record(id);
        self.records.push(record.clone());
        record
    }

    /// Removes the record with `id`. Returns `false` when absent.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }

    /// Returns all records in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring search on `name`.
    ///
    /// An empty needle matches every record.
    pub fn find_by_name(&self, needle: &str) -> Vec<Record> {
        self.find_by_name_with(needle, true)
    }

    /// Substring search on `name` with explicit case handling.
    pub fn find_by_name_with(&self, needle: &str, case_insensitive: bool) -> Vec<Record> {
        if case_insensitive {
            let needle = needle.to_lowercase();
            self.records
                .iter()
                .filter(|record| record.name.to_lowercase().contains(needle.as_str()))
                .cloned()
                .collect()
        } else {
            self.records
                .iter()
                .filter(|record| record.name.contains(needle))
                .cloned()
                .collect()
        }
    }

    /// Exact match on `date`.
    pub fn find_by_date(&self, date: &str) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    fn next_id(&mut self) -> RecordId {
        let now = self.clock.now_millis();
        if now > self.last_id {
            self.last_id = now;
            return now;
        }

        match self.last_id.checked_add(1) {
            Some(id) => {
                self.last_id = id;
                id
            }
            // `last_id` stays pinned at `i64::MAX`; later adds land here too.
            None => self.free_id_below_range(),
        }
    }

    /// Picks an id outside the live range once the upper end is exhausted.
    fn free_id_below_range(&self) -> RecordId {
        let live = self
            .records
            .iter()
            .map(|record| record.id)
            .collect::<HashSet<_>>();
        let id = match live.iter().min().and_then(|min| min.checked_sub(1)) {
            Some(id) => id,
            None => (0..)
                .find(|candidate| !live.contains(candidate))
                .unwrap_or(RecordId::MIN),
        };
        warn!(
            "event=store_add module=store status=degraded reason=id_space_exhausted record_id={}",
            id
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{IdClock, RecordStore};
    use crate::model::record::NewRecord;
    use std::collections::HashSet;

    struct FrozenClock(i64);

    impl IdClock for FrozenClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn same_instant_adds_get_incremented_ids() {
        let mut store = RecordStore::with_clock(FrozenClock(1_000));
        let first = store.add(NewRecord::new("2024-01-01", "08:00"));
        let second = store.add(NewRecord::new("2024-01-01", "08:05"));
        let third = store.add(NewRecord::new("2024-01-01", "08:10"));

        assert_eq!(first.id, 1_000);
        assert_eq!(second.id, 1_001);
        assert_eq!(third.id, 1_002);
    }

    #[test]
    fn exhausted_id_space_still_issues_unique_ids() {
        let mut store = RecordStore::with_clock(FrozenClock(1_000));
        store.hydrate(vec![NewRecord::new("2024-01-01", "08:00").into_record(i64::MAX)]);

        let first = store.add(NewRecord::new("2024-01-02", "08:00"));
        let second = store.add(NewRecord::new("2024-01-03", "08:00"));

        let ids = store.list().iter().map(|r| r.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 3);
        assert_ne!(first.id, i64::MAX);
        assert_ne!(second.id, i64::MAX);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn clock_behind_last_id_still_advances() {
        let mut store = RecordStore::with_clock(FrozenClock(5));
        store.hydrate(vec![NewRecord::new("2024-01-01", "08:00").into_record(50)]);

        let added = store.add(NewRecord::new("2024-01-02", "08:00"));
        assert_eq!(added.id, 51);
    }
}
