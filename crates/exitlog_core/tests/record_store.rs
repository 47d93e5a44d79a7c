use exitlog_core::{IdClock, NewRecord, RecordStore, DEFAULT_NAME, DEFAULT_REASON};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

/// Clock the test advances by hand.
#[derive(Clone)]
struct ManualClock(Rc<Cell<i64>>);

impl IdClock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}

fn store_at(millis: i64) -> (RecordStore, Rc<Cell<i64>>) {
    let time = Rc::new(Cell::new(millis));
    (RecordStore::with_clock(ManualClock(time.clone())), time)
}

fn ana() -> NewRecord {
    NewRecord::new("2024-01-01", "08:00")
        .with_name("Ana")
        .with_reason("Doctor")
}

#[test]
fn add_applies_defaults_and_preserves_order() {
    let (mut store, _) = store_at(100);

    let first = store.add(ana());
    let second = store.add(NewRecord::new("2024-01-01", "09:00"));

    assert_eq!(first.name, "Ana");
    assert_eq!(first.reason, "Doctor");
    assert_eq!(second.name, DEFAULT_NAME);
    assert_eq!(second.reason, DEFAULT_REASON);

    let ids = store.list().iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn ids_follow_clock_when_it_advances() {
    let (mut store, time) = store_at(1_000);

    let first = store.add(ana());
    time.set(5_000);
    let second = store.add(ana());

    assert_eq!(first.id, 1_000);
    assert_eq!(second.id, 5_000);
}

#[test]
fn ids_stay_unique_across_mixed_add_and_remove() {
    let (mut store, time) = store_at(10);

    let mut issued = HashSet::new();
    for step in 0..50 {
        if step % 7 == 0 {
            time.set(time.get() - 3);
        }
        let record = store.add(ana());
        assert!(issued.insert(record.id), "id {} issued twice", record.id);

        if step % 3 == 0 {
            assert!(store.remove(record.id));
        }

        let live = store.list().iter().map(|r| r.id).collect::<HashSet<_>>();
        assert_eq!(live.len(), store.len());
    }
}

#[test]
fn remove_absent_id_is_noop() {
    let (mut store, _) = store_at(1);
    let record = store.add(ana());

    assert!(!store.remove(record.id + 1));
    assert_eq!(store.len(), 1);

    assert!(store.remove(record.id));
    assert!(!store.remove(record.id));
    assert!(store.is_empty());
}

#[test]
fn find_by_name_is_case_insensitive_substring() {
    let (mut store, _) = store_at(1);
    store.add(ana());
    store.add(NewRecord::new("2024-01-02", "10:00").with_name("Mariana"));
    store.add(NewRecord::new("2024-01-02", "11:00").with_name("Luis"));

    let hits = store.find_by_name("ANA");
    let names = hits.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Ana", "Mariana"]);

    assert_eq!(store.find_by_name("").len(), 3);
    assert!(store.find_by_name("pedro").is_empty());
}

#[test]
fn find_by_name_can_be_case_sensitive() {
    let (mut store, _) = store_at(1);
    store.add(ana());
    store.add(NewRecord::new("2024-01-02", "10:00").with_name("Mariana"));

    let hits = store.find_by_name_with("An", false);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ana");
}

#[test]
fn find_by_date_is_exact() {
    let (mut store, _) = store_at(1);
    store.add(ana());
    store.add(NewRecord::new("2024-01-02", "10:00"));
    store.add(NewRecord::new("2024-01-01", "17:30"));

    let hits = store.find_by_date("2024-01-01");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|r| r.date == "2024-01-01"));
    assert!(store.find_by_date("2024-01").is_empty());
}

#[test]
fn removed_record_disappears_from_queries() {
    let (mut store, _) = store_at(1);
    let gone = store.add(ana());
    let kept = store.add(NewRecord::new("2024-01-01", "09:00").with_name("Ana"));

    store.remove(gone.id);

    assert!(store.get(gone.id).is_none());
    assert!(store.find_by_name("ana").iter().all(|r| r.id != gone.id));
    assert!(store.find_by_date("2024-01-01").iter().all(|r| r.id != gone.id));
    assert_eq!(store.get(kept.id), Some(&kept));
}

#[test]
fn hydrate_drops_duplicate_ids_and_advances_allocator() {
    let (mut store, _) = store_at(1);
    let first = ana().into_record(40);
    let duplicate = NewRecord::new("2024-02-02", "12:00").into_record(40);
    let other = NewRecord::new("2024-02-03", "12:00").into_record(90);

    store.hydrate(vec![first.clone(), duplicate, other.clone()]);

    assert_eq!(store.list(), &[first, other]);
    let added = store.add(ana());
    assert_eq!(added.id, 91);
}
