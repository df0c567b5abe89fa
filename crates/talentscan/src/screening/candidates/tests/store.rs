use super::common::*;
use crate::screening::candidates::domain::CandidateId;
use crate::screening::candidates::storage::{MemoryStorage, StorageAdapter};
use crate::screening::candidates::store::{ResultsStore, StoreError};

#[test]
fn initialize_loads_persisted_history() {
    let history = vec![record("Ada Lovelace", "Software Engineer", 0.6)];
    let storage = MemoryStorage::with_records(history.clone());
    let store = ResultsStore::new(storage);

    assert_eq!(store.initialize(), history);
    assert_eq!(store.snapshot(), history);
}

#[test]
fn initialize_recovers_from_unreadable_history() {
    let store = ResultsStore::new(MalformedStorage);
    assert!(store.initialize().is_empty());
    assert!(store.snapshot().is_empty());
}

#[test]
fn append_merges_and_persists() {
    let storage = MemoryStorage::new();
    let store = ResultsStore::new(storage.clone());

    let first = vec![record("Ada Lovelace", "Software Engineer", 0.6)];
    let second = vec![
        record("Grace Hopper", "Data Scientist", 0.3),
        record("Joan Clarke", "Project Manager", 0.2),
    ];

    let after_first = store.append(first.clone()).expect("first append");
    assert_eq!(after_first, first);

    let after_second = store.append(second.clone()).expect("second append");
    assert_eq!(after_second.len(), 3);
    assert_eq!(&after_second[..1], &first[..]);
    assert_eq!(&after_second[1..], &second[..]);

    // The adapter holds the same merged list the store reports.
    assert_eq!(storage.load().expect("load"), after_second);
}

#[test]
fn appending_batches_separately_equals_appending_them_merged() {
    let first = vec![record("Ada Lovelace", "Software Engineer", 0.6)];
    let second = vec![record("Grace Hopper", "Data Scientist", 0.3)];

    let split = ResultsStore::new(MemoryStorage::new());
    split.append(first.clone()).expect("append first");
    split.append(second.clone()).expect("append second");

    let merged = ResultsStore::new(MemoryStorage::new());
    let mut both = first;
    both.extend(second);
    merged.append(both).expect("append merged");

    assert_eq!(split.snapshot(), merged.snapshot());
}

#[test]
fn clear_all_empties_memory_and_storage() {
    let storage = MemoryStorage::new();
    let store = ResultsStore::new(storage.clone());
    store
        .append(vec![record("Ada Lovelace", "Software Engineer", 0.6)])
        .expect("append");

    store.clear_all().expect("clear");

    assert!(store.snapshot().is_empty());
    assert!(storage.load().expect("load").is_empty());
}

#[test]
fn replace_all_installs_the_given_list() {
    let storage = MemoryStorage::new();
    let store = ResultsStore::new(storage.clone());
    store
        .append(vec![record("Old Entry", "Clerk", 0.2)])
        .expect("append");

    let replacement = vec![
        record("Ada Lovelace", "Software Engineer", 0.6),
        record("Grace Hopper", "Data Scientist", 0.3),
    ];
    let installed = store
        .replace_all(replacement.clone())
        .expect("replace succeeds");

    assert_eq!(installed, replacement);
    assert_eq!(store.snapshot(), replacement);
    assert_eq!(storage.load().expect("load"), replacement);
}

#[test]
fn remove_by_id_removes_exactly_one_record() {
    let storage = MemoryStorage::new();
    let store = ResultsStore::new(storage.clone());
    let records = vec![
        record("Ada Lovelace", "Software Engineer", 0.6),
        record("Grace Hopper", "Data Scientist", 0.3),
    ];
    store.append(records.clone()).expect("append");

    let remaining = store.remove_by_id(&records[0].id).expect("remove");

    assert_eq!(remaining, vec![records[1].clone()]);
    assert_eq!(storage.load().expect("load"), remaining);
}

#[test]
fn remove_by_id_rejects_unknown_ids_without_touching_state() {
    let storage = MemoryStorage::new();
    let store = ResultsStore::new(storage.clone());
    let records = vec![record("Ada Lovelace", "Software Engineer", 0.6)];
    store.append(records.clone()).expect("append");

    let missing = CandidateId("missing".to_string());
    match store.remove_by_id(&missing) {
        Err(StoreError::UnknownCandidate(id)) => assert_eq!(id, missing),
        other => panic!("expected unknown candidate error, got {other:?}"),
    }

    assert_eq!(store.snapshot(), records);
    assert_eq!(storage.load().expect("load"), records);
}

#[test]
fn remove_at_removes_positionally() {
    let store = ResultsStore::new(MemoryStorage::new());
    let records = vec![
        record("Ada Lovelace", "Software Engineer", 0.6),
        record("Grace Hopper", "Data Scientist", 0.3),
        record("Joan Clarke", "Project Manager", 0.2),
    ];
    store.append(records.clone()).expect("append");

    let remaining = store.remove_at(1).expect("remove middle");

    assert_eq!(remaining, vec![records[0].clone(), records[2].clone()]);
}

#[test]
fn remove_at_reports_out_of_range_indexes() {
    let store = ResultsStore::new(MemoryStorage::new());
    store
        .append(vec![record("Ada Lovelace", "Software Engineer", 0.6)])
        .expect("append");

    match store.remove_at(3) {
        Err(StoreError::IndexOutOfBounds { index: 3, len: 1 }) => {}
        other => panic!("expected out of bounds error, got {other:?}"),
    }
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn failed_save_leaves_memory_at_the_previous_state() {
    let store = ResultsStore::new(FailingStorage);

    let result = store.append(vec![record("Ada Lovelace", "Software Engineer", 0.6)]);

    assert!(result.is_err());
    assert!(store.snapshot().is_empty());
}
