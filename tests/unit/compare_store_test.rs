//! Unit tests for the compare list.

#[path = "../common/mod.rs"]
mod common;

use collegefinder::managers::compare_store::{CompareAddOutcome, CompareStore, CompareStoreTrait, MAX_COMPARE};
use collegefinder::services::local_storage::{keys, LocalStorageTrait};
use collegefinder::types::college::College;

use common::{college, memory_storage};

#[test]
fn test_add_until_capacity() {
    let mut store = CompareStore::new(memory_storage()).unwrap();

    for id in ["a", "b", "c"] {
        assert_eq!(store.add(college(id, id)).unwrap(), CompareAddOutcome::Added);
    }
    assert_eq!(store.len(), MAX_COMPARE);

    assert_eq!(store.add(college("d", "d")).unwrap(), CompareAddOutcome::AtCapacity);
    assert!(!store.is_in_compare("d"));
}

#[test]
fn test_add_existing_is_already_present() {
    let mut store = CompareStore::new(memory_storage()).unwrap();
    store.add(college("a", "A")).unwrap();
    assert_eq!(store.add(college("a", "A")).unwrap(), CompareAddOutcome::AlreadyPresent);
    assert_eq!(store.len(), 1);
}

/// Capacity is checked before presence.
#[test]
fn test_full_list_reports_capacity_even_for_member() {
    let mut store = CompareStore::new(memory_storage()).unwrap();
    for id in ["a", "b", "c"] {
        store.add(college(id, id)).unwrap();
    }
    assert_eq!(store.add(college("a", "a")).unwrap(), CompareAddOutcome::AtCapacity);
}

#[test]
fn test_list_persists_across_instances() {
    let storage = memory_storage();
    {
        let mut store = CompareStore::new(storage.clone()).unwrap();
        store.add(college("a", "A")).unwrap();
        store.add(college("b", "B")).unwrap();
        store.remove("a").unwrap();
    }

    let store = CompareStore::new(storage).unwrap();
    let ids: Vec<&str> = store.list().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
}

#[test]
fn test_clear_deletes_key() {
    let storage = memory_storage();
    let mut store = CompareStore::new(storage.clone()).unwrap();
    store.add(college("a", "A")).unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    assert!(storage.get_raw(keys::COMPARE_LIST).unwrap().is_none());
}

#[test]
fn test_malformed_stored_list_is_ignored() {
    let storage = memory_storage();
    storage.set_raw(keys::COMPARE_LIST, "[{\"broken\":").unwrap();
    let store = CompareStore::new(storage).unwrap();
    assert!(store.is_empty());
}

/// An oversized or duplicated stored list is trimmed on hydrate.
#[test]
fn test_hydrate_enforces_bound_and_uniqueness() {
    let storage = memory_storage();
    let stored: Vec<College> = ["a", "a", "b", "c", "d"].iter().map(|id| college(id, id)).collect();
    storage.set_item(keys::COMPARE_LIST, &stored).unwrap();

    let store = CompareStore::new(storage).unwrap();
    let ids: Vec<&str> = store.list().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
