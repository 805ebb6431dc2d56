//! Unit tests for the SQLite-backed key-value storage.

#[path = "../common/mod.rs"]
mod common;

use collegefinder::services::local_storage::{keys, LocalStorageTrait};
use collegefinder::types::college::College;

use common::{college, memory_storage};

#[test]
fn test_missing_key_reads_as_none() {
    let storage = memory_storage();
    let value: Option<Vec<College>> = storage.get_item("nothing").unwrap();
    assert!(value.is_none());
}

#[test]
fn test_set_then_get_overwrites() {
    let storage = memory_storage();
    storage.set_item(keys::COMPARE_LIST, &vec![college("a", "A")]).unwrap();
    storage
        .set_item(keys::COMPARE_LIST, &vec![college("b", "B"), college("c", "C")])
        .unwrap();

    let list: Vec<College> = storage.get_item(keys::COMPARE_LIST).unwrap().unwrap();
    let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(storage.keys().unwrap(), vec![keys::COMPARE_LIST.to_string()]);
}

#[test]
fn test_remove_item_deletes_key() {
    let storage = memory_storage();
    storage.set_raw("k", "1").unwrap();
    storage.remove_item("k").unwrap();
    assert!(storage.get_raw("k").unwrap().is_none());
    // Removing again is not an error.
    storage.remove_item("k").unwrap();
}

#[test]
fn test_malformed_value_is_error_strict_and_none_lenient() {
    let storage = memory_storage();
    storage.set_raw(keys::DEADLINES, "{oops").unwrap();

    assert!(storage.get_item::<Vec<String>>(keys::DEADLINES).is_err());
    assert!(storage
        .get_item_lenient::<Vec<String>>(keys::DEADLINES)
        .unwrap()
        .is_none());
}

#[test]
fn test_user_scoped_keys_do_not_collide() {
    let storage = memory_storage();
    storage.set_item(&keys::favorites("u1"), &vec![college("a", "A")]).unwrap();
    storage.set_item(&keys::favorites("u2"), &Vec::<College>::new()).unwrap();

    let u1: Vec<College> = storage.get_item(&keys::favorites("u1")).unwrap().unwrap();
    let u2: Vec<College> = storage.get_item(&keys::favorites("u2")).unwrap().unwrap();
    assert_eq!(u1.len(), 1);
    assert!(u2.is_empty());
}
