//! Unit tests for PreferencesStore: per-user records and browsing history.

#[path = "../common/mod.rs"]
mod common;

use collegefinder::managers::preferences_store::{now_ms, PreferencesStore, HISTORY_LIMIT, HISTORY_RETENTION_MS};
use collegefinder::services::local_storage::{keys, LocalStorageTrait};
use collegefinder::types::errors::PreferencesError;
use collegefinder::types::history::{BrowsingAction, BrowsingHistoryEntry};
use collegefinder::types::preferences::{BudgetRange, PreferencesPatch, UserPreferences};

use common::memory_storage;

fn complete_patch() -> PreferencesPatch {
    PreferencesPatch {
        preferred_courses: Some(vec!["B.Tech".to_string()]),
        preferred_states: Some(vec!["Maharashtra".to_string()]),
        ..Default::default()
    }
}

#[test]
fn test_mutations_without_user_fail() {
    let mut store = PreferencesStore::new(memory_storage());
    assert!(matches!(
        store.update_preferences(complete_patch()),
        Err(PreferencesError::NotSignedIn)
    ));
    assert!(matches!(
        store.add_to_browsing_history("c1", BrowsingAction::View, None),
        Err(PreferencesError::NotSignedIn)
    ));
    assert!(matches!(store.clear_browsing_history(), Err(PreferencesError::NotSignedIn)));
}

#[test]
fn test_update_merges_and_persists() {
    let storage = memory_storage();
    let mut store = PreferencesStore::new(storage.clone());
    store.set_user(Some("u1")).unwrap();

    store.update_preferences(complete_patch()).unwrap();
    store
        .update_preferences(PreferencesPatch {
            budget_range: Some(BudgetRange { min: 50_000, max: 300_000 }),
            ..Default::default()
        })
        .unwrap();

    let prefs = store.preferences();
    assert_eq!(prefs.preferred_courses, vec!["B.Tech".to_string()]);
    assert_eq!(prefs.budget_range.max, 300_000);
    assert!(store.is_preferences_complete());

    let stored: UserPreferences = storage.get_item(&keys::preferences("u1")).unwrap().unwrap();
    assert_eq!(&stored, store.preferences());
}

#[test]
fn test_completeness_tracks_each_field() {
    let mut store = PreferencesStore::new(memory_storage());
    store.set_user(Some("u1")).unwrap();
    assert!(!store.is_preferences_complete());

    store.update_preferences(complete_patch()).unwrap();
    assert!(store.is_preferences_complete());

    store
        .update_preferences(PreferencesPatch {
            preferred_states: Some(Vec::new()),
            preferred_cities: Some(vec!["Pune".to_string()]),
            ..Default::default()
        })
        .unwrap();
    assert!(store.is_preferences_complete(), "a city is enough");

    store
        .update_preferences(PreferencesPatch {
            budget_range: Some(BudgetRange { min: 0, max: 0 }),
            ..Default::default()
        })
        .unwrap();
    assert!(!store.is_preferences_complete());
}

#[test]
fn test_user_switch_resets_then_loads() {
    let storage = memory_storage();
    let mut store = PreferencesStore::new(storage);
    store.set_user(Some("u1")).unwrap();
    store.update_preferences(complete_patch()).unwrap();
    store.add_to_browsing_history("c1", BrowsingAction::View, Some(12)).unwrap();

    store.set_user(Some("u2")).unwrap();
    assert_eq!(store.preferences(), &UserPreferences::default());
    assert!(store.browsing_history().is_empty());

    store.set_user(Some("u1")).unwrap();
    assert!(store.is_preferences_complete());
    assert_eq!(store.browsing_history().len(), 1);
    assert_eq!(store.browsing_history()[0].duration, Some(12));
}

#[test]
fn test_history_keeps_most_recent_hundred() {
    let mut store = PreferencesStore::new(memory_storage());
    store.set_user(Some("u1")).unwrap();

    for i in 0..(HISTORY_LIMIT + 5) {
        store
            .add_to_browsing_history(&format!("c{}", i), BrowsingAction::View, None)
            .unwrap();
    }
    let history = store.browsing_history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].college_id, "c5");
    assert_eq!(history[HISTORY_LIMIT - 1].college_id, format!("c{}", HISTORY_LIMIT + 4));
}

#[test]
fn test_stale_history_is_pruned_on_load() {
    let storage = memory_storage();
    let now = now_ms();
    let stored = vec![
        BrowsingHistoryEntry {
            college_id: "old".to_string(),
            timestamp: now - HISTORY_RETENTION_MS - 60_000,
            action: BrowsingAction::View,
            duration: None,
        },
        BrowsingHistoryEntry {
            college_id: "recent".to_string(),
            timestamp: now - 60_000,
            action: BrowsingAction::Compare,
            duration: None,
        },
    ];
    storage.set_item(&keys::browsing_history("u1"), &stored).unwrap();

    let mut store = PreferencesStore::new(storage);
    store.set_user(Some("u1")).unwrap();
    let ids: Vec<&str> = store.browsing_history().iter().map(|e| e.college_id.as_str()).collect();
    assert_eq!(ids, vec!["recent"]);
}

#[test]
fn test_clear_history_deletes_key() {
    let storage = memory_storage();
    let mut store = PreferencesStore::new(storage.clone());
    store.set_user(Some("u1")).unwrap();
    store.add_to_browsing_history("c1", BrowsingAction::Search, None).unwrap();
    store.clear_browsing_history().unwrap();

    assert!(store.browsing_history().is_empty());
    assert!(storage.get_raw(&keys::browsing_history("u1")).unwrap().is_none());
}

#[test]
fn test_malformed_stored_preferences_fall_back_to_defaults() {
    let storage = memory_storage();
    storage.set_raw(&keys::preferences("u1"), "42").unwrap();

    let mut store = PreferencesStore::new(storage);
    store.set_user(Some("u1")).unwrap();
    assert_eq!(store.preferences(), &UserPreferences::default());
}
