//! Preferences store.
//!
//! Owns the signed-in user's preference record and browsing history. Both
//! are stored under user-scoped keys and reset to defaults whenever the
//! identity changes.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::services::local_storage::{keys, LocalStorage, LocalStorageTrait};
use crate::types::errors::PreferencesError;
use crate::types::history::{BrowsingAction, BrowsingHistoryEntry};
use crate::types::preferences::{PreferencesPatch, UserPreferences};

/// Most recent entries kept in browsing history.
pub const HISTORY_LIMIT: usize = 100;

/// Entries older than this are dropped when history is loaded.
pub const HISTORY_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Current time in milliseconds since the UNIX epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Keeps entries newer than the retention window, then the last
/// [`HISTORY_LIMIT`] of those.
pub fn prune_history(entries: Vec<BrowsingHistoryEntry>, now: i64) -> Vec<BrowsingHistoryEntry> {
    let cutoff = now - HISTORY_RETENTION_MS;
    let mut kept: Vec<BrowsingHistoryEntry> =
        entries.into_iter().filter(|e| e.timestamp > cutoff).collect();
    truncate_front(&mut kept);
    kept
}

fn truncate_front(entries: &mut Vec<BrowsingHistoryEntry>) {
    if entries.len() > HISTORY_LIMIT {
        let excess = entries.len() - HISTORY_LIMIT;
        entries.drain(..excess);
    }
}

pub struct PreferencesStore {
    storage: LocalStorage,
    user_id: Option<String>,
    preferences: UserPreferences,
    history: Vec<BrowsingHistoryEntry>,
}

impl PreferencesStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            user_id: None,
            preferences: UserPreferences::default(),
            history: Vec::new(),
        }
    }

    /// Resets to defaults, then loads whatever is stored for `user_id`.
    ///
    /// Stored history is pruned on load; the pruned list is not written back
    /// until the next history mutation.
    pub fn set_user(&mut self, user_id: Option<&str>) -> Result<(), PreferencesError> {
        self.user_id = user_id.map(str::to_string);
        self.preferences = UserPreferences::default();
        self.history = Vec::new();

        let Some(uid) = user_id else {
            return Ok(());
        };

        if let Some(stored) = self
            .storage
            .get_item_lenient::<UserPreferences>(&keys::preferences(uid))?
        {
            self.preferences = stored;
        }
        if let Some(stored) = self
            .storage
            .get_item_lenient::<Vec<BrowsingHistoryEntry>>(&keys::browsing_history(uid))?
        {
            self.history = prune_history(stored, now_ms());
        }
        Ok(())
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn browsing_history(&self) -> &[BrowsingHistoryEntry] {
        &self.history
    }

    /// Recomputed on every call.
    pub fn is_preferences_complete(&self) -> bool {
        self.preferences.is_complete()
    }

    fn require_user(&self) -> Result<String, PreferencesError> {
        self.user_id.clone().ok_or(PreferencesError::NotSignedIn)
    }

    /// Shallow-merges `patch` and persists the merged record.
    pub fn update_preferences(&mut self, patch: PreferencesPatch) -> Result<&UserPreferences, PreferencesError> {
        let uid = self.require_user()?;
        self.preferences.apply(patch);
        self.storage
            .set_item(&keys::preferences(&uid), &self.preferences)?;
        Ok(&self.preferences)
    }

    /// Appends an entry stamped with the current time.
    pub fn add_to_browsing_history(
        &mut self,
        college_id: &str,
        action: BrowsingAction,
        duration: Option<u32>,
    ) -> Result<(), PreferencesError> {
        let uid = self.require_user()?;
        self.history.push(BrowsingHistoryEntry {
            college_id: college_id.to_string(),
            timestamp: now_ms(),
            action,
            duration,
        });
        truncate_front(&mut self.history);
        self.storage
            .set_item(&keys::browsing_history(&uid), &self.history)?;
        Ok(())
    }

    pub fn clear_browsing_history(&mut self) -> Result<(), PreferencesError> {
        let uid = self.require_user()?;
        self.history.clear();
        self.storage.remove_item(&keys::browsing_history(&uid))?;
        Ok(())
    }
}
