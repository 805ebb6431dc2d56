//! Recent search queries, most recent first.

use crate::services::local_storage::{keys, LocalStorage, LocalStorageTrait};
use crate::types::errors::StorageError;

pub const RECENT_SEARCH_LIMIT: usize = 10;

pub struct RecentSearches {
    storage: LocalStorage,
    queries: Vec<String>,
}

impl RecentSearches {
    pub fn new(storage: LocalStorage) -> Result<Self, StorageError> {
        let mut queries: Vec<String> = storage
            .get_item_lenient(keys::RECENT_SEARCHES)?
            .unwrap_or_default();
        queries.truncate(RECENT_SEARCH_LIMIT);
        Ok(Self { storage, queries })
    }

    pub fn list(&self) -> &[String] {
        &self.queries
    }

    /// Moves `query` to the front. Matching is case-insensitive and the
    /// newest spelling wins. Blank queries are ignored.
    pub fn record(&mut self, query: &str) -> Result<(), StorageError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let lowered = trimmed.to_lowercase();
        self.queries.retain(|q| q.to_lowercase() != lowered);
        self.queries.insert(0, trimmed.to_string());
        self.queries.truncate(RECENT_SEARCH_LIMIT);
        self.storage.set_item(keys::RECENT_SEARCHES, &self.queries)
    }

    pub fn remove(&mut self, query: &str) -> Result<(), StorageError> {
        let lowered = query.trim().to_lowercase();
        self.queries.retain(|q| q.to_lowercase() != lowered);
        self.storage.set_item(keys::RECENT_SEARCHES, &self.queries)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.queries.clear();
        self.storage.remove_item(keys::RECENT_SEARCHES)
    }
}
