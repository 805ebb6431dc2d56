//! Local persistent key-value storage.
//!
//! Values are JSON documents in the `kv_store` table. Per-user keys carry the
//! user id so several accounts on one device never read each other's data.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::connection::Database;
use crate::types::errors::StorageError;

/// Storage key names.
pub mod keys {
    pub const COMPARE_LIST: &str = "compareList";
    pub const RECENT_SEARCHES: &str = "recent_searches";
    pub const DEADLINES: &str = "deadlines";

    pub fn favorites(user_id: &str) -> String {
        format!("favorites_{}", user_id)
    }

    pub fn preferences(user_id: &str) -> String {
        format!("preferences_{}", user_id)
    }

    pub fn browsing_history(user_id: &str) -> String {
        format!("browsing_history_{}", user_id)
    }
}

/// Trait defining key-value storage operations.
pub trait LocalStorageTrait {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// SQLite-backed storage shared by every store.
#[derive(Clone)]
pub struct LocalStorage {
    db: Arc<Database>,
}

impl LocalStorage {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads and decodes a JSON value. `Ok(None)` when the key is absent.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Like [`get_item`](Self::get_item), but treats an undecodable value as
    /// absent. Stores use this on hydrate so one corrupt entry cannot block
    /// startup.
    pub fn get_item_lenient<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    log::warn!("ignoring malformed value under '{}': {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json)
    }
}

impl LocalStorageTrait for LocalStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Self::now()],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
