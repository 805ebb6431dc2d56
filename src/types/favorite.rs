use serde::{Deserialize, Serialize};

/// A row of the remote `favorites` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub user_id: String,
    pub college_id: String,
}

/// Result of a remote write that follows an optimistic local update.
///
/// Local state is never rolled back; the caller decides what to do with a
/// failed sync.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Synced,
    RemoteFailed(String),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

/// Where the favorites list came from after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// No user is signed in; nothing was fetched.
    Skipped,
    Remote,
    /// The remote read failed and the cached snapshot was loaded instead.
    FromCache(String),
    /// A newer refresh or a user change replaced this one; nothing applied.
    Superseded,
}
