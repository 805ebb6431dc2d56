//! Favorites store.
//!
//! Holds the signed-in user's saved colleges. Mutations apply to memory and
//! the local snapshot first, then issue one remote write whose result is
//! reported but never rolled back.
//!
//! A refresh is split into [`begin_refresh`](FavoritesStore::begin_refresh)
//! and [`complete_refresh`](FavoritesStore::complete_refresh) so the remote
//! read can run without borrowing the store.

use std::collections::HashSet;
use std::sync::Arc;

use crate::services::local_storage::{keys, LocalStorage};
use crate::services::remote::FavoritesRemote;
use crate::types::college::College;
use crate::types::errors::{FavoritesError, RemoteError};
use crate::types::favorite::{RefreshOutcome, SyncOutcome};

/// A remote read issued by [`FavoritesStore::begin_refresh`].
pub struct RefreshRequest {
    user_id: String,
    seq: u64,
    remote: Arc<dyn FavoritesRemote>,
}

impl RefreshRequest {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Reads the user's favorites, dropping repeated ids.
    pub async fn fetch(&self) -> Result<Vec<College>, RemoteError> {
        let colleges = self.remote.favorite_colleges(&self.user_id).await?;

        let mut seen = HashSet::new();
        Ok(colleges
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect())
    }
}

pub struct FavoritesStore {
    remote: Arc<dyn FavoritesRemote>,
    storage: LocalStorage,
    user_id: Option<String>,
    favorites: Vec<College>,
    loading: bool,
    /// Bumped by every refresh and user change; only the latest refresh applies.
    refresh_seq: u64,
}

impl FavoritesStore {
    pub fn new(remote: Arc<dyn FavoritesRemote>, storage: LocalStorage) -> Self {
        Self {
            remote,
            storage,
            user_id: None,
            favorites: Vec::new(),
            loading: false,
            refresh_seq: 0,
        }
    }

    /// Switches identity and clears the in-memory list. Call
    /// [`refresh`](Self::refresh) afterwards to load the new user's favorites.
    pub fn set_user(&mut self, user_id: Option<&str>) {
        self.user_id = user_id.map(str::to_string);
        self.favorites.clear();
        self.loading = false;
        self.refresh_seq += 1;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn favorites(&self) -> &[College] {
        &self.favorites
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_favorite(&self, college_id: &str) -> bool {
        self.favorites.iter().any(|c| c.id == college_id)
    }

    fn require_user(&self) -> Result<String, FavoritesError> {
        self.user_id.clone().ok_or(FavoritesError::NotSignedIn)
    }

    fn persist(&self, user_id: &str) -> Result<(), FavoritesError> {
        self.storage.set_item(&keys::favorites(user_id), &self.favorites)?;
        Ok(())
    }

    /// Marks the store loading and returns the read to run, or `None` with
    /// no signed-in user.
    pub fn begin_refresh(&mut self) -> Option<RefreshRequest> {
        let user_id = self.user_id.clone()?;
        self.refresh_seq += 1;
        self.loading = true;
        Some(RefreshRequest {
            user_id,
            seq: self.refresh_seq,
            remote: Arc::clone(&self.remote),
        })
    }

    /// Applies the result of `request`: the remote list on success, the
    /// cached snapshot on failure. A request overtaken by a newer refresh or
    /// a user change is dropped with [`RefreshOutcome::Superseded`].
    pub fn complete_refresh(
        &mut self,
        request: &RefreshRequest,
        fetched: Result<Vec<College>, RemoteError>,
    ) -> Result<RefreshOutcome, FavoritesError> {
        if request.seq != self.refresh_seq {
            log::debug!("dropping superseded favorites refresh for {}", request.user_id);
            return Ok(RefreshOutcome::Superseded);
        }
        self.loading = false;
        let user_id = &request.user_id;

        match fetched {
            Ok(colleges) => {
                self.favorites = colleges;
                self.persist(user_id)?;
                Ok(RefreshOutcome::Remote)
            }
            Err(e) => {
                log::warn!("favorites refresh failed, using cached snapshot: {}", e);
                self.favorites = self
                    .storage
                    .get_item_lenient::<Vec<College>>(&keys::favorites(user_id))?
                    .unwrap_or_default();
                Ok(RefreshOutcome::FromCache(e.to_string()))
            }
        }
    }

    /// Replaces the list with the remote state, or with the cached snapshot
    /// when the remote read fails.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, FavoritesError> {
        let Some(request) = self.begin_refresh() else {
            return Ok(RefreshOutcome::Skipped);
        };
        let fetched = request.fetch().await;
        self.complete_refresh(&request, fetched)
    }

    /// Saves `college` locally, then inserts the association remotely.
    ///
    /// A college that is already a favorite is not appended again, but the
    /// remote insert is still attempted.
    pub async fn add(&mut self, college: College) -> Result<SyncOutcome, FavoritesError> {
        let user_id = self.require_user()?;
        let college_id = college.id.clone();

        if !self.is_favorite(&college_id) {
            self.favorites.push(college);
            self.persist(&user_id)?;
        }

        match self.remote.insert_favorite(&user_id, &college_id).await {
            Ok(()) => Ok(SyncOutcome::Synced),
            Err(e) => {
                log::warn!("favorite insert for {} failed: {}", college_id, e);
                Ok(SyncOutcome::RemoteFailed(e.to_string()))
            }
        }
    }

    /// Drops `college_id` locally, then deletes the association remotely.
    pub async fn remove(&mut self, college_id: &str) -> Result<SyncOutcome, FavoritesError> {
        let user_id = self.require_user()?;

        self.favorites.retain(|c| c.id != college_id);
        self.persist(&user_id)?;

        match self.remote.delete_favorite(&user_id, college_id).await {
            Ok(()) => Ok(SyncOutcome::Synced),
            Err(e) => {
                log::warn!("favorite delete for {} failed: {}", college_id, e);
                Ok(SyncOutcome::RemoteFailed(e.to_string()))
            }
        }
    }
}
