//! Seams between the stores and the remote collaborators.
//!
//! The stores only see these traits, so tests substitute in-process fakes.

use async_trait::async_trait;

use crate::types::college::College;
use crate::types::errors::RemoteError;
use crate::types::preferences::UserPreferences;
use crate::types::search::{SearchPage, SearchQuery};

/// A source of paged college search results.
#[async_trait]
pub trait CollegeSearch: Send + Sync {
    /// Fetches `page` (1-based) of results with at most `limit` entries.
    async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> Result<SearchPage, RemoteError>;
}

/// Remote storage of favorite associations.
#[async_trait]
pub trait FavoritesRemote: Send + Sync {
    /// The colleges `user_id` has favorited, in remote order.
    async fn favorite_colleges(&self, user_id: &str) -> Result<Vec<College>, RemoteError>;
    async fn insert_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError>;
    async fn delete_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError>;
}

/// Ranked college lists for the home feed.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Picks for a signed-in user whose preferences are complete.
    async fn recommended(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
        limit: u32,
    ) -> Result<Vec<College>, RemoteError>;

    /// Best-ranked colleges, for everyone else and as the fallback.
    async fn trending(&self, limit: u32) -> Result<Vec<College>, RemoteError>;
}
