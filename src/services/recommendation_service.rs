//! Home feed: recommended colleges, with trending as the fallback.

use std::sync::Arc;

use crate::services::remote::RecommendationSource;
use crate::types::college::College;
use crate::types::errors::RemoteError;
use crate::types::preferences::UserPreferences;

/// Colleges shown in the feed.
pub const FEED_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    Recommended(Vec<College>),
    /// `fallback` holds the recommendation error when trending replaced a
    /// failed recommendation fetch.
    Trending {
        colleges: Vec<College>,
        fallback: Option<String>,
    },
}

pub struct RecommendationService {
    source: Arc<dyn RecommendationSource>,
    limit: u32,
}

impl RecommendationService {
    pub fn new(source: Arc<dyn RecommendationSource>, limit: u32) -> Self {
        Self { source, limit }
    }

    /// Recommendations for a signed-in user with complete preferences;
    /// trending for anyone else or when recommendations fail. Only a failed
    /// trending fetch is an error.
    pub async fn fetch(&self, user_id: Option<&str>, preferences: &UserPreferences) -> Result<Feed, RemoteError> {
        let mut fallback = None;

        if let Some(user_id) = user_id.filter(|_| preferences.is_complete()) {
            match self.source.recommended(user_id, preferences, self.limit).await {
                Ok(colleges) => return Ok(Feed::Recommended(colleges)),
                Err(e) => {
                    log::warn!("recommendations for {} failed, showing trending: {}", user_id, e);
                    fallback = Some(e.to_string());
                }
            }
        }

        let colleges = self.source.trending(self.limit).await?;
        Ok(Feed::Trending { colleges, fallback })
    }
}
