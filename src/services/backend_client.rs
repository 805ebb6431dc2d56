//! HTTP client for the college backend API.
//!
//! Thin wrappers over the REST endpoints. All search and ranking logic lives
//! server-side; this module only encodes requests and decodes responses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::services::remote::{CollegeSearch, FavoritesRemote, RecommendationSource};
use crate::types::college::College;
use crate::types::errors::RemoteError;
use crate::types::favorite::FavoriteEntry;
use crate::types::preferences::UserPreferences;
use crate::types::review::{Lead, NewReview, Review};
use crate::types::search::{CollegeSearchResponse, SearchPage, SearchQuery};

/// Client for `/api/...` on the backend.
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` (scheme and host, no trailing `/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::NotConfigured(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into `RemoteError::Status` with the body text.
    async fn check(resp: Response) -> Result<Response, RemoteError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RemoteError::Status(status.as_u16(), body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, RemoteError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let resp = self.http.get(&url).query(query).send().await?;
        let resp = Self::check(resp).await?;
        resp.json::<T>().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), RemoteError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let resp = self.http.post(&url).json(body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn search_colleges(
        &self,
        query: &SearchQuery,
        page: u32,
        limit: u32,
    ) -> Result<CollegeSearchResponse, RemoteError> {
        self.get_json("/api/colleges/search", &query.to_params(page, limit))
            .await
    }

    pub async fn get_college(&self, id: &str) -> Result<College, RemoteError> {
        self.get_json(&format!("/api/colleges/{}", id), &[]).await
    }

    pub async fn get_reviews(&self, college_id: &str) -> Result<Vec<Review>, RemoteError> {
        let value: Value = self
            .get_json(&format!("/api/reviews/{}", college_id), &[])
            .await?;
        // Either a bare array or `{"reviews": [...]}`.
        let list = match value {
            Value::Object(mut map) => map.remove("reviews").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };
        serde_json::from_value(list).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    pub async fn submit_review(&self, review: &NewReview) -> Result<(), RemoteError> {
        self.post_json("/api/reviews", review).await
    }

    pub async fn mark_review_helpful(&self, review_id: &str) -> Result<(), RemoteError> {
        self.post_json(&format!("/api/reviews/{}/helpful", review_id), &Value::Null)
            .await
    }

    /// Admission cutoffs. Filters are passed through as query parameters.
    pub async fn get_cutoffs(&self, filters: &[(String, String)]) -> Result<Value, RemoteError> {
        self.get_json("/api/cutoffs", filters).await
    }

    /// Cutoffs as exported text (CSV).
    pub async fn export_cutoffs(&self, filters: &[(String, String)]) -> Result<String, RemoteError> {
        let url = self.url("/api/cutoffs/export");
        log::debug!("GET {}", url);
        let resp = self.http.get(&url).query(filters).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.text().await?)
    }

    pub async fn get_seats(&self, filters: &[(String, String)]) -> Result<Value, RemoteError> {
        self.get_json("/api/seats", filters).await
    }

    pub async fn submit_lead(&self, lead: &Lead) -> Result<(), RemoteError> {
        self.post_json("/api/leads", lead).await
    }
}

#[async_trait]
impl CollegeSearch for BackendClient {
    async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> Result<SearchPage, RemoteError> {
        let resp = self.search_colleges(query, page, limit).await?;
        Ok(SearchPage::from(resp))
    }
}

/// First-page searches: seeded from preferences for the recommended feed,
/// unfiltered and ranking-ordered for trending.
#[async_trait]
impl RecommendationSource for BackendClient {
    async fn recommended(
        &self,
        _user_id: &str,
        preferences: &UserPreferences,
        limit: u32,
    ) -> Result<Vec<College>, RemoteError> {
        let query = SearchQuery::from_preferences(preferences);
        Ok(self.search_colleges(&query, 1, limit).await?.colleges)
    }

    async fn trending(&self, limit: u32) -> Result<Vec<College>, RemoteError> {
        let query = SearchQuery {
            sort: Some("ranking".to_string()),
            ..Default::default()
        };
        Ok(self.search_colleges(&query, 1, limit).await?.colleges)
    }
}

/// The backend's own favorites endpoints, used when no hosted database is
/// configured.
#[async_trait]
impl FavoritesRemote for BackendClient {
    async fn favorite_colleges(&self, user_id: &str) -> Result<Vec<College>, RemoteError> {
        let value: Value = self.get_json(&format!("/api/favorites/{}", user_id), &[]).await?;
        let list = value.get("favorites").cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(list).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn insert_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError> {
        let row = FavoriteEntry {
            user_id: user_id.to_string(),
            college_id: college_id.to_string(),
        };
        self.post_json("/api/favorites", &row).await
    }

    async fn delete_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError> {
        let url = self.url(&format!("/api/favorites/{}/{}", user_id, college_id));
        log::debug!("DELETE {}", url);
        let resp = self.http.delete(&url).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
