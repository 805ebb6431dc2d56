//! Client for the hosted database's REST interface.
//!
//! Speaks the PostgREST dialect: tables under `/rest/v1/{table}` with
//! `column=op.value` filters, procedures under `/rest/v1/rpc/{name}`.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::services::remote::{CollegeSearch, FavoritesRemote, RecommendationSource};
use crate::types::college::College;
use crate::types::errors::RemoteError;
use crate::types::favorite::FavoriteEntry;
use crate::types::preferences::UserPreferences;
use crate::types::search::{PageInfo, SearchPage, SearchQuery};

const SEARCH_PROCEDURE: &str = "f_search_colleges";

/// `nirf_rank` ascending with unranked rows last, ties by name.
const TRENDING_ORDER: &str = "nirf_rank.asc.nullslast,name.asc";

#[derive(Deserialize)]
struct CollegeIdRow {
    college_id: String,
}

/// Hosted database client authenticated with the project's anon key.
pub struct HostedDbClient {
    http: Client,
    base_url: String,
    anon_key: String,
    /// Signed-in user's JWT; requests fall back to the anon key without one.
    access_token: RwLock<Option<String>>,
}

impl HostedDbClient {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self, RemoteError> {
        if base_url.is_empty() || anon_key.is_empty() {
            return Err(RemoteError::NotConfigured(
                "hosted database url and anon key are required".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::NotConfigured(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: RwLock::new(None),
        })
    }

    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, procedure)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        req.header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    async fn check(resp: Response) -> Result<Response, RemoteError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RemoteError::Status(status.as_u16(), body))
    }

    /// Builds a PostgREST `in.(...)` filter. Quotes are stripped from ids.
    pub fn in_filter(ids: &[String]) -> String {
        let quoted: Vec<String> = ids
            .iter()
            .map(|id| format!("\"{}\"", id.replace('"', "")))
            .collect();
        format!("in.({})", quoted.join(","))
    }

    /// Makes user text safe inside an `ilike` pattern. PostgREST reserves
    /// `,` `(` `)` `.` `:` and quotes in filter values, and `*` `%` `_` are
    /// wildcards; these are replaced with spaces and whitespace collapsed.
    pub fn ilike_term(q: &str) -> String {
        let cleaned: String = q
            .chars()
            .map(|c| match c {
                '*' | '%' | '_' | ',' | '(' | ')' | '.' | ':' | '"' | '\\' => ' ',
                other => other,
            })
            .collect();
        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Calls the search procedure.
    async fn rpc_search(&self, q: &str, limit: u32, offset: u32) -> Result<Vec<College>, RemoteError> {
        let url = self.rpc_url(SEARCH_PROCEDURE);
        log::debug!("POST {}", url);
        let resp = self
            .authorized(self.http.post(&url))
            .json(&json!({ "q": q, "limit": limit, "offset": offset }))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// Direct table query used when the search procedure is unavailable.
    async fn table_search(&self, q: &str, limit: u32, offset: u32) -> Result<Vec<College>, RemoteError> {
        let url = self.table_url("colleges");
        let mut params = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "name.asc".to_string()),
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        let term = Self::ilike_term(q);
        if !term.is_empty() {
            params.push(("name".to_string(), format!("ilike.*{}*", term)));
        }
        log::debug!("GET {}", url);
        let resp = self
            .authorized(self.http.get(&url))
            .query(&params)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// The best-ranked `limit` rows of `colleges`.
    pub async fn trending(&self, limit: u32) -> Result<Vec<College>, RemoteError> {
        let url = self.table_url("colleges");
        log::debug!("GET {} (trending)", url);
        let resp = self
            .authorized(self.http.get(&url))
            .query(&[
                ("select", "*".to_string()),
                ("order", TRENDING_ORDER.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CollegeSearch for HostedDbClient {
    async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> Result<SearchPage, RemoteError> {
        let q = query.q.as_deref().map(str::trim).unwrap_or("");
        let offset = page.saturating_sub(1) * limit;
        let colleges = match self.rpc_search(q, limit, offset).await {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!("{} failed, falling back to table query: {}", SEARCH_PROCEDURE, e);
                self.table_search(q, limit, offset).await?
            }
        };
        Ok(SearchPage {
            colleges,
            info: PageInfo::Uncounted { limit },
        })
    }
}

impl HostedDbClient {
    /// College ids from the user's rows in `favorites`.
    pub async fn favorite_college_ids(&self, user_id: &str) -> Result<Vec<String>, RemoteError> {
        let resp = self
            .authorized(self.http.get(self.table_url("favorites")))
            .query(&[("select", "college_id".to_string()), ("user_id", format!("eq.{}", user_id))])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let rows: Vec<CollegeIdRow> = resp.json().await.map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.college_id).collect())
    }

    /// Rows of `colleges` whose id is in `ids`.
    pub async fn colleges_by_ids(&self, ids: &[String]) -> Result<Vec<College>, RemoteError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .authorized(self.http.get(self.table_url("colleges")))
            .query(&[("select", "*".to_string()), ("id", Self::in_filter(ids))])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FavoritesRemote for HostedDbClient {
    async fn favorite_colleges(&self, user_id: &str) -> Result<Vec<College>, RemoteError> {
        let ids = self.favorite_college_ids(user_id).await?;
        self.colleges_by_ids(&ids).await
    }

    async fn insert_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError> {
        let row = FavoriteEntry {
            user_id: user_id.to_string(),
            college_id: college_id.to_string(),
        };
        let resp = self
            .authorized(self.http.post(self.table_url("favorites")))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete_favorite(&self, user_id: &str, college_id: &str) -> Result<(), RemoteError> {
        let resp = self
            .authorized(self.http.delete(self.table_url("favorites")))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("college_id", format!("eq.{}", college_id)),
            ])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

/// The hosted schema has no scoring procedure, so the recommended feed is
/// the trending query.
#[async_trait]
impl RecommendationSource for HostedDbClient {
    async fn recommended(
        &self,
        _user_id: &str,
        _preferences: &UserPreferences,
        limit: u32,
    ) -> Result<Vec<College>, RemoteError> {
        self.trending(limit).await
    }

    async fn trending(&self, limit: u32) -> Result<Vec<College>, RemoteError> {
        HostedDbClient::trending(self, limit).await
    }
}
