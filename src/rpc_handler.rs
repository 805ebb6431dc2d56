//! RPC method handler for the collegefinder JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be tested independently.
//! `handle_method` dispatches a call to the stores and clients held by `App`.
//! The lock is released while a search, suggestion, favorites refresh or feed
//! request is in flight so later calls can supersede it.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::managers::compare_store::{CompareAddOutcome, CompareStoreTrait};
use crate::managers::deadline_tracker::days_until;
use crate::managers::preferences_store::now_ms;
use crate::managers::search_pager::{PageOutcome, SearchPager};
use crate::services::recommendation_service::Feed;
use crate::services::remote::CollegeSearch;
use crate::services::suggestion_service::Suggestions;
use crate::types::college::College;
use crate::types::favorite::{RefreshOutcome, SyncOutcome};
use crate::types::history::BrowsingAction;
use crate::types::preferences::PreferencesPatch;
use crate::types::review::{Lead, NewReview};
use crate::types::search::SearchQuery;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn parse_param<T: DeserializeOwned>(params: &Value, key: &str) -> Result<T, String> {
    let raw = params.get(key).ok_or_else(|| format!("missing {}", key))?;
    serde_json::from_value(raw.clone()).map_err(|e| format!("invalid {}: {}", key, e))
}

/// Flattens a `filters` object into query pairs. Null values are skipped.
fn filter_params(params: &Value) -> Vec<(String, String)> {
    let Some(map) = params.get("filters").and_then(|v| v.as_object()) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(k, v)| match v {
            Value::Null => None,
            Value::String(s) => Some((k.clone(), s.clone())),
            other => Some((k.clone(), other.to_string())),
        })
        .collect()
}

fn sync_json(outcome: &SyncOutcome) -> Value {
    match outcome {
        SyncOutcome::Synced => json!({"synced": true}),
        SyncOutcome::RemoteFailed(msg) => json!({"synced": false, "error": msg}),
    }
}

fn refresh_json(outcome: &RefreshOutcome) -> Value {
    match outcome {
        RefreshOutcome::Skipped => json!({"source": "none"}),
        RefreshOutcome::Remote => json!({"source": "remote"}),
        RefreshOutcome::FromCache(msg) => json!({"source": "cache", "error": msg}),
        RefreshOutcome::Superseded => json!({"source": "superseded"}),
    }
}

fn pager_json(pager: &SearchPager) -> Value {
    json!({
        "results": pager.results(),
        "page": pager.page(),
        "has_more": pager.has_more(),
        "loading": pager.is_loading(),
    })
}

fn page_json(pager: &SearchPager, outcome: Option<PageOutcome>) -> Value {
    let mut state = pager_json(pager);
    state["outcome"] = match outcome {
        Some(PageOutcome::Applied { added }) => json!({"applied": added}),
        Some(PageOutcome::Stale) => json!("stale"),
        None => json!("skipped"),
    };
    state
}

/// Runs one page fetch without holding the lock across the request.
async fn fetch_page(app: &Mutex<App>, reset: bool, query: Option<SearchQuery>) -> Result<Value, String> {
    let (request, source) = {
        let mut a = app.lock().await;
        if let Some(q) = query {
            a.pager.set_query(q);
        }
        let request = a.pager.begin(reset).map_err(|e| e.to_string())?;
        (request, a.pager.source())
    };

    let response = source
        .search(&request.query, request.page, request.limit)
        .await;

    let mut a = app.lock().await;
    let outcome = a.pager.complete(&request, response).map_err(|e| e.to_string())?;
    Ok(page_json(&a.pager, Some(outcome)))
}

/// Refreshes favorites with the lock released during the remote read.
async fn refresh_favorites(app: &Mutex<App>) -> Result<RefreshOutcome, String> {
    let pending = app.lock().await.favorites.begin_refresh();
    let Some(request) = pending else {
        return Ok(RefreshOutcome::Skipped);
    };
    let fetched = request.fetch().await;
    let mut a = app.lock().await;
    let outcome = a.favorites.complete_refresh(&request, fetched);
    outcome.map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Session ───
        "session.set_user" => {
            let user_id = params.get("user_id").and_then(|v| v.as_str());
            let token = params
                .get("access_token")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            app.lock()
                .await
                .set_user(user_id, token)
                .map_err(|e| e.to_string())?;
            let outcome = refresh_favorites(app).await?;
            let mut out = refresh_json(&outcome);
            out["user_id"] = json!(user_id);
            out["favorites"] = json!(app.lock().await.favorites.favorites().len());
            Ok(out)
        }

        // ─── Favorites ───
        "favorites.refresh" => {
            let outcome = refresh_favorites(app).await?;
            let a = app.lock().await;
            let mut out = refresh_json(&outcome);
            out["favorites"] = json!(a.favorites.favorites());
            out["loading"] = json!(a.favorites.is_loading());
            Ok(out)
        }
        "favorites.add" => {
            let college: College = parse_param(params, "college")?;
            let mut a = app.lock().await;
            let outcome = a.favorites.add(college).await.map_err(|e| e.to_string())?;
            Ok(sync_json(&outcome))
        }
        "favorites.remove" => {
            let id = str_param(params, "college_id")?;
            let mut a = app.lock().await;
            let outcome = a.favorites.remove(id).await.map_err(|e| e.to_string())?;
            Ok(sync_json(&outcome))
        }
        "favorites.list" => {
            let a = app.lock().await;
            Ok(json!(a.favorites.favorites()))
        }
        "favorites.contains" => {
            let id = str_param(params, "college_id")?;
            let a = app.lock().await;
            Ok(json!(a.favorites.is_favorite(id)))
        }

        // ─── Compare ───
        "compare.add" => {
            let college: College = parse_param(params, "college")?;
            let mut a = app.lock().await;
            let outcome = a.compare.add(college).map_err(|e| e.to_string())?;
            let status = match outcome {
                CompareAddOutcome::Added => "added",
                CompareAddOutcome::AlreadyPresent => "already_present",
                CompareAddOutcome::AtCapacity => "at_capacity",
            };
            Ok(json!({"status": status, "count": a.compare.len()}))
        }
        "compare.remove" => {
            let id = str_param(params, "college_id")?;
            let mut a = app.lock().await;
            a.compare.remove(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "count": a.compare.len()}))
        }
        "compare.list" => {
            let a = app.lock().await;
            Ok(json!(a.compare.list()))
        }
        "compare.contains" => {
            let id = str_param(params, "college_id")?;
            let a = app.lock().await;
            Ok(json!(a.compare.is_in_compare(id)))
        }
        "compare.clear" => {
            let mut a = app.lock().await;
            a.compare.clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Preferences ───
        "preferences.get" => {
            let a = app.lock().await;
            Ok(json!(a.preferences.preferences()))
        }
        "preferences.update" => {
            let patch: PreferencesPatch = parse_param(params, "patch")?;
            let mut a = app.lock().await;
            let merged = a.preferences.update_preferences(patch).map_err(|e| e.to_string())?;
            Ok(json!(merged))
        }
        "preferences.complete" => {
            let a = app.lock().await;
            Ok(json!(a.preferences.is_preferences_complete()))
        }

        // ─── Browsing history ───
        "history.add" => {
            let id = str_param(params, "college_id")?;
            let action: BrowsingAction = parse_param(params, "action")?;
            let duration = params
                .get("duration")
                .and_then(|v| v.as_u64())
                .map(|d| d.min(u32::MAX as u64) as u32);
            let mut a = app.lock().await;
            a.preferences
                .add_to_browsing_history(id, action, duration)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "count": a.preferences.browsing_history().len()}))
        }
        "history.list" => {
            let a = app.lock().await;
            Ok(json!(a.preferences.browsing_history()))
        }
        "history.clear" => {
            let mut a = app.lock().await;
            a.preferences.clear_browsing_history().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Search ───
        "search.fetch" => {
            let query = match params.get("query") {
                Some(_) => Some(parse_param::<SearchQuery>(params, "query")?),
                None => None,
            };
            fetch_page(app, true, query).await
        }
        "search.more" => {
            {
                let a = app.lock().await;
                if a.pager.is_loading() || !a.pager.has_more() {
                    return Ok(page_json(&a.pager, None));
                }
            }
            fetch_page(app, false, None).await
        }
        "search.state" => {
            let a = app.lock().await;
            Ok(pager_json(&a.pager))
        }
        "suggest" => {
            let text = str_param(params, "text")?;
            let service = app.lock().await.suggestions.clone();
            match service.suggest(text).await.map_err(|e| e.to_string())? {
                Suggestions::Results(colleges) => Ok(json!({"results": colleges})),
                Suggestions::Superseded => Ok(json!({"superseded": true})),
            }
        }

        "recommendations.fetch" => {
            let (service, user_id, preferences) = {
                let a = app.lock().await;
                (
                    a.recommendations.clone(),
                    a.user_id().map(str::to_string),
                    a.preferences.preferences().clone(),
                )
            };
            match service
                .fetch(user_id.as_deref(), &preferences)
                .await
                .map_err(|e| e.to_string())?
            {
                Feed::Recommended(colleges) => Ok(json!({"source": "recommended", "colleges": colleges})),
                Feed::Trending { colleges, fallback } => {
                    let mut out = json!({"source": "trending", "colleges": colleges});
                    if let Some(msg) = fallback {
                        out["error"] = json!(msg);
                    }
                    Ok(out)
                }
            }
        }

        // ─── Recent searches ───
        "recent.record" => {
            let q = str_param(params, "query")?;
            let mut a = app.lock().await;
            a.recent_searches.record(q).map_err(|e| e.to_string())?;
            Ok(json!(a.recent_searches.list()))
        }
        "recent.list" => {
            let a = app.lock().await;
            Ok(json!(a.recent_searches.list()))
        }
        "recent.remove" => {
            let q = str_param(params, "query")?;
            let mut a = app.lock().await;
            a.recent_searches.remove(q).map_err(|e| e.to_string())?;
            Ok(json!(a.recent_searches.list()))
        }
        "recent.clear" => {
            let mut a = app.lock().await;
            a.recent_searches.clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Deadlines ───
        "deadlines.sync" => {
            let now = now_ms();
            let mut a = app.lock().await;
            let favorites = a.favorites.favorites().to_vec();
            let merged = a
                .deadlines
                .sync_with_favorites(&favorites, now)
                .map_err(|e| e.to_string())?;
            Ok(json!(merged))
        }
        "deadlines.upcoming" => {
            let now = now_ms();
            let a = app.lock().await;
            let arr: Vec<Value> = a
                .deadlines
                .upcoming(now)
                .into_iter()
                .map(|d| {
                    let mut v = json!(d);
                    v["daysLeft"] = json!(days_until(d, now));
                    v
                })
                .collect();
            Ok(json!(arr))
        }
        "deadlines.complete" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().await;
            a.deadlines.mark_completed(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Backend passthrough ───
        "college.get" => {
            let id = str_param(params, "id")?;
            let backend = app.lock().await.backend.clone();
            let college = backend.get_college(id).await.map_err(|e| e.to_string())?;
            Ok(json!(college))
        }
        "reviews.list" => {
            let id = str_param(params, "college_id")?;
            let backend = app.lock().await.backend.clone();
            let reviews = backend.get_reviews(id).await.map_err(|e| e.to_string())?;
            Ok(json!(reviews))
        }
        "reviews.submit" => {
            let review: NewReview = parse_param(params, "review")?;
            if !(1.0..=5.0).contains(&review.rating) {
                return Err("invalid rating: must be between 1 and 5".to_string());
            }
            let backend = app.lock().await.backend.clone();
            backend.submit_review(&review).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "reviews.helpful" => {
            let id = str_param(params, "review_id")?;
            let backend = app.lock().await.backend.clone();
            backend.mark_review_helpful(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "leads.submit" => {
            let lead: Lead = parse_param(params, "lead")?;
            if lead.name.trim().is_empty() || lead.email.trim().is_empty() {
                return Err("missing name or email".to_string());
            }
            let backend = app.lock().await.backend.clone();
            backend.submit_lead(&lead).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "cutoffs.list" => {
            let filters = filter_params(params);
            let backend = app.lock().await.backend.clone();
            backend.get_cutoffs(&filters).await.map_err(|e| e.to_string())
        }
        "cutoffs.export" => {
            let filters = filter_params(params);
            let backend = app.lock().await.backend.clone();
            let csv = backend.export_cutoffs(&filters).await.map_err(|e| e.to_string())?;
            Ok(json!({"csv": csv}))
        }
        "seats.list" => {
            let filters = filter_params(params);
            let backend = app.lock().await.backend.clone();
            backend.get_seats(&filters).await.map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
