use serde::{Deserialize, Serialize};

use super::college::College;
use super::preferences::UserPreferences;

/// Facility flags the backend understands as boolean filters.
pub const FACILITY_FILTERS: [&str; 6] = ["hostel", "wifi", "library", "sports", "canteen", "medical"];

/// Filters and sort order for a college search.
///
/// Nothing here is validated client-side; matching and ranking happen on the
/// server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_fees: Option<i64>,
    pub max_fees: Option<i64>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub university_type: Option<String>,
    pub ranking_from: Option<u32>,
    pub ranking_to: Option<u32>,
    pub courses: Vec<String>,
    /// Names from [`FACILITY_FILTERS`] that must be present.
    pub facilities: Vec<String>,
    pub sort: Option<String>,
}

impl SearchQuery {
    pub fn text(q: &str) -> Self {
        Self {
            q: Some(q.to_string()),
            ..Default::default()
        }
    }

    /// A query seeded from stated preferences: the first preferred state,
    /// city and university type, the budget bounds, minimum rating and courses.
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        let positive = |v: i64| if v > 0 { Some(v) } else { None };
        Self {
            city: prefs.preferred_cities.first().cloned(),
            state: prefs.preferred_states.first().cloned(),
            min_fees: positive(prefs.budget_range.min),
            max_fees: positive(prefs.budget_range.max),
            min_rating: prefs.min_rating,
            university_type: prefs.university_types.first().cloned(),
            courses: prefs.preferred_courses.clone(),
            ..Default::default()
        }
    }

    /// Serializes the query with paging into backend query parameters.
    ///
    /// Blank strings and absent values are omitted; courses are comma-joined.
    pub fn to_params(&self, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        let mut push_str = |key: &str, value: &Option<String>| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key.to_string(), v.to_string()));
            }
        };
        push_str("q", &self.q);
        push_str("city", &self.city);
        push_str("state", &self.state);
        push_str("university_type", &self.university_type);
        push_str("sort", &self.sort);

        if let Some(v) = self.min_fees {
            params.push(("min_fees".to_string(), v.to_string()));
        }
        if let Some(v) = self.max_fees {
            params.push(("max_fees".to_string(), v.to_string()));
        }
        if let Some(v) = self.min_rating {
            params.push(("min_rating".to_string(), v.to_string()));
        }
        if let Some(v) = self.max_rating {
            params.push(("max_rating".to_string(), v.to_string()));
        }
        if let Some(v) = self.ranking_from {
            params.push(("ranking_from".to_string(), v.to_string()));
        }
        if let Some(v) = self.ranking_to {
            params.push(("ranking_to".to_string(), v.to_string()));
        }
        if !self.courses.is_empty() {
            params.push(("courses".to_string(), self.courses.join(",")));
        }
        for facility in FACILITY_FILTERS {
            if self.facilities.iter().any(|f| f == facility) {
                params.push((facility.to_string(), "true".to_string()));
            }
        }
        params.push(("page".to_string(), page.to_string()));
        params.push(("limit".to_string(), limit.to_string()));
        params
    }
}

/// JSON body of `GET /api/colleges/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeSearchResponse {
    #[serde(default)]
    pub colleges: Vec<College>,
    #[serde(default)]
    pub total: u64,
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// How a source reports whether more pages exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageInfo {
    /// The server reported its position and page count.
    Counted { page: u32, total_pages: u32, total: u64 },
    /// Only the requested page size is known (offset-based fallback).
    Uncounted { limit: u32 },
}

/// One page of search results from any source.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub colleges: Vec<College>,
    pub info: PageInfo,
}

impl SearchPage {
    /// Whether a following page is worth requesting.
    pub fn has_more(&self) -> bool {
        match self.info {
            PageInfo::Counted { page, total_pages, .. } => page < total_pages,
            PageInfo::Uncounted { limit } => limit > 0 && self.colleges.len() == limit as usize,
        }
    }
}

impl From<CollegeSearchResponse> for SearchPage {
    fn from(resp: CollegeSearchResponse) -> Self {
        Self {
            info: PageInfo::Counted {
                page: resp.page,
                total_pages: resp.total_pages,
                total: resp.total,
            },
            colleges: resp.colleges,
        }
    }
}
