use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Annual fee range the user is willing to pay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetRange {
    pub min: i64,
    pub max: i64,
}

/// A user's stated preferences.
///
/// Stored as camelCase JSON. Unknown or missing fields fall back to the
/// defaults so older stored records keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_percentage: Option<f64>,
    pub preferred_courses: Vec<String>,
    pub budget_range: BudgetRange,
    pub preferred_states: Vec<String>,
    pub preferred_cities: Vec<String>,
    /// Kilometres from the current location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_radius: Option<u32>,
    pub university_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// 1-5 scale.
    pub placement_priority: u8,
    /// 1-5 scale.
    pub fees_priority: u8,
    /// 1-5 scale.
    pub ranking_priority: u8,
    pub entrance_exams: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_scores: Option<HashMap<String, f64>>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            academic_percentage: None,
            preferred_courses: Vec::new(),
            budget_range: BudgetRange { min: 0, max: 1_000_000 },
            preferred_states: Vec::new(),
            preferred_cities: Vec::new(),
            location_radius: None,
            university_types: Vec::new(),
            min_rating: None,
            placement_priority: 3,
            fees_priority: 3,
            ranking_priority: 3,
            entrance_exams: Vec::new(),
            exam_scores: None,
        }
    }
}

impl UserPreferences {
    /// True when enough has been filled in to seed search and recommendations.
    pub fn is_complete(&self) -> bool {
        !self.preferred_courses.is_empty()
            && self.budget_range.max > 0
            && (!self.preferred_states.is_empty() || !self.preferred_cities.is_empty())
    }

    /// Replaces every field that is present in `patch`.
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(v) = patch.academic_percentage {
            self.academic_percentage = Some(v);
        }
        if let Some(v) = patch.preferred_courses {
            self.preferred_courses = v;
        }
        if let Some(v) = patch.budget_range {
            self.budget_range = v;
        }
        if let Some(v) = patch.preferred_states {
            self.preferred_states = v;
        }
        if let Some(v) = patch.preferred_cities {
            self.preferred_cities = v;
        }
        if let Some(v) = patch.location_radius {
            self.location_radius = Some(v);
        }
        if let Some(v) = patch.university_types {
            self.university_types = v;
        }
        if let Some(v) = patch.min_rating {
            self.min_rating = Some(v);
        }
        if let Some(v) = patch.placement_priority {
            self.placement_priority = v;
        }
        if let Some(v) = patch.fees_priority {
            self.fees_priority = v;
        }
        if let Some(v) = patch.ranking_priority {
            self.ranking_priority = v;
        }
        if let Some(v) = patch.entrance_exams {
            self.entrance_exams = v;
        }
        if let Some(v) = patch.exam_scores {
            self.exam_scores = Some(v);
        }
    }
}

/// A partial preferences update. Absent fields leave the current value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesPatch {
    pub academic_percentage: Option<f64>,
    pub preferred_courses: Option<Vec<String>>,
    pub budget_range: Option<BudgetRange>,
    pub preferred_states: Option<Vec<String>>,
    pub preferred_cities: Option<Vec<String>>,
    pub location_radius: Option<u32>,
    pub university_types: Option<Vec<String>>,
    pub min_rating: Option<f64>,
    pub placement_priority: Option<u8>,
    pub fees_priority: Option<u8>,
    pub ranking_priority: Option<u8>,
    pub entrance_exams: Option<Vec<String>>,
    pub exam_scores: Option<HashMap<String, f64>>,
}
