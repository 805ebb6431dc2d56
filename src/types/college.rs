use serde::{Deserialize, Serialize};

/// A college as returned by the backend or the hosted database.
///
/// Remote payloads are not uniform across endpoints, so every field except
/// `id` and `name` falls back to a default when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct College {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<String>,
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default)]
    pub star_rating: f64,
    #[serde(default)]
    pub annual_fees: i64,
    #[serde(default)]
    pub courses_offered: Vec<String>,
    #[serde(default)]
    pub university_type: String,
    #[serde(default)]
    pub placement_percentage: f64,
    #[serde(default)]
    pub average_package: i64,
    #[serde(default)]
    pub highest_package: i64,
    #[serde(default)]
    pub established_year: Option<i32>,
    #[serde(default)]
    pub hostel_facilities: bool,
    #[serde(default)]
    pub library_facilities: bool,
    #[serde(default)]
    pub sports_facilities: bool,
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub canteen: bool,
    #[serde(default)]
    pub medical_facilities: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_country() -> String {
    "India".to_string()
}

impl College {
    /// Builds a college with only identity fields set. Everything else takes
    /// its serde default.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: String::new(),
            state: String::new(),
            country: default_country(),
            logo_base64: None,
            ranking: None,
            star_rating: 0.0,
            annual_fees: 0,
            courses_offered: Vec::new(),
            university_type: String::new(),
            placement_percentage: 0.0,
            average_package: 0,
            highest_package: 0,
            established_year: None,
            hostel_facilities: false,
            library_facilities: false,
            sports_facilities: false,
            wifi: false,
            canteen: false,
            medical_facilities: false,
            website: None,
            description: None,
        }
    }
}
