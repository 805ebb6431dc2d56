use serde::{Deserialize, Serialize};

/// A published review of a college.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub college_id: String,
    #[serde(default)]
    pub user_name: String,
    pub rating: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub college_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: f64,
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/leads`: an enquiry forwarded to a college.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub college_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
