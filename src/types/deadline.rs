use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    Application,
    EntranceExam,
    Scholarship,
    DocumentSubmission,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeadlinePriority {
    High,
    Medium,
    Low,
}

/// An admission-related deadline attached to a favorited college.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub id: String,
    pub college_id: String,
    pub college_name: String,
    #[serde(rename = "type")]
    pub kind: DeadlineKind,
    pub title: String,
    /// Milliseconds since the UNIX epoch.
    pub due_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    pub priority: DeadlinePriority,
}
