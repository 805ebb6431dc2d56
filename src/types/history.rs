use serde::{Deserialize, Serialize};

/// What the user did with a college.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrowsingAction {
    View,
    Favorite,
    Compare,
    Search,
}

/// A single browsing history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowsingHistoryEntry {
    pub college_id: String,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
    pub action: BrowsingAction,
    /// Seconds spent on the college page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}
