use serde::{Deserialize, Serialize};

use crate::platform;

/// Runtime configuration for the client core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Directory holding the local SQLite store.
    pub data_dir: String,
    pub page_size: u32,
    pub suggestion_debounce_ms: u64,
    pub suggestion_limit: u32,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            data_dir: platform::get_data_dir().to_string_lossy().to_string(),
            page_size: 10,
            suggestion_debounce_ms: 250,
            suggestion_limit: 5,
            request_timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Path of the SQLite file inside `data_dir`.
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("collegefinder.db")
    }

    pub fn has_hosted_db(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}
