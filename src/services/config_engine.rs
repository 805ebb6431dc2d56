// Config Engine
// Loads `AppConfig` from a JSON file in the platform config directory, then
// applies environment overrides.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::config::AppConfig;
use crate::types::errors::ConfigError;

pub const ENV_BACKEND_URL: &str = "COLLEGEFINDER_BACKEND_URL";
pub const ENV_SUPABASE_URL: &str = "COLLEGEFINDER_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "COLLEGEFINDER_SUPABASE_ANON_KEY";
pub const ENV_DATA_DIR: &str = "COLLEGEFINDER_DATA_DIR";
/// Path of the config file itself; read by the RPC binary.
pub const ENV_CONFIG_PATH: &str = "COLLEGEFINDER_CONFIG";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<AppConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &AppConfig;
    fn get_config_path(&self) -> &str;
}

/// Reads and writes `config.json`.
pub struct ConfigEngine {
    config_path: String,
    config: AppConfig,
}

impl ConfigEngine {
    /// Uses `path_override` when given, otherwise `<config dir>/config.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string()
        });
        Self {
            config_path,
            config: AppConfig::default(),
        }
    }

    /// Applies overrides from `lookup` (normally `std::env::var`).
    ///
    /// A backend URL without an `http://` or `https://` scheme is ignored.
    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            if url.starts_with("http://") || url.starts_with("https://") {
                config.backend_url = url;
            } else {
                log::warn!("ignoring {}: not an http(s) url", ENV_BACKEND_URL);
            }
        }
        if let Some(url) = lookup(ENV_SUPABASE_URL) {
            config.supabase_url = url;
        }
        if let Some(key) = lookup(ENV_SUPABASE_ANON_KEY) {
            config.supabase_anon_key = key;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = dir;
        }
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// Loads the config file (defaults when absent) and applies env overrides.
    ///
    /// A file that exists but does not parse is an error.
    fn load(&mut self) -> Result<AppConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("Failed to parse config file: {}", e)))?
        } else {
            AppConfig::default()
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok());
        self.config = config;
        Ok(self.config.clone())
    }

    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_config(&self) -> &AppConfig {
        &self.config
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
