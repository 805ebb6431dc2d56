//! Unit tests for ConfigEngine: file loading, defaults and env overrides.

use std::collections::HashMap;
use std::fs;

use collegefinder::services::config_engine::{
    ConfigEngine, ConfigEngineTrait, ENV_BACKEND_URL, ENV_DATA_DIR, ENV_SUPABASE_ANON_KEY,
    ENV_SUPABASE_URL,
};
use collegefinder::types::config::AppConfig;
use collegefinder::types::errors::ConfigError;
use rstest::rstest;
use tempfile::TempDir;

fn engine_in(tmp: &TempDir) -> ConfigEngine {
    let path = tmp.path().join("config.json");
    ConfigEngine::new(Some(path.to_string_lossy().to_string()))
}

#[test]
fn test_missing_file_yields_defaults() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine_in(&tmp);
    let config = engine.load().unwrap();

    // The process environment may carry overrides; apply the same ones.
    let mut expected = AppConfig::default();
    ConfigEngine::apply_overrides(&mut expected, |key| std::env::var(key).ok());
    assert_eq!(config, expected);
    assert_eq!(config.page_size, 10);
    assert_eq!(config.suggestion_debounce_ms, 250);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.json"), r#"{"page_size": 25}"#).unwrap();

    let mut engine = engine_in(&tmp);
    let config = engine.load().unwrap();
    assert_eq!(config.page_size, 25);
    assert_eq!(config.suggestion_limit, 5);
    assert_eq!(config.request_timeout_secs, 15);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.json"), "{ not json").unwrap();

    let mut engine = engine_in(&tmp);
    assert!(matches!(engine.load(), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_save_then_load_round_trips_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.json"), r#"{"suggestion_limit": 8}"#).unwrap();

    let mut engine = engine_in(&tmp);
    engine.load().unwrap();
    engine.save().unwrap();

    let written = fs::read_to_string(engine.get_config_path()).unwrap();
    let parsed: AppConfig = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.suggestion_limit, 8);
}

#[test]
fn test_env_overrides_win_over_file() {
    let mut config = AppConfig {
        backend_url: "http://from-file:8000".to_string(),
        ..AppConfig::default()
    };
    let env: HashMap<&str, &str> = [
        (ENV_BACKEND_URL, "https://api.example.com"),
        (ENV_SUPABASE_URL, "https://proj.example.co"),
        (ENV_SUPABASE_ANON_KEY, "anon"),
        (ENV_DATA_DIR, "/tmp/cf"),
    ]
    .into_iter()
    .collect();

    ConfigEngine::apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.backend_url, "https://api.example.com");
    assert_eq!(config.supabase_url, "https://proj.example.co");
    assert_eq!(config.supabase_anon_key, "anon");
    assert_eq!(config.data_dir, "/tmp/cf");
    assert!(config.has_hosted_db());
}

#[rstest]
#[case("http://localhost:9000", true)]
#[case("https://api.example.com", true)]
#[case("ftp://files.example.com", false)]
#[case("localhost:8000", false)]
fn test_backend_url_requires_http_scheme(#[case] url: &str, #[case] accepted: bool) {
    let mut config = AppConfig::default();
    ConfigEngine::apply_overrides(&mut config, |k| {
        (k == ENV_BACKEND_URL).then(|| url.to_string())
    });
    let expected = if accepted { url.to_string() } else { AppConfig::default().backend_url };
    assert_eq!(config.backend_url, expected);
}
