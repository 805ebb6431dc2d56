// Linux paths follow the XDG base directory spec.

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

fn home() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `xdg` wins when set and non-empty; otherwise `fallback` under `$HOME`.
fn xdg_or(xdg: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR_NAME),
        None => fallback
            .iter()
            .fold(home(), |path, part| path.join(part))
            .join(APP_DIR_NAME),
    }
}

pub fn get_config_dir() -> PathBuf {
    xdg_or(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
}

pub fn get_data_dir() -> PathBuf {
    xdg_or(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
}
