// Platform abstraction
// Per-OS locations for the config file and the local database.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Name used for every per-app directory.
pub const APP_DIR_NAME: &str = "collegefinder";

/// Directory holding `config.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/collegefinder` or `~/.config/collegefinder`
/// - **macOS**: `~/Library/Application Support/collegefinder`
/// - **Windows**: `%APPDATA%/collegefinder`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".").join(APP_DIR_NAME)
    }
}

/// Directory holding the SQLite store.
///
/// - **Linux**: `$XDG_DATA_HOME/collegefinder` or `~/.local/share/collegefinder`
/// - **macOS**: `~/Library/Application Support/collegefinder/data`
/// - **Windows**: `%LOCALAPPDATA%/collegefinder`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".").join(APP_DIR_NAME).join("data")
    }
}
