//! XDG and home directory helpers.

use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};

pub const APP_DIR: &str = "claude-manager";
pub const CONFIG_FILE: &str = "config.toml";

/// The user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = home_dir().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(home.join(".config"))
}

/// `$XDG_CONFIG_HOME/claude-manager/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home()
        .ok()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Replace a leading `~` with the home directory. Other paths, and `~user`
/// forms, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}
