//! Shared test utilities for integration tests
//!
//! Provides setup/teardown for HOME, XDG_CONFIG_HOME and the settings
//! environment overlay so tests that touch them stay isolated.

use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across all tests.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const SETTINGS_VARS: &[&str] = &[
    "CLAUDE_MANAGER__STORE__DOCUMENT_PATH",
    "CLAUDE_MANAGER__STORE__BACKUP_DIR",
    "CLAUDE_MANAGER__STORE__RETAIN_BACKUPS",
    "CLAUDE_MANAGER__STORE__BACKUP_ON_SAVE",
];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        let mut keys = vec!["HOME", "XDG_CONFIG_HOME"];
        keys.extend_from_slice(SETTINGS_VARS);
        Self {
            saved: keys.into_iter().map(|k| (k, std::env::var(k).ok())).collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Point HOME and XDG_CONFIG_HOME into `test_dir` and clear the settings
/// overlay for the duration of `f`.
///
/// Creates `home/` and `config/` under the temp dir. The original environment
/// is restored afterwards, and a global mutex keeps parallel tests apart.
pub fn with_home_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_config_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    for key in SETTINGS_VARS {
        std::env::remove_var(key);
    }

    let result = f();

    env_state.restore();

    result
}

/// Write `document` as pretty JSON, creating parent directories.
pub fn write_document(path: &Path, document: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_vec_pretty(document).unwrap()).unwrap();
}
