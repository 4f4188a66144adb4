//! Integration tests for settings layering

use claude_manager::config::{xdg, ConfigLoader};
use claude_manager::error::ApiError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::with_home_env;

fn write_global(test_dir: &TempDir, content: &str) -> PathBuf {
    let path = test_dir.path().join("config/claude-manager/config.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults_expand_home() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        let config = ConfigLoader::load(None).unwrap();
        let layout = config.store_layout();
        let home = test_dir.path().join("home");
        assert_eq!(layout.document_path, home.join(".claude.json"));
        assert_eq!(layout.backup_dir, home.join(".claude_backups"));
        assert_eq!(layout.retain_backups, 10);
        assert_eq!(
            config.agent_scanner().global_dir(),
            home.join(".claude/agents").as_path()
        );
    });
}

#[test]
fn test_global_file_location() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        let expected = test_dir.path().join("config/claude-manager/config.toml");
        assert_eq!(xdg::global_config_path(), Some(expected));
    });
}

/// defaults < global file < explicit file < environment
#[test]
fn test_precedence() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        write_global(
            &test_dir,
            "[store]\nretain_backups = 3\nbackup_on_save = false\n\n[analysis]\nlarge_history_threshold = 20\n",
        );
        let explicit = test_dir.path().join("explicit.toml");
        fs::write(&explicit, "[store]\nretain_backups = 4\n").unwrap();

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.store.retain_backups, 3);
        assert!(!config.store.backup_on_save);
        assert_eq!(config.analysis.large_history_threshold, 20);

        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.store.retain_backups, 4);
        assert!(!config.store.backup_on_save);

        std::env::set_var("CLAUDE_MANAGER__STORE__RETAIN_BACKUPS", "6");
        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.store.retain_backups, 6);
    });
}

/// load_from_file ignores the global file and the environment
#[test]
fn test_load_from_file_is_isolated() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        write_global(&test_dir, "[store]\nretain_backups = 3\n");
        std::env::set_var("CLAUDE_MANAGER__STORE__RETAIN_BACKUPS", "6");
        let explicit = test_dir.path().join("only.toml");
        fs::write(&explicit, "[analysis]\nlarge_history_threshold = 7\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.store.retain_backups, 10);
        assert_eq!(config.analysis.large_history_threshold, 7);
    });
}

#[test]
fn test_missing_explicit_file() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        let err = ConfigLoader::load(Some(&test_dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)));
    });
}

#[test]
fn test_invalid_settings_are_reported_together() {
    let test_dir = TempDir::new().unwrap();
    with_home_env(&test_dir, || {
        let explicit = test_dir.path().join("bad.toml");
        fs::write(
            &explicit,
            "[store]\nretain_backups = 0\n\n[logging]\nformat = \"yaml\"\n",
        )
        .unwrap();
        match ConfigLoader::load(Some(&explicit)) {
            Err(ApiError::ConfigError(message)) => {
                assert!(message.contains("retain_backups"));
                assert!(message.contains("Logging"));
            }
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
    });
}
