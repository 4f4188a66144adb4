//! Integration tests for backup rotation, restore and deletion

use claude_manager::api::ManagerApi;
use claude_manager::agent::AgentScanner;
use claude_manager::backup::{BackupManager, BACKUP_PREFIX};
use claude_manager::error::{ApiError, StorageError};
use claude_manager::store::ConfigStore;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

use crate::integration::write_document;

fn api_in(temp_dir: &TempDir, retain: usize) -> ManagerApi {
    let store = ConfigStore::new(
        temp_dir.path().join(".claude.json"),
        BackupManager::new(temp_dir.path().join("backups"), retain),
    );
    ManagerApi::new(store, AgentScanner::new(temp_dir.path().join("agents"), ".claude/agents"))
}

/// Retention keeps only the newest backups, newest first
#[test]
fn test_retention_keeps_newest() {
    let temp_dir = TempDir::new().unwrap();
    let api = api_in(&temp_dir, 3);
    let doc = temp_dir.path().join(".claude.json");

    let mut created = Vec::new();
    for i in 0..8 {
        write_document(&doc, &json!({"numStartups": i, "projects": {}}));
        created.push(api.create_backup().unwrap().unwrap());
    }

    let listed = api.list_backups().unwrap();
    assert_eq!(listed.len(), 3);
    let expected: Vec<&str> = created.iter().rev().take(3).map(|b| b.name.as_str()).collect();
    let names: Vec<&str> = listed.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, expected);
    assert!(names.iter().all(|n| n.starts_with(BACKUP_PREFIX)));

    let newest: serde_json::Value = serde_json::from_slice(&fs::read(&listed[0].path).unwrap()).unwrap();
    assert_eq!(newest["numStartups"], json!(7));
}

#[test]
fn test_backup_without_document() {
    let temp_dir = TempDir::new().unwrap();
    let api = api_in(&temp_dir, 3);
    assert!(api.create_backup().unwrap().is_none());
    assert!(api.list_backups().unwrap().is_empty());
}

/// Restore brings back the backed-up content and reloads it
#[test]
fn test_restore_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut api = api_in(&temp_dir, 5);
    let doc = temp_dir.path().join(".claude.json");
    write_document(&doc, &json!({"projects": {"/keep": {"history": [{"display": "a"}]}}}));
    api.load_config().unwrap();

    let backup = api.create_backup().unwrap().unwrap();
    api.remove_project_and_save("/keep").unwrap();
    assert!(api.projects().is_empty());

    let restored = api.restore_from_backup(&backup.name).unwrap();
    assert_eq!(restored.name, backup.name);
    assert_eq!(api.project("/keep").unwrap().history_count(), 1);
    assert_eq!(fs::read(&doc).unwrap(), fs::read(&backup.path).unwrap());
}

/// A corrupt backup is rejected before the document is touched
#[test]
fn test_restore_rejects_corrupt_backup() {
    let temp_dir = TempDir::new().unwrap();
    let mut api = api_in(&temp_dir, 5);
    let doc = temp_dir.path().join(".claude.json");
    write_document(&doc, &json!({"projects": {"/p": {}}}));
    let before = fs::read(&doc).unwrap();

    let backups = temp_dir.path().join("backups");
    fs::create_dir_all(&backups).unwrap();
    fs::write(backups.join("claude_20240101_000000.json"), "not json").unwrap();

    let err = api.restore_from_backup("claude_20240101_000000.json").unwrap_err();
    assert!(matches!(
        err,
        ApiError::StorageError(StorageError::InvalidBackup { .. })
    ));
    assert_eq!(fs::read(&doc).unwrap(), before);
}

/// Identifiers outside the backup directory are never resolved
#[test]
fn test_restore_rejects_foreign_paths() {
    let temp_dir = TempDir::new().unwrap();
    let mut api = api_in(&temp_dir, 5);
    let outside = temp_dir.path().join("claude_20240101_000000.json");
    write_document(&outside, &json!({"projects": {}}));

    for id in [
        outside.to_string_lossy().to_string(),
        "../claude_20240101_000000.json".to_string(),
        "claude_missing.json".to_string(),
    ] {
        let err = api.restore_from_backup(&id).unwrap_err();
        assert!(
            matches!(err, ApiError::StorageError(StorageError::BackupNotFound(_))),
            "{} resolved unexpectedly",
            id
        );
    }
}

#[test]
fn test_delete_backup() {
    let temp_dir = TempDir::new().unwrap();
    let api = api_in(&temp_dir, 5);
    write_document(&temp_dir.path().join(".claude.json"), &json!({"projects": {}}));
    let backup = api.create_backup().unwrap().unwrap();

    let full_path = backup.path.to_string_lossy().to_string();
    api.delete_backup(&full_path).unwrap();
    assert!(!backup.path.exists());
    assert!(matches!(
        api.delete_backup(&backup.name),
        Err(ApiError::StorageError(StorageError::BackupNotFound(_)))
    ));
}
