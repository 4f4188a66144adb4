//! Backup rotation never keeps more than the retention count

use claude_manager::backup::BackupManager;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn retention_bounds_backup_count(retain in 1usize..5, extra in 0usize..6) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join(".claude.json");
        let manager = BackupManager::new(temp_dir.path().join("backups"), retain);

        let mut names = Vec::new();
        for i in 0..retain + extra {
            fs::write(&source, format!("{{\"n\": {}}}", i)).unwrap();
            names.push(manager.create_backup(&source).unwrap().unwrap().name);
        }

        let listed: Vec<String> = manager.list().unwrap().into_iter().map(|b| b.name).collect();
        let expected: Vec<String> = names.into_iter().rev().take(retain).collect();
        prop_assert_eq!(listed, expected);
    }
}
