//! Point-in-time snapshots of the configuration document.
//!
//! Each backup is a byte-for-byte copy of the document as it was on disk,
//! stored as `claude_<YYYYMMDD_HHMMSS_ffffff>.json` (UTC) in a directory
//! separate from the document. After every new backup the oldest ones beyond
//! the retention count are deleted.

use crate::error::StorageError;
use crate::store::document::ConfigDocument;
use crate::store::persistence::{write_atomic, StagedWrite};
use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const BACKUP_PREFIX: &str = "claude_";
pub const BACKUP_SUFFIX: &str = ".json";
pub const DEFAULT_RETAIN: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A backup file as found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    /// Parsed from the file name; `None` for names that do not carry one.
    pub created_at: Option<NaiveDateTime>,
    pub size: u64,
}

/// File name for a backup taken at `timestamp`.
pub fn backup_file_name(timestamp: NaiveDateTime) -> String {
    format!(
        "{}{}{}",
        BACKUP_PREFIX,
        timestamp.format(TIMESTAMP_FORMAT),
        BACKUP_SUFFIX
    )
}

/// Timestamp encoded in a backup file name. Names from older releases without
/// the microsecond part are accepted.
pub fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(BACKUP_PREFIX)?.strip_suffix(BACKUP_SUFFIX)?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, LEGACY_TIMESTAMP_FORMAT))
        .ok()
}

pub fn is_backup_name(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_SUFFIX) && name.len() > BACKUP_PREFIX.len() + BACKUP_SUFFIX.len()
}

/// Newest first; equal timestamps fall back to name order.
fn sort_newest_first(backups: &mut [BackupInfo]) {
    backups.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.name.cmp(&a.name))
    });
}

#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
    retain: usize,
}

impl BackupManager {
    /// `retain` is at least 1 so a fresh backup is never pruned by its own call.
    pub fn new(backup_dir: impl Into<PathBuf>, retain: usize) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            retain: retain.max(1),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn retain(&self) -> usize {
        self.retain
    }

    /// Copy the on-disk bytes of `source` into a new backup, then prune.
    ///
    /// Returns `Ok(None)` when `source` does not exist yet. A failed prune is
    /// logged and does not fail the backup.
    pub fn create_backup(&self, source: &Path) -> Result<Option<BackupInfo>, StorageError> {
        if !source.exists() {
            tracing::debug!(path = %source.display(), "No document on disk, nothing to back up");
            return Ok(None);
        }

        let bytes = fs::read(source)
            .map_err(|e| StorageError::io(e, format!("Failed to read {:?} for backup", source)))?;

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            StorageError::io(
                e,
                format!("Failed to create backup directory {:?}", self.backup_dir),
            )
        })?;

        let mut timestamp = self.next_timestamp()?;
        let mut path = self.backup_dir.join(backup_file_name(timestamp));
        while path.exists() {
            timestamp += Duration::microseconds(1);
            path = self.backup_dir.join(backup_file_name(timestamp));
        }

        StagedWrite::stage(&path, &bytes)?.commit()?;

        let info = BackupInfo {
            name: backup_file_name(timestamp),
            path,
            created_at: Some(timestamp),
            size: bytes.len() as u64,
        };
        tracing::info!(backup = %info.name, bytes = info.size, "Backup created");

        if let Err(e) = self.prune(self.retain) {
            tracing::warn!(error = %e, "Failed to prune old backups");
        }
        Ok(Some(info))
    }

    /// Current UTC time at microsecond precision, moved past the newest
    /// existing backup so names stay strictly increasing.
    fn next_timestamp(&self) -> Result<NaiveDateTime, StorageError> {
        let now = Utc::now().naive_utc();
        let now = now
            .with_nanosecond(now.nanosecond() / 1_000 * 1_000)
            .unwrap_or(now);
        let newest = self.list()?.into_iter().filter_map(|b| b.created_at).max();
        Ok(match newest {
            Some(newest) if newest >= now => newest + Duration::microseconds(1),
            _ => now,
        })
    }

    /// Delete every backup beyond the `retain` newest. Returns what was
    /// removed. A file that cannot be deleted is logged and skipped.
    pub fn prune(&self, retain: usize) -> Result<Vec<BackupInfo>, StorageError> {
        let backups = self.list()?;
        let mut removed = Vec::new();
        for backup in backups.into_iter().skip(retain) {
            match fs::remove_file(&backup.path) {
                Ok(()) => {
                    tracing::debug!(backup = %backup.name, "Pruned old backup");
                    removed.push(backup);
                }
                Err(e) => {
                    tracing::warn!("Failed to remove old backup {}: {}", backup.path.display(), e);
                }
            }
        }
        if !removed.is_empty() {
            tracing::info!(retained = retain, removed = removed.len(), "Pruned backups");
        }
        Ok(removed)
    }

    /// All backups, newest first. A missing directory is an empty list.
    pub fn list(&self) -> Result<Vec<BackupInfo>, StorageError> {
        if !self.backup_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            StorageError::io(
                e,
                format!("Failed to read backup directory {:?}", self.backup_dir),
            )
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.backup_dir.display(),
                        e
                    );
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_backup_name(&name) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("Failed to stat backup {}: {}", name, e);
                    continue;
                }
            };
            backups.push(BackupInfo {
                created_at: parse_backup_timestamp(&name),
                path: entry.path(),
                size: metadata.len(),
                name,
            });
        }

        sort_newest_first(&mut backups);
        Ok(backups)
    }

    /// Find a backup by bare file name, or by a path inside the backup
    /// directory.
    pub fn resolve(&self, identifier: &str) -> Result<BackupInfo, StorageError> {
        let not_found = || StorageError::BackupNotFound(identifier.to_string());
        let candidate = Path::new(identifier);
        let name = candidate
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(not_found)?;

        if candidate.components().count() > 1 {
            let parent = candidate.parent().ok_or_else(not_found)?;
            if !self.is_backup_dir(parent) {
                return Err(not_found());
            }
        }
        if !is_backup_name(name) {
            return Err(not_found());
        }

        let path = self.backup_dir.join(name);
        let metadata = fs::metadata(&path).map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }
        Ok(BackupInfo {
            name: name.to_string(),
            created_at: parse_backup_timestamp(name),
            size: metadata.len(),
            path,
        })
    }

    fn is_backup_dir(&self, dir: &Path) -> bool {
        if dir == self.backup_dir {
            return true;
        }
        match (dir.canonicalize(), self.backup_dir.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Write a backup's bytes over `target`.
    ///
    /// The backup must exist, be readable and parse as a configuration object
    /// before `target` is touched. No backup of `target` is taken here.
    pub fn restore(&self, identifier: &str, target: &Path) -> Result<BackupInfo, StorageError> {
        let info = self.resolve(identifier)?;
        let bytes = fs::read(&info.path).map_err(|e| {
            StorageError::io(e, format!("Failed to read backup {:?}", info.path))
        })?;

        let invalid = |e: StorageError| StorageError::InvalidBackup {
            id: info.name.clone(),
            message: e.to_string(),
        };
        ConfigDocument::from_bytes(&bytes, &info.path).map_err(invalid)?;

        write_atomic(target, &bytes, |written| {
            ConfigDocument::from_bytes(written, target)
                .map(|_| ())
                .map_err(|e| StorageError::Validation(e.to_string()))
        })?;

        tracing::info!(backup = %info.name, path = %target.display(), "Backup restored");
        Ok(info)
    }

    pub fn delete(&self, identifier: &str) -> Result<BackupInfo, StorageError> {
        let info = self.resolve(identifier)?;
        fs::remove_file(&info.path).map_err(|e| {
            StorageError::io(e, format!("Failed to delete backup {:?}", info.path))
        })?;
        tracing::info!(backup = %info.name, "Backup deleted");
        Ok(info)
    }
}
