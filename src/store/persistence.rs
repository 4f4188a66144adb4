//! Staged writes: content goes to a sibling temp file, is checked, then
//! renamed over the target.
//!
//! The temp file lives next to the target so the rename never crosses a
//! filesystem. A crash leaves at worst a stray `.tmp` file, never a truncated
//! target.

use crate::error::StorageError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TEMP_SUFFIX: &str = ".tmp";

/// Temp path used when writing `target`: the same file name plus `.tmp`.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    target.with_file_name(name)
}

/// A fully written temp file that has not yet replaced its target.
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `bytes` to the temp file and flush them to disk.
    pub fn stage(target: &Path, bytes: &[u8]) -> Result<Self, StorageError> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::io(e, format!("Failed to create directory {:?}", parent))
                })?;
            }
        }

        let temp_path = temp_path_for(target);
        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::io(
                e,
                format!("Failed to write temp file {:?}", temp_path),
            ));
        }

        Ok(Self {
            temp_path,
            target: target.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Re-read the temp file from disk and run `check` on its bytes.
    pub fn verify<F>(&self, check: F) -> Result<(), StorageError>
    where
        F: FnOnce(&[u8]) -> Result<(), StorageError>,
    {
        let bytes = fs::read(&self.temp_path).map_err(|e| {
            StorageError::io(e, format!("Failed to re-read temp file {:?}", self.temp_path))
        })?;
        check(&bytes)
    }

    /// Atomically replace the target. The temp file is removed on failure.
    pub fn commit(self) -> Result<(), StorageError> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| {
            let _ = fs::remove_file(&self.temp_path);
            StorageError::io(
                e,
                format!("Failed to rename temp file to {:?}", self.target),
            )
        })
    }

    pub fn discard(self) {
        if let Err(e) = fs::remove_file(&self.temp_path) {
            tracing::warn!("Failed to remove temp file {:?}: {}", self.temp_path, e);
        }
    }
}

/// Stage, verify with `check`, then commit. A failed check removes the temp
/// file and leaves the target untouched.
pub fn write_atomic<F>(target: &Path, bytes: &[u8], check: F) -> Result<(), StorageError>
where
    F: FnOnce(&[u8]) -> Result<(), StorageError>,
{
    let staged = StagedWrite::stage(target, bytes)?;
    if let Err(e) = staged.verify(check) {
        staged.discard();
        return Err(e);
    }
    staged.commit()
}
