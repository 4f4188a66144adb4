//! Configuration store: sole owner of the in-memory document and its on-disk
//! mirror.
//!
//! Every operation returns a `Result`. Failures are logged here, at the
//! boundary, and never discard the in-memory document on save so the caller
//! can retry.

pub mod document;
pub mod persistence;
pub mod stats;

pub use document::{ConfigDocument, PROJECTS_KEY};
pub use persistence::{temp_path_for, write_atomic, StagedWrite};
pub use stats::ConfigStats;

use crate::backup::{BackupInfo, BackupManager};
use crate::error::StorageError;
use crate::model::Project;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the document and its backups live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub document_path: PathBuf,
    pub backup_dir: PathBuf,
    pub retain_backups: usize,
}

pub struct ConfigStore {
    document_path: PathBuf,
    document: ConfigDocument,
    backups: BackupManager,
}

impl ConfigStore {
    /// A store with an empty document. Call [`ConfigStore::load`] to read the
    /// file.
    pub fn new(document_path: impl Into<PathBuf>, backups: BackupManager) -> Self {
        Self {
            document_path: document_path.into(),
            document: ConfigDocument::empty(),
            backups,
        }
    }

    pub fn from_layout(layout: &StoreLayout) -> Self {
        Self::new(
            layout.document_path.clone(),
            BackupManager::new(layout.backup_dir.clone(), layout.retain_backups),
        )
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Read and parse the document.
    ///
    /// On failure (missing file, invalid JSON, non-object root) the in-memory
    /// document is reset to an empty one before the error is returned.
    pub fn load(&mut self) -> Result<(), StorageError> {
        match self.read_document() {
            Ok(document) => {
                tracing::info!(
                    path = %self.document_path.display(),
                    projects = document.projects().len(),
                    "Configuration loaded"
                );
                self.document = document;
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.document_path.display(), error = %e, "Failed to load configuration");
                self.document = ConfigDocument::empty();
                Err(e)
            }
        }
    }

    fn read_document(&self) -> Result<ConfigDocument, StorageError> {
        let bytes = fs::read(&self.document_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::DocumentNotFound(self.document_path.clone())
            } else {
                StorageError::io(e, format!("Failed to read {:?}", self.document_path))
            }
        })?;
        ConfigDocument::from_bytes(&bytes, &self.document_path)
    }

    /// Persist the in-memory document.
    ///
    /// With `create_backup` the current on-disk file is snapshotted first and
    /// a failed snapshot aborts the save. The document is written to a sibling
    /// temp file, re-read and re-parsed, then renamed over the target.
    pub fn save(&self, create_backup: bool) -> Result<(), StorageError> {
        let result = self.save_inner(create_backup);
        match &result {
            Ok(bytes) => tracing::info!(
                path = %self.document_path.display(),
                bytes = *bytes,
                "Configuration saved"
            ),
            Err(e) => tracing::error!(
                path = %self.document_path.display(),
                error = %e,
                "Failed to save configuration"
            ),
        }
        result.map(|_| ())
    }

    fn save_inner(&self, create_backup: bool) -> Result<usize, StorageError> {
        if create_backup {
            self.backups.create_backup(&self.document_path)?;
        }
        let bytes = self.document.to_bytes()?;
        let path = &self.document_path;
        write_atomic(path, &bytes, |written| {
            ConfigDocument::from_bytes(written, path)
                .map(|_| ())
                .map_err(|e| StorageError::Validation(e.to_string()))
        })?;
        Ok(bytes.len())
    }

    /// Every project with defaults filled in, keyed by path.
    pub fn projects(&self) -> BTreeMap<String, Project> {
        self.document
            .projects()
            .iter()
            .map(|(path, value)| (path.clone(), Project::from_value(path.clone(), value)))
            .collect()
    }

    pub fn project(&self, path: &str) -> Option<Project> {
        self.document
            .project_value(path)
            .map(|value| Project::from_value(path, value))
    }

    /// Insert or replace `projects[project.path]` with the project's
    /// dictionary form. Only an empty path is rejected.
    pub fn update_project(&mut self, project: &Project) -> Result<(), StorageError> {
        if project.path.is_empty() {
            return Err(StorageError::InvalidProject(
                "project path must not be empty".to_string(),
            ));
        }
        let value = project.to_value()?;
        self.document.upsert_project(&project.path, value);
        tracing::debug!(path = %project.path, "Project updated in memory");
        Ok(())
    }

    /// Returns `false` when no such project existed.
    pub fn remove_project(&mut self, path: &str) -> bool {
        let removed = self.document.remove_project(path);
        tracing::debug!(path = %path, removed, "Project removal");
        removed
    }

    /// Size of the document on disk in bytes, 0 if it does not exist.
    pub fn config_size(&self) -> u64 {
        fs::metadata(&self.document_path)
            .map(|m| m.len())
            .unwrap_or(0)
    }

    pub fn stats(&self) -> ConfigStats {
        ConfigStats::collect(&self.document, &self.projects(), self.config_size())
    }

    pub fn create_backup(&self) -> Result<Option<BackupInfo>, StorageError> {
        self.backups.create_backup(&self.document_path).map_err(|e| {
            tracing::error!(error = %e, "Failed to create backup");
            e
        })
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, StorageError> {
        self.backups.list()
    }

    /// Copy a backup over the document and reload from it.
    pub fn restore_from_backup(&mut self, identifier: &str) -> Result<BackupInfo, StorageError> {
        let info = self
            .backups
            .restore(identifier, &self.document_path)
            .map_err(|e| {
                tracing::error!(backup = %identifier, error = %e, "Failed to restore backup");
                e
            })?;
        self.load()?;
        Ok(info)
    }

    pub fn delete_backup(&self, identifier: &str) -> Result<BackupInfo, StorageError> {
        self.backups.delete(identifier)
    }
}
