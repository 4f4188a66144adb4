//! Manager API
//!
//! The surface a front end consumes: document CRUD, backups, agents and the
//! maintenance flows built on top of them. Owns the store and the agent
//! scanner; holds no global state.
//!
//! The edit-and-save flows apply their edit in memory before writing. When the
//! write fails the edit stays in memory and the error is returned, so a later
//! [`ManagerApi::save`] can retry it.

use crate::agent::AgentScanner;
use crate::analysis::{analyze, ProjectAnalysis};
use crate::backup::BackupInfo;
use crate::config::ManagerConfig;
use crate::error::ApiError;
use crate::mcp::{validate_server_config, McpValidation};
use crate::model::{Agent, Project};
use crate::store::{ConfigStats, ConfigStore};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

pub struct ManagerApi {
    store: ConfigStore,
    scanner: AgentScanner,
    backup_on_save: bool,
    large_history_threshold: usize,
}

impl ManagerApi {
    pub fn new(store: ConfigStore, scanner: AgentScanner) -> Self {
        Self {
            store,
            scanner,
            backup_on_save: true,
            large_history_threshold: crate::config::DEFAULT_LARGE_HISTORY_THRESHOLD,
        }
    }

    /// Build the store and scanner from resolved settings. Nothing is read
    /// from disk until [`ManagerApi::load_config`].
    pub fn from_config(config: &ManagerConfig) -> Self {
        Self::new(
            ConfigStore::from_layout(&config.store_layout()),
            config.agent_scanner(),
        )
        .with_backup_on_save(config.store.backup_on_save)
        .with_large_history_threshold(config.analysis.large_history_threshold)
    }

    pub fn with_backup_on_save(mut self, enabled: bool) -> Self {
        self.backup_on_save = enabled;
        self
    }

    pub fn with_large_history_threshold(mut self, threshold: usize) -> Self {
        self.large_history_threshold = threshold;
        self
    }

    pub fn backup_on_save(&self) -> bool {
        self.backup_on_save
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn scanner(&self) -> &AgentScanner {
        &self.scanner
    }

    pub fn load_config(&mut self) -> Result<(), ApiError> {
        Ok(self.store.load()?)
    }

    /// Save, taking a backup first when backup-on-save is enabled.
    pub fn save(&self) -> Result<(), ApiError> {
        Ok(self.store.save(self.backup_on_save)?)
    }

    pub fn projects(&self) -> BTreeMap<String, Project> {
        self.store.projects()
    }

    pub fn project(&self, path: &str) -> Result<Project, ApiError> {
        self.store
            .project(path)
            .ok_or_else(|| ApiError::ProjectNotFound(path.to_string()))
    }

    /// In-memory upsert. Call [`ManagerApi::save`] to persist.
    pub fn update_project(&mut self, project: &Project) -> Result<(), ApiError> {
        Ok(self.store.update_project(project)?)
    }

    /// In-memory removal; `false` if the project was not tracked.
    pub fn remove_project(&mut self, path: &str) -> bool {
        self.store.remove_project(path)
    }

    pub fn agents(&self, project_path: Option<&Path>) -> BTreeMap<String, Agent> {
        self.scanner.scan(project_path)
    }

    pub fn stats(&self) -> ConfigStats {
        self.store.stats()
    }

    pub fn analyze(&self) -> ProjectAnalysis {
        analyze(&self.store.projects(), self.large_history_threshold)
    }

    pub fn create_backup(&self) -> Result<Option<BackupInfo>, ApiError> {
        Ok(self.store.create_backup()?)
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, ApiError> {
        Ok(self.store.list_backups()?)
    }

    pub fn restore_from_backup(&mut self, identifier: &str) -> Result<BackupInfo, ApiError> {
        Ok(self.store.restore_from_backup(identifier)?)
    }

    pub fn delete_backup(&self, identifier: &str) -> Result<BackupInfo, ApiError> {
        Ok(self.store.delete_backup(identifier)?)
    }

    /// Remove a project and persist. Returns `false` without writing anything
    /// when the project is not tracked.
    pub fn remove_project_and_save(&mut self, path: &str) -> Result<bool, ApiError> {
        if self.store.project(path).is_none() {
            return Ok(false);
        }
        self.backup_before_edit()?;
        self.store.remove_project(path);
        self.store.save(false)?;
        Ok(true)
    }

    /// Drop a project's whole history and persist. Returns the number of
    /// entries removed.
    pub fn clear_history(&mut self, path: &str) -> Result<usize, ApiError> {
        self.edit_history(path, Project::clear_history)
    }

    /// Keep only the newest `keep` history entries and persist.
    pub fn keep_recent_history(&mut self, path: &str, keep: usize) -> Result<usize, ApiError> {
        self.edit_history(path, |project| project.keep_recent_history(keep))
    }

    fn edit_history<F>(&mut self, path: &str, edit: F) -> Result<usize, ApiError>
    where
        F: FnOnce(&mut Project) -> usize,
    {
        let mut project = self.project(path)?;
        let removed = edit(&mut project);
        if removed == 0 {
            return Ok(0);
        }
        self.backup_before_edit()?;
        self.store.update_project(&project)?;
        self.store.save(false)?;
        tracing::info!(path = %path, removed, "History trimmed");
        Ok(removed)
    }

    fn backup_before_edit(&self) -> Result<(), ApiError> {
        if self.backup_on_save {
            self.store.create_backup()?;
        }
        Ok(())
    }

    /// Validate and store a server config, renaming when `original_name`
    /// differs from `name`. The returned validation may carry notes.
    pub fn set_mcp_server(
        &mut self,
        path: &str,
        original_name: Option<&str>,
        name: &str,
        config: Value,
    ) -> Result<McpValidation, ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidMcpConfig(
                "Server name cannot be empty".to_string(),
            ));
        }
        let validation = validate_server_config(&config);
        if !validation.valid {
            return Err(ApiError::InvalidMcpConfig(
                validation.message.unwrap_or_default(),
            ));
        }

        let mut project = self.project(path)?;
        project.set_mcp_server(original_name, name, config);
        self.store.update_project(&project)?;
        self.save()?;
        Ok(validation)
    }

    /// Returns `false` without writing when the server does not exist.
    pub fn remove_mcp_server(&mut self, path: &str, name: &str) -> Result<bool, ApiError> {
        let mut project = self.project(path)?;
        if !project.remove_mcp_server(name) {
            return Ok(false);
        }
        self.store.update_project(&project)?;
        self.save()?;
        Ok(true)
    }

    /// Flip `enableAllProjectMcpServers` and persist. Returns the new value.
    pub fn toggle_all_mcp_servers(&mut self, path: &str) -> Result<bool, ApiError> {
        let mut project = self.project(path)?;
        let enabled = project.toggle_enable_all_mcp_servers();
        self.store.update_project(&project)?;
        self.save()?;
        Ok(enabled)
    }
}
