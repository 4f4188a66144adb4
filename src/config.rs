//! Configuration System
//!
//! Settings for the manager itself (where the document, backups and agents
//! live), layered from defaults, an optional global file, an optional
//! explicit file and `CLAUDE_MANAGER__*` environment variables.

use crate::agent::AgentScanner;
use crate::backup::DEFAULT_RETAIN;
use crate::logging::LoggingConfig;
use crate::store::StoreLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::{
    DEFAULT_BACKUP_DIR, DEFAULT_DOCUMENT_PATH, DEFAULT_GLOBAL_AGENTS_DIR,
    DEFAULT_LARGE_HISTORY_THRESHOLD, DEFAULT_PROJECT_AGENTS_SUBDIR,
};
pub use sources::environment::ENV_PREFIX;

/// XDG and home directory helpers
pub mod xdg {
    pub use super::paths::xdg_root::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub agents: AgentsConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document and backup locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_document_path")]
    pub document_path: PathBuf,

    /// Must differ from the document's own directory
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    #[serde(default = "default_retain_backups")]
    pub retain_backups: usize,

    /// Take a backup before every save
    #[serde(default = "default_true")]
    pub backup_on_save: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_global_agents_dir")]
    pub global_dir: PathBuf,

    /// Joined onto a project path
    #[serde(default = "default_project_agents_subdir")]
    pub project_subdir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// History length above which a project is reported as large
    #[serde(default = "default_large_history_threshold")]
    pub large_history_threshold: usize,
}

fn default_document_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_PATH)
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_DIR)
}

fn default_retain_backups() -> usize {
    DEFAULT_RETAIN
}

fn default_true() -> bool {
    true
}

fn default_global_agents_dir() -> PathBuf {
    PathBuf::from(DEFAULT_GLOBAL_AGENTS_DIR)
}

fn default_project_agents_subdir() -> PathBuf {
    PathBuf::from(DEFAULT_PROJECT_AGENTS_SUBDIR)
}

fn default_large_history_threshold() -> usize {
    DEFAULT_LARGE_HISTORY_THRESHOLD
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            backup_dir: default_backup_dir(),
            retain_backups: default_retain_backups(),
            backup_on_save: default_true(),
        }
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            global_dir: default_global_agents_dir(),
            project_subdir: default_project_agents_subdir(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            large_history_threshold: default_large_history_threshold(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Store(String),
    Agents(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::Agents(msg) => write!(f, "Agents: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.document_path.as_os_str().is_empty() {
            errors.push("Document path cannot be empty".to_string());
        }
        if self.backup_dir.as_os_str().is_empty() {
            errors.push("Backup directory cannot be empty".to_string());
        }
        if self.retain_backups == 0 {
            errors.push("retain_backups must be at least 1".to_string());
        }
        if !self.document_path.as_os_str().is_empty() && !self.backup_dir.as_os_str().is_empty() {
            let document_dir = expand(&self.document_path)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            if document_dir == expand(&self.backup_dir) {
                errors.push(format!(
                    "Backup directory {} must differ from the document's directory",
                    self.backup_dir.display()
                ));
            }
        }
        errors
    }
}

impl ManagerConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = self
            .store
            .validate()
            .into_iter()
            .map(ValidationError::Store)
            .collect();

        if self.agents.global_dir.as_os_str().is_empty() {
            errors.push(ValidationError::Agents(
                "Global agents directory cannot be empty".to_string(),
            ));
        }
        if self.agents.project_subdir.is_absolute() {
            errors.push(ValidationError::Agents(format!(
                "Project agents subdirectory must be relative, got {}",
                self.agents.project_subdir.display()
            )));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Document path, backup directory and retention with `~` expanded.
    pub fn store_layout(&self) -> StoreLayout {
        StoreLayout {
            document_path: expand(&self.store.document_path),
            backup_dir: expand(&self.store.backup_dir),
            retain_backups: self.store.retain_backups,
        }
    }

    pub fn agent_scanner(&self) -> AgentScanner {
        AgentScanner::new(
            expand(&self.agents.global_dir),
            self.agents.project_subdir.clone(),
        )
    }
}

fn expand(path: &Path) -> PathBuf {
    xdg::expand_home(path)
}
