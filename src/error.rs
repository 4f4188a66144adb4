//! Error types for the configuration manager.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors: the primary document, its backups and agent files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Configuration file not found at {0}")]
    DocumentNotFound(PathBuf),

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    #[error("Configuration file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("The `projects` entry in {0} is not a JSON object")]
    InvalidProjects(PathBuf),

    #[error("Validation of written document failed: {0}")]
    Validation(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("Backup {id} is not a usable configuration: {message}")]
    InvalidBackup { id: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Wrap an I/O error with a message, keeping its kind.
    pub(crate) fn io(err: std::io::Error, context: impl std::fmt::Display) -> Self {
        StorageError::IoError(std::io::Error::new(
            err.kind(),
            format!("{}: {}", context, err),
        ))
    }
}

/// Errors surfaced by the manager facade and the command-line front end.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Invalid MCP server configuration: {0}")]
    InvalidMcpConfig(String),

    #[error("Unknown MCP template: {0}")]
    UnknownTemplate(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
