//! CLI route: single route table and run context. Dispatches to the manager API and presentation.

use crate::api::ManagerApi;
use crate::cli::output::to_pretty_json;
use crate::cli::parse::{BackupCommands, Commands, HistoryCommands, McpCommands};
use crate::cli::presentation::{
    format_agents_json, format_agents_text, format_analysis_text, format_backup_list_json,
    format_backup_list_text, format_mcp_list_json, format_mcp_list_text,
    format_project_detail_json, format_project_detail_text, format_project_list_json,
    format_project_list_text, format_stats_text, format_templates_text,
};
use crate::config::{ConfigLoader, ManagerConfig};
use crate::error::{ApiError, StorageError};
use crate::mcp::template;
use serde_json::Value;
use std::path::PathBuf;

/// Runtime context for CLI execution: resolved settings and the manager API.
/// The document is read lazily, only by commands that need it.
pub struct RunContext {
    api: ManagerApi,
    settings: ManagerConfig,
    assume_yes: bool,
    loaded: bool,
}

impl RunContext {
    /// Resolve settings (file, env, then the `--document` override) and build the API.
    pub fn new(
        settings_path: Option<PathBuf>,
        document: Option<PathBuf>,
        no_backup: bool,
        assume_yes: bool,
    ) -> Result<Self, ApiError> {
        let mut settings = ConfigLoader::load(settings_path.as_deref())?;
        if let Some(document) = document {
            settings.store.document_path = document;
            settings = ConfigLoader::validate(settings)?;
        }
        if no_backup {
            settings.store.backup_on_save = false;
        }

        let api = ManagerApi::from_config(&settings);
        tracing::debug!(
            document = %api.store().document_path().display(),
            backup_on_save = api.backup_on_save(),
            "Run context ready"
        );
        Ok(Self {
            api,
            settings,
            assume_yes,
            loaded: false,
        })
    }

    pub fn api(&self) -> &ManagerApi {
        &self.api
    }

    pub fn settings(&self) -> &ManagerConfig {
        &self.settings
    }

    fn ensure_loaded(&mut self) -> Result<(), ApiError> {
        if !self.loaded {
            self.api.load_config()?;
            self.loaded = true;
        }
        Ok(())
    }

    /// Ask before a destructive change. `--yes` answers for the user.
    fn confirm(&self, prompt: String) -> Result<bool, ApiError> {
        if self.assume_yes {
            return Ok(true);
        }
        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
    }

    /// Execute a command and return its output text.
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Projects { format } => {
                self.ensure_loaded()?;
                let projects = self.api.projects();
                if format == "json" {
                    format_project_list_json(&projects)
                } else {
                    Ok(format_project_list_text(&projects))
                }
            }
            Commands::Show { path, format } => {
                self.ensure_loaded()?;
                let project = self.api.project(path)?;
                if format == "json" {
                    format_project_detail_json(&project)
                } else {
                    Ok(format_project_detail_text(&project))
                }
            }
            Commands::Remove { path } => self.handle_remove(path),
            Commands::History { command } => self.handle_history(command),
            Commands::Stats { format } => {
                self.ensure_loaded()?;
                let stats = self.api.stats();
                if format == "json" {
                    to_pretty_json(&stats)
                } else {
                    Ok(format_stats_text(&stats))
                }
            }
            Commands::Analyze { format } => {
                self.ensure_loaded()?;
                let report = self.api.analyze();
                if format == "json" {
                    to_pretty_json(&report)
                } else {
                    Ok(format_analysis_text(&report))
                }
            }
            Commands::Agents { project, format } => {
                let agents = self.api.agents(project.as_deref());
                if format == "json" {
                    format_agents_json(&agents)
                } else {
                    Ok(format_agents_text(&agents))
                }
            }
            Commands::Backup { command } => self.handle_backup(command),
            Commands::Mcp { command } => self.handle_mcp(command),
            Commands::Settings { format } => self.handle_settings(format),
        }
    }

    fn handle_remove(&mut self, path: &str) -> Result<String, ApiError> {
        self.ensure_loaded()?;
        // Fail on unknown paths before prompting.
        self.api.project(path)?;
        if !self.confirm(format!("Stop tracking project '{}'?", path))? {
            return Ok("Removal cancelled".to_string());
        }
        self.api.remove_project_and_save(path)?;
        Ok(format!("Removed project: {}", path))
    }

    fn handle_history(&mut self, command: &HistoryCommands) -> Result<String, ApiError> {
        self.ensure_loaded()?;
        match command {
            HistoryCommands::Clear { path } => {
                let count = self.api.project(path)?.history_count();
                if count == 0 {
                    return Ok(format!("No history to clear for {}", path));
                }
                if !self.confirm(format!("Clear {} history entries of '{}'?", count, path))? {
                    return Ok("Clear cancelled".to_string());
                }
                let removed = self.api.clear_history(path)?;
                Ok(format!("Cleared {} history entries from {}", removed, path))
            }
            HistoryCommands::Keep { path, count } => {
                let current = self.api.project(path)?.history_count();
                if current <= *count {
                    return Ok(format!(
                        "{} has {} history entries; nothing to remove",
                        path, current
                    ));
                }
                let prompt = format!(
                    "Keep the {} most recent of {} history entries of '{}'?",
                    count, current, path
                );
                if !self.confirm(prompt)? {
                    return Ok("Cleanup cancelled".to_string());
                }
                let removed = self.api.keep_recent_history(path, *count)?;
                Ok(format!(
                    "Removed {} history entries from {}, kept {}",
                    removed, path, count
                ))
            }
        }
    }

    fn handle_backup(&mut self, command: &BackupCommands) -> Result<String, ApiError> {
        match command {
            BackupCommands::Create => match self.api.create_backup()? {
                Some(info) => Ok(format!("Created backup: {}", info.path.display())),
                None => Err(StorageError::DocumentNotFound(
                    self.api.store().document_path().to_path_buf(),
                )
                .into()),
            },
            BackupCommands::List { format } => {
                let backups = self.api.list_backups()?;
                if format == "json" {
                    format_backup_list_json(&backups)
                } else {
                    Ok(format_backup_list_text(&backups))
                }
            }
            BackupCommands::Restore { id } => {
                let target = self.api.store().document_path().display().to_string();
                if !self.confirm(format!("Replace {} with backup '{}'?", target, id))? {
                    return Ok("Restore cancelled".to_string());
                }
                let info = self.api.restore_from_backup(id)?;
                self.loaded = true;
                Ok(format!("Restored {} from backup {}", target, info.name))
            }
            BackupCommands::Delete { id } => {
                if !self.confirm(format!("Delete backup '{}'?", id))? {
                    return Ok("Deletion cancelled".to_string());
                }
                let info = self.api.delete_backup(id)?;
                Ok(format!("Deleted backup: {}", info.name))
            }
        }
    }

    fn handle_mcp(&mut self, command: &McpCommands) -> Result<String, ApiError> {
        if let McpCommands::Templates = command {
            return format_templates_text();
        }
        self.ensure_loaded()?;
        match command {
            McpCommands::List { path, format } => {
                let project = self.api.project(path)?;
                if format == "json" {
                    format_mcp_list_json(&project)
                } else {
                    Ok(format_mcp_list_text(&project))
                }
            }
            McpCommands::Set {
                path,
                name,
                config,
                template: template_name,
                rename_from,
            } => {
                let config = server_config(config.as_deref(), template_name.as_deref())?;
                let validation =
                    self.api
                        .set_mcp_server(path, rename_from.as_deref(), name, config)?;
                let mut out = format!("Saved MCP server '{}' for {}", name, path);
                if let Some(message) = validation.message {
                    out.push_str(&format!("\n{}", message));
                }
                Ok(out)
            }
            McpCommands::Remove { path, name } => {
                if !self.confirm(format!("Remove MCP server '{}' from '{}'?", name, path))? {
                    return Ok("Removal cancelled".to_string());
                }
                if self.api.remove_mcp_server(path, name)? {
                    Ok(format!("Removed MCP server '{}' from {}", name, path))
                } else {
                    Ok(format!("No MCP server named '{}' in {}", name, path))
                }
            }
            McpCommands::ToggleAll { path } => {
                let enabled = self.api.toggle_all_mcp_servers(path)?;
                Ok(format!(
                    "enableAllProjectMcpServers is now {} for {}",
                    enabled, path
                ))
            }
            McpCommands::Templates => format_templates_text(),
        }
    }

    fn handle_settings(&self, format: &str) -> Result<String, ApiError> {
        if format == "json" {
            return to_pretty_json(&self.settings);
        }
        toml::to_string_pretty(&self.settings)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render settings: {}", e)))
    }
}

/// Server config from `--config` JSON or a named template.
fn server_config(json: Option<&str>, template_name: Option<&str>) -> Result<Value, ApiError> {
    match (json, template_name) {
        (Some(json), _) => serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidMcpConfig(format!("Invalid JSON: {}", e))),
        (None, Some(name)) => {
            template(name).ok_or_else(|| ApiError::UnknownTemplate(name.to_string()))
        }
        (None, None) => Err(ApiError::InvalidMcpConfig(
            "Provide --config or --template".to_string(),
        )),
    }
}
