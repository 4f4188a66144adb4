//! CLI parse: clap types for claude-manager. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Claude Manager CLI - inspect and maintain ~/.claude.json safely
#[derive(Parser)]
#[command(name = "claude-manager")]
#[command(version)]
#[command(about = "Inspect, clean up, back up and restore the ~/.claude.json configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (layered over the global settings file)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Configuration document to manage (default: ~/.claude.json)
    #[arg(short = 'c', long, global = true)]
    pub document: Option<PathBuf>,

    /// Do not take a backup before saving
    #[arg(long, global = true)]
    pub no_backup: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tracked projects
    Projects {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show one project in detail
    Show {
        /// Project path as stored in the document
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Stop tracking a project (backup first)
    Remove {
        /// Project path as stored in the document
        path: String,
    },
    /// Project history maintenance
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Document statistics
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Report missing directories, unused projects, large histories and untrusted projects
    Analyze {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List agents (global, plus project-local when --project is given)
    Agents {
        /// Project whose local agents override global ones
        #[arg(long)]
        project: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Backup management
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// MCP server configuration for a project
    Mcp {
        #[command(subcommand)]
        command: McpCommands,
    },
    /// Print the effective settings
    Settings {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml", value_parser = ["toml", "json"])]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Remove every history entry of a project
    Clear {
        path: String,
    },
    /// Keep only the most recent entries
    Keep {
        path: String,
        /// Number of entries to keep
        count: usize,
    },
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the document as it is on disk
    Create,
    /// List backups, newest first
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Replace the document with a backup
    Restore {
        /// Backup file name (or path inside the backup directory)
        id: String,
    },
    /// Delete a backup
    Delete {
        /// Backup file name (or path inside the backup directory)
        id: String,
    },
}

#[derive(Subcommand)]
pub enum McpCommands {
    /// List a project's MCP servers
    List {
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Add or replace a server config
    Set {
        path: String,
        /// Server name
        name: String,
        /// Server config as JSON
        #[arg(long, conflicts_with = "template", required_unless_present = "template")]
        config: Option<String>,
        /// Start from a template instead of JSON
        #[arg(long)]
        template: Option<String>,
        /// Existing server to rename
        #[arg(long)]
        rename_from: Option<String>,
    },
    /// Remove a server
    Remove {
        path: String,
        /// Server name
        name: String,
    },
    /// Toggle enableAllProjectMcpServers
    ToggleAll {
        path: String,
    },
    /// Show the available server templates
    Templates,
}
