//! Merge rules: built-in defaults under every other source.

use crate::backup::DEFAULT_RETAIN;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_DOCUMENT_PATH: &str = "~/.claude.json";
pub const DEFAULT_BACKUP_DIR: &str = "~/.claude_backups";
pub const DEFAULT_GLOBAL_AGENTS_DIR: &str = "~/.claude/agents";
pub const DEFAULT_PROJECT_AGENTS_SUBDIR: &str = ".claude/agents";
pub const DEFAULT_LARGE_HISTORY_THRESHOLD: usize = 50;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("store.document_path", DEFAULT_DOCUMENT_PATH)?
        .set_default("store.backup_dir", DEFAULT_BACKUP_DIR)?
        .set_default("store.retain_backups", DEFAULT_RETAIN as u64)?
        .set_default("store.backup_on_save", true)?
        .set_default("agents.global_dir", DEFAULT_GLOBAL_AGENTS_DIR)?
        .set_default("agents.project_subdir", DEFAULT_PROJECT_AGENTS_SUBDIR)?
        .set_default(
            "analysis.large_history_threshold",
            DEFAULT_LARGE_HISTORY_THRESHOLD as u64,
        )
}
