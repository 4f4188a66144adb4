//! CLI presentation: text and json formatters per command family.

mod agents;
mod backups;
mod mcp;
mod projects;
mod shared;
mod stats;

pub use agents::{format_agents_json, format_agents_text};
pub use backups::{format_backup_list_json, format_backup_list_text};
pub use mcp::{format_mcp_list_json, format_mcp_list_text, format_templates_text};
pub use projects::{
    format_project_detail_json, format_project_detail_text, format_project_list_json,
    format_project_list_text,
};
pub use stats::{format_analysis_text, format_stats_text};
