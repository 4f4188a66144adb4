//! Project presentation: list and detail, text and json.

use super::shared::{format_section_heading, truncate, yes_no};
use crate::cli::output::to_pretty_json;
use crate::error::ApiError;
use crate::model::Project;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub fn format_project_list_text(projects: &BTreeMap<String, Project>) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Projects"));
    if projects.is_empty() {
        out.push_str("No projects found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "History", "Last command", "MCP", "Trusted", "Exists"]);
    for (path, project) in projects {
        table.add_row(vec![
            path.clone(),
            project.history_count().to_string(),
            truncate(project.last_accessed().unwrap_or("-"), 40),
            project.mcp_server_count().to_string(),
            yes_no(project.has_trust_dialog_accepted).to_string(),
            yes_no(project.directory_exists()).to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\nTotal: {} project(s)", table, projects.len()));
    out
}

pub fn format_project_list_json(projects: &BTreeMap<String, Project>) -> Result<String, ApiError> {
    let rows: Vec<Value> = projects
        .iter()
        .map(|(path, project)| {
            json!({
                "path": path,
                "historyCount": project.history_count(),
                "lastAccessed": project.last_accessed(),
                "mcpServers": project.mcp_server_count(),
                "hasTrustDialogAccepted": project.has_trust_dialog_accepted,
                "directoryExists": project.directory_exists(),
            })
        })
        .collect();
    to_pretty_json(&json!({ "projects": rows, "total": projects.len() }))
}

pub fn format_project_detail_text(project: &Project) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&project.path));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Directory exists".to_string(), yes_no(project.directory_exists()).to_string()]);
    table.add_row(vec!["Trust accepted".to_string(), yes_no(project.has_trust_dialog_accepted).to_string()]);
    table.add_row(vec!["History entries".to_string(), project.history_count().to_string()]);
    table.add_row(vec![
        "Last command".to_string(),
        project.last_accessed().unwrap_or("-").to_string(),
    ]);
    table.add_row(vec!["Allowed tools".to_string(), list_or_dash(&project.allowed_tools)]);
    table.add_row(vec![
        "MCP servers".to_string(),
        list_or_dash(&project.mcp_servers.keys().cloned().collect::<Vec<_>>()),
    ]);
    table.add_row(vec![
        "Enable all project MCP servers".to_string(),
        yes_no(project.enable_all_project_mcp_servers).to_string(),
    ]);
    table.add_row(vec!["Ignore patterns".to_string(), list_or_dash(&project.ignore_patterns)]);
    table.add_row(vec![
        "Onboarding seen".to_string(),
        project.project_onboarding_seen_count.to_string(),
    ]);
    table.add_row(vec!["Don't crawl directory".to_string(), yes_no(project.dont_crawl_directory).to_string()]);
    if !project.extra.is_empty() {
        table.add_row(vec![
            "Other fields".to_string(),
            project.extra.keys().cloned().collect::<Vec<_>>().join(", "),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_project_detail_json(project: &Project) -> Result<String, ApiError> {
    let mut value = project.to_value()?;
    if let Value::Object(map) = &mut value {
        map.insert("path".to_string(), json!(project.path));
    }
    to_pretty_json(&value)
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
