//! MCP server presentation.

use super::shared::{format_section_heading, yes_no};
use crate::cli::output::to_pretty_json;
use crate::error::ApiError;
use crate::mcp::{template, TEMPLATE_NAMES};
use crate::model::Project;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};

pub fn format_mcp_list_text(project: &Project) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("MCP servers: {}", project.path))
    );
    if project.mcp_servers.is_empty() {
        out.push_str("No MCP servers configured.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Name", "Command", "Args"]);
        for (name, config) in &project.mcp_servers {
            let command = config.get("command").and_then(Value::as_str).unwrap_or("-");
            let args = config
                .get("args")
                .and_then(Value::as_array)
                .map(|args| {
                    args.iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            table.add_row(vec![name.clone(), command.to_string(), args]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out.push_str(&format!(
        "\nEnable all project servers: {}",
        yes_no(project.enable_all_project_mcp_servers)
    ));
    if !project.enabled_mcpjson_servers.is_empty() {
        out.push_str(&format!("\nEnabled: {}", project.enabled_mcpjson_servers.join(", ")));
    }
    if !project.disabled_mcpjson_servers.is_empty() {
        out.push_str(&format!("\nDisabled: {}", project.disabled_mcpjson_servers.join(", ")));
    }
    out
}

pub fn format_mcp_list_json(project: &Project) -> Result<String, ApiError> {
    to_pretty_json(&json!({
        "path": project.path,
        "mcpServers": project.mcp_servers,
        "enabledMcpjsonServers": project.enabled_mcpjson_servers,
        "disabledMcpjsonServers": project.disabled_mcpjson_servers,
        "enableAllProjectMcpServers": project.enable_all_project_mcp_servers,
    }))
}

pub fn format_templates_text() -> Result<String, ApiError> {
    let mut sections = Vec::new();
    for name in TEMPLATE_NAMES {
        if let Some(config) = template(name) {
            sections.push(format!("{}\n{}", format_section_heading(name), to_pretty_json(&config)?));
        }
    }
    Ok(sections.join("\n\n"))
}
