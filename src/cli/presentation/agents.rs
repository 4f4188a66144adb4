//! Agent presentation.

use super::shared::{format_section_heading, truncate};
use crate::cli::output::to_pretty_json;
use crate::error::ApiError;
use crate::model::Agent;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::collections::BTreeMap;

pub fn format_agents_text(agents: &BTreeMap<String, Agent>) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Agents"));
    if agents.is_empty() {
        out.push_str("No agents found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Scope", "Tools", "Description", "Advanced"]);
    for agent in agents.values() {
        let tools = if agent.tools.is_empty() {
            "(all)".to_string()
        } else {
            agent.tools_display()
        };
        table.add_row(vec![
            agent.name.clone(),
            agent.agent_type.to_string(),
            tools,
            truncate(&agent.description, 60),
            if agent.is_advanced() { "yes" } else { "" }.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\nTotal: {} agent(s)", table, agents.len()));
    out
}

pub fn format_agents_json(agents: &BTreeMap<String, Agent>) -> Result<String, ApiError> {
    let list: Vec<&Agent> = agents.values().collect();
    to_pretty_json(&list)
}
