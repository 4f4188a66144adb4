//! Aggregate figures over the loaded document.

use super::document::ConfigDocument;
use crate::model::Project;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigStats {
    pub total_projects: usize,
    pub total_history_entries: usize,
    pub total_mcp_servers: usize,
    /// On-disk size of the document in bytes, 0 when it does not exist.
    pub config_size: u64,
    pub num_startups: u64,
    pub first_start_time: Option<String>,
    pub user_email: Option<String>,
    pub organization: Option<String>,
}

impl ConfigStats {
    pub fn collect(
        document: &ConfigDocument,
        projects: &BTreeMap<String, Project>,
        config_size: u64,
    ) -> Self {
        let account = document.metadata_value("oauthAccount");
        ConfigStats {
            total_projects: projects.len(),
            total_history_entries: projects.values().map(Project::history_count).sum(),
            total_mcp_servers: projects.values().map(Project::mcp_server_count).sum(),
            config_size,
            num_startups: document
                .metadata_value("numStartups")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            first_start_time: document.metadata_value("firstStartTime").and_then(text),
            user_email: account.and_then(|a| a.get("emailAddress")).and_then(text),
            organization: account.and_then(|a| a.get("organizationName")).and_then(text),
        }
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
