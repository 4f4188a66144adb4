//! Agent record built from a markdown file's YAML frontmatter.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;

/// Tools listed by name in [`Agent::tools_display`] before summarizing.
pub const TOOLS_DISPLAY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Global,
    Project,
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentType::Global => write!(f, "global"),
            AgentType::Project => write!(f, "project"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub description: String,
    pub tools: Vec<String>,
    pub file_path: String,
    pub color: Option<String>,
    pub priority: Option<String>,
    pub neural_patterns: Vec<String>,
    pub learning_enabled: bool,
    pub collective_memory: bool,
    pub hive_mind_role: Option<String>,
    pub concurrent_execution: bool,
    pub sparc_integration: bool,
    pub agent_type: AgentType,
}

impl Agent {
    pub fn new(name: impl Into<String>, agent_type: AgentType) -> Self {
        Agent {
            name: name.into(),
            description: String::new(),
            tools: Vec::new(),
            file_path: String::new(),
            color: None,
            priority: None,
            neural_patterns: Vec::new(),
            learning_enabled: false,
            collective_memory: false,
            hive_mind_role: None,
            concurrent_execution: false,
            sparc_integration: false,
            agent_type,
        }
    }

    /// Build an agent from parsed frontmatter. Frontmatter keys are snake_case.
    /// The name falls back to the file stem when absent or blank.
    pub fn from_frontmatter(frontmatter: &Mapping, file_path: &Path, agent_type: AgentType) -> Self {
        let stem = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = optional_string(frontmatter, "name").unwrap_or(stem);

        Agent {
            name,
            description: optional_string(frontmatter, "description").unwrap_or_default(),
            tools: frontmatter.get("tools").map(parse_tools).unwrap_or_default(),
            file_path: file_path.to_string_lossy().to_string(),
            color: optional_string(frontmatter, "color"),
            priority: optional_string(frontmatter, "priority"),
            neural_patterns: frontmatter
                .get("neural_patterns")
                .map(string_list)
                .unwrap_or_default(),
            learning_enabled: flag(frontmatter, "learning_enabled"),
            collective_memory: flag(frontmatter, "collective_memory"),
            hive_mind_role: optional_string(frontmatter, "hive_mind_role"),
            concurrent_execution: flag(frontmatter, "concurrent_execution"),
            sparc_integration: flag(frontmatter, "sparc_integration"),
            agent_type,
        }
    }

    pub fn is_advanced(&self) -> bool {
        !self.neural_patterns.is_empty() || self.learning_enabled || self.hive_mind_role.is_some()
    }

    /// Comma-joined tool names, summarized as `a, b, c +N more` past the limit.
    pub fn tools_display(&self) -> String {
        if self.tools.len() <= TOOLS_DISPLAY_LIMIT {
            return self.tools.join(", ");
        }
        format!(
            "{} +{} more",
            self.tools[..TOOLS_DISPLAY_LIMIT].join(", "),
            self.tools.len() - TOOLS_DISPLAY_LIMIT
        )
    }
}

/// Split a comma-separated tool string. A YAML sequence is accepted as well.
pub(crate) fn parse_tools(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Sequence(_) => string_list(value),
        _ => Vec::new(),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(scalar)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar(other).into_iter().collect(),
    }
}

fn optional_string(frontmatter: &Mapping, key: &str) -> Option<String> {
    frontmatter
        .get(key)
        .and_then(scalar)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn flag(frontmatter: &Mapping, key: &str) -> bool {
    matches!(frontmatter.get(key), Some(Value::Bool(true)))
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
