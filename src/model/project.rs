//! Project record: one entry of the document's `projects` mapping.

use super::lenient;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::path::Path;

/// A single command-history record.
///
/// Only `display` is understood; every other field is carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntry(Map<String, Value>);

impl HistoryEntry {
    pub fn new(display: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("display".to_string(), Value::String(display.into()));
        HistoryEntry(fields)
    }

    /// The text shown for this entry, if it has a string `display` field.
    pub fn display(&self) -> Option<&str> {
        self.0.get("display").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for HistoryEntry {
    fn from(fields: Map<String, Value>) -> Self {
        HistoryEntry(fields)
    }
}

/// Server names in first-seen order, without repeats.
///
/// Built only through [`ServerNames::insert`] or `collect`, so the serialized
/// list always reads back as the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServerNames(Vec<String>);

impl ServerNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is already listed. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.0.iter().position(|n| n == name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for ServerNames {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for ServerNames {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut names = ServerNames::new();
        for name in iter {
            names.insert(name);
        }
        names
    }
}

impl<'a> FromIterator<&'a str> for ServerNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

/// Wire names of the fields [`Project`] models. Keys in `extra` must not use
/// them, or the flattened map would overwrite the typed value on write.
pub const MODELED_KEYS: &[&str] = &[
    "allowedTools",
    "history",
    "mcpServers",
    "enabledMcpjsonServers",
    "disabledMcpjsonServers",
    "enableAllProjectMcpServers",
    "hasTrustDialogAccepted",
    "ignorePatterns",
    "projectOnboardingSeenCount",
    "hasClaudeMdExternalIncludesApproved",
    "hasClaudeMdExternalIncludesWarningShown",
    "dontCrawlDirectory",
    "mcpContextUris",
];

/// Per-project settings keyed by filesystem path.
///
/// `path` is not part of the serialized form; it is the key the dictionary is
/// stored under. Keys this type does not model are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip)]
    pub path: String,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allowed_tools: Vec<String>,

    #[serde(default, deserialize_with = "lenient::history")]
    pub history: Vec<HistoryEntry>,

    /// Opaque server configurations, never interpreted by the store.
    #[serde(default, deserialize_with = "lenient::object")]
    pub mcp_servers: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient::server_names")]
    pub enabled_mcpjson_servers: ServerNames,

    #[serde(default, deserialize_with = "lenient::server_names")]
    pub disabled_mcpjson_servers: ServerNames,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub enable_all_project_mcp_servers: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_trust_dialog_accepted: bool,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub ignore_patterns: Vec<String>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub project_onboarding_seen_count: u64,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_claude_md_external_includes_approved: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_claude_md_external_includes_warning_shown: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub dont_crawl_directory: bool,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub mcp_context_uris: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(path: impl Into<String>) -> Self {
        Project {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Build a project from its raw dictionary, filling defaults for anything
    /// absent or mistyped. A non-object value yields an all-default project.
    pub fn from_value(path: impl Into<String>, value: &Value) -> Self {
        let path = path.into();
        let mut project = match value {
            Value::Object(_) => match serde_json::from_value::<Project>(value.clone()) {
                Ok(project) => project,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Unreadable project entry, using defaults");
                    Project::default()
                }
            },
            other => {
                tracing::debug!(path = %path, kind = %value_kind(other), "Project entry is not an object, using defaults");
                Project::default()
            }
        };
        project.path = path;
        project
    }

    /// The dictionary form stored under `projects[path]`.
    ///
    /// Fails when an `extra` key names a modeled field.
    pub fn to_value(&self) -> Result<Value, StorageError> {
        if let Some(key) = self
            .extra
            .keys()
            .find(|key| MODELED_KEYS.contains(&key.as_str()))
        {
            return Err(StorageError::InvalidProject(format!(
                "extra key '{}' of {} shadows a modeled field",
                key, self.path
            )));
        }
        serde_json::to_value(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Display text of the most recent history entry.
    pub fn last_accessed(&self) -> Option<&str> {
        self.history.last().and_then(HistoryEntry::display)
    }

    /// Live check, never cached.
    pub fn directory_exists(&self) -> bool {
        !self.path.is_empty() && Path::new(&self.path).is_dir()
    }

    /// Byte length of the compact JSON form.
    pub fn size_estimate(&self) -> usize {
        serde_json::to_vec(self).map(|bytes| bytes.len()).unwrap_or(0)
    }

    pub fn mcp_server_count(&self) -> usize {
        self.mcp_servers.len()
    }

    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }

    /// Keep the last `keep` entries and return how many were dropped.
    pub fn keep_recent_history(&mut self, keep: usize) -> usize {
        let len = self.history.len();
        if keep >= len {
            return 0;
        }
        let removed = len - keep;
        self.history.drain(..removed);
        removed
    }

    /// Insert or replace a server config. When `original_name` differs from
    /// `name`, the old entry is removed so the edit acts as a rename.
    pub fn set_mcp_server(&mut self, original_name: Option<&str>, name: &str, config: Value) {
        if let Some(original) = original_name {
            if original != name {
                self.mcp_servers.shift_remove(original);
            }
        }
        self.mcp_servers.insert(name.to_string(), config);
    }

    pub fn remove_mcp_server(&mut self, name: &str) -> bool {
        self.mcp_servers.shift_remove(name).is_some()
    }

    /// Flip `enableAllProjectMcpServers` and return the new value.
    pub fn toggle_enable_all_mcp_servers(&mut self) -> bool {
        self.enable_all_project_mcp_servers = !self.enable_all_project_mcp_servers;
        self.enable_all_project_mcp_servers
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
