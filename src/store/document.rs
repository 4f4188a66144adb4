//! The root configuration document.

use crate::error::StorageError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

pub const PROJECTS_KEY: &str = "projects";

/// The root object, kept as one ordered map so unknown top-level keys and the
/// position of `projects` survive a load and save unchanged.
///
/// `projects` is always present and always an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// An empty document that still carries a `projects` entry.
    pub fn empty() -> Self {
        let mut root = Map::new();
        root.insert(PROJECTS_KEY.to_string(), Value::Object(Map::new()));
        Self { root }
    }

    /// Parse document bytes. The root must be an object, and `projects` (when
    /// present and not null) must be an object too.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, StorageError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| StorageError::InvalidJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_value(value, path)
    }

    pub fn from_value(value: Value, path: &Path) -> Result<Self, StorageError> {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Err(StorageError::NotAnObject(path.to_path_buf())),
        };
        match root.get_mut(PROJECTS_KEY) {
            None => {
                root.insert(PROJECTS_KEY.to_string(), Value::Object(Map::new()));
            }
            Some(slot @ Value::Null) => *slot = Value::Object(Map::new()),
            Some(Value::Object(_)) => {}
            Some(_) => return Err(StorageError::InvalidProjects(path.to_path_buf())),
        }
        Ok(Self { root })
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec_pretty(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// A top-level key other than `projects`.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        if key == PROJECTS_KEY {
            return None;
        }
        self.root.get(key)
    }

    pub fn projects(&self) -> &Map<String, Value> {
        static NO_PROJECTS: OnceLock<Map<String, Value>> = OnceLock::new();
        match self.root.get(PROJECTS_KEY) {
            Some(Value::Object(projects)) => projects,
            _ => NO_PROJECTS.get_or_init(Map::new),
        }
    }

    pub fn project_value(&self, path: &str) -> Option<&Value> {
        self.projects().get(path)
    }

    pub fn upsert_project(&mut self, path: &str, value: Value) {
        self.projects_mut().insert(path.to_string(), value);
    }

    /// Returns whether an entry was removed. Remaining entries keep their order.
    pub fn remove_project(&mut self, path: &str) -> bool {
        self.projects_mut().shift_remove(path).is_some()
    }

    fn projects_mut(&mut self) -> &mut Map<String, Value> {
        let slot = self
            .root
            .entry(PROJECTS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(projects) => projects,
            _ => unreachable!("projects slot was just set to an object"),
        }
    }
}
