//! Directory scanning for agent files.

use super::frontmatter::parse_agent_file;
use crate::model::{Agent, AgentType};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const AGENT_FILE_EXTENSION: &str = "md";

/// Builds the agent catalog from a global directory and, optionally, a
/// project's local directory.
#[derive(Debug, Clone)]
pub struct AgentScanner {
    global_dir: PathBuf,
    project_subdir: PathBuf,
}

impl AgentScanner {
    /// `project_subdir` is joined onto a project path to find its local agents.
    pub fn new(global_dir: impl Into<PathBuf>, project_subdir: impl Into<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            project_subdir: project_subdir.into(),
        }
    }

    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    pub fn project_dir(&self, project_path: &Path) -> PathBuf {
        project_path.join(&self.project_subdir)
    }

    /// Merged catalog keyed by agent name. When `project_path` is given its
    /// agents are scanned second and replace global agents of the same name.
    pub fn scan(&self, project_path: Option<&Path>) -> BTreeMap<String, Agent> {
        let mut agents = scan_dir(&self.global_dir, AgentType::Global);
        if let Some(project_path) = project_path {
            let local = scan_dir(&self.project_dir(project_path), AgentType::Project);
            let replaced = apply_overrides(&mut agents, local);
            if !replaced.is_empty() {
                tracing::debug!(
                    project = %project_path.display(),
                    overridden = ?replaced,
                    "Project agents override global agents"
                );
            }
        }
        tracing::debug!(agents = agents.len(), "Agent scan complete");
        agents
    }
}

/// Parse every `*.md` file directly inside `dir`, in file name order.
///
/// A missing directory is an empty catalog. Files that fail to parse are
/// skipped. When two files declare the same name the later one wins.
pub fn scan_dir(dir: &Path, agent_type: AgentType) -> BTreeMap<String, Agent> {
    let mut agents = BTreeMap::new();
    if !dir.is_dir() {
        return agents;
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read directory entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(AGENT_FILE_EXTENSION)) {
            continue;
        }

        let Some(agent) = parse_agent_file(path, agent_type) else {
            continue;
        };
        if let Some(previous) = agents.insert(agent.name.clone(), agent) {
            tracing::warn!(
                "Duplicate agent name '{}' in {}, {} replaced by {}",
                previous.name,
                dir.display(),
                previous.file_path,
                path.display()
            );
        }
    }
    agents
}

/// Insert `overrides` into `base`, replacing same-named entries. Returns the
/// names that were replaced.
pub fn apply_overrides(
    base: &mut BTreeMap<String, Agent>,
    overrides: BTreeMap<String, Agent>,
) -> Vec<String> {
    let mut replaced = Vec::new();
    for (name, agent) in overrides {
        if base.insert(name.clone(), agent).is_some() {
            replaced.push(name);
        }
    }
    replaced
}
