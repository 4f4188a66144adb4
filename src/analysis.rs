//! Health report over the tracked projects.

use crate::model::Project;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeHistory {
    pub path: String,
    pub history_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectAnalysis {
    /// Projects whose directory is gone
    pub missing_directories: Vec<String>,
    /// Projects with no history at all
    pub unused: Vec<String>,
    /// Largest first, then by path
    pub large_history: Vec<LargeHistory>,
    pub untrusted: Vec<String>,
    pub total_projects: usize,
    pub total_history_entries: usize,
    pub estimated_bytes: usize,
    pub large_history_threshold: usize,
}

impl ProjectAnalysis {
    pub fn is_healthy(&self) -> bool {
        self.missing_directories.is_empty()
            && self.unused.is_empty()
            && self.large_history.is_empty()
            && self.untrusted.is_empty()
    }
}

/// Classify every project. Directory checks hit the filesystem.
pub fn analyze(projects: &BTreeMap<String, Project>, large_history_threshold: usize) -> ProjectAnalysis {
    let mut report = ProjectAnalysis {
        large_history_threshold,
        ..Default::default()
    };

    for (path, project) in projects {
        let count = project.history_count();
        if !project.directory_exists() {
            report.missing_directories.push(path.clone());
        }
        if count == 0 {
            report.unused.push(path.clone());
        } else if count > large_history_threshold {
            report.large_history.push(LargeHistory {
                path: path.clone(),
                history_count: count,
            });
        }
        if !project.has_trust_dialog_accepted {
            report.untrusted.push(path.clone());
        }
        report.total_history_entries += count;
        report.estimated_bytes += project.size_estimate();
    }

    report.total_projects = projects.len();
    report.large_history.sort_by(|a, b| {
        b.history_count
            .cmp(&a.history_count)
            .then_with(|| a.path.cmp(&b.path))
    });

    tracing::debug!(
        projects = report.total_projects,
        healthy = report.is_healthy(),
        "Project analysis complete"
    );
    report
}
