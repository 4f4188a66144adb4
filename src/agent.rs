//! Agent catalog: markdown files with YAML frontmatter under a global agents
//! directory and each project's local agents directory.
//!
//! Scans are never cached. Project-local agents override global ones with the
//! same name.

mod frontmatter;
mod scanner;

pub use frontmatter::{parse_agent_file, parse_agent_str, split_frontmatter, FrontmatterError, DELIMITER};
pub use scanner::{apply_overrides, scan_dir, AgentScanner, AGENT_FILE_EXTENSION};
