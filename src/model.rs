//! Entity model: projects tracked in the configuration document and agents
//! discovered on disk.
//!
//! Both records are built from loosely typed fragments (JSON for projects,
//! YAML frontmatter for agents). Missing or mistyped fields fall back to their
//! defaults instead of failing the whole record.

mod agent;
mod lenient;
mod project;

pub use agent::{Agent, AgentType, TOOLS_DISPLAY_LIMIT};
pub use project::{HistoryEntry, Project, ServerNames, MODELED_KEYS};
