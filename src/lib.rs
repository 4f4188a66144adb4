//! claude-manager: inspect and maintain the Claude configuration document
//!
//! Reads `~/.claude.json` leniently, edits projects, history and MCP server
//! entries, and writes the document back atomically with timestamped backups.
//! Agent definitions are discovered from markdown files with YAML frontmatter.

pub mod agent;
pub mod analysis;
pub mod api;
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod store;
