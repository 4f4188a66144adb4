//! Frontmatter extraction for agent markdown files.

use crate::model::{Agent, AgentType};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use thiserror::Error;

/// Marker line opening and closing the frontmatter block.
pub const DELIMITER: &str = "---";

/// Why a file did not produce an agent. These are skipped, never surfaced.
#[derive(Debug, Error, PartialEq)]
pub enum FrontmatterError {
    #[error("file does not start with a frontmatter delimiter")]
    MissingOpening,

    #[error("frontmatter delimiter is never closed")]
    Unterminated,

    #[error("invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("frontmatter is not a mapping")]
    NotAMapping,
}

/// Split `content` into the YAML block and the markdown body.
///
/// The first line must be exactly the delimiter (trailing whitespace allowed);
/// the block ends at the next line that is the delimiter.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next().ok_or(FrontmatterError::MissingOpening)?;
    if opening.trim_end() != DELIMITER {
        return Err(FrontmatterError::MissingOpening);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        let line_start = offset;
        offset += line.len();
        if line.trim_end() == DELIMITER {
            return Ok((&content[yaml_start..line_start], &content[offset..]));
        }
    }
    Err(FrontmatterError::Unterminated)
}

/// Parse file text into an agent.
pub fn parse_agent_str(
    content: &str,
    file_path: &Path,
    agent_type: AgentType,
) -> Result<Agent, FrontmatterError> {
    let (yaml, _body) = split_frontmatter(content)?;
    if yaml.trim().is_empty() {
        return Err(FrontmatterError::NotAMapping);
    }
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;
    let mapping: Mapping = match value {
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontmatterError::NotAMapping),
    };
    Ok(Agent::from_frontmatter(&mapping, file_path, agent_type))
}

/// Read and parse an agent file. Unreadable or malformed files yield `None`
/// after a warning.
pub fn parse_agent_file(path: &Path, agent_type: AgentType) -> Option<Agent> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read agent file {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_agent_str(&content, path, agent_type) {
        Ok(agent) => Some(agent),
        Err(e) => {
            tracing::warn!("Skipping agent file {}: {}", path.display(), e);
            None
        }
    }
}
