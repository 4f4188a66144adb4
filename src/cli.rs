//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; a single route table dispatches to the manager API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{BackupCommands, Cli, Commands, HistoryCommands, McpCommands};
pub use route::RunContext;
