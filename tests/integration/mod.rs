//! Integration tests for claude-manager

mod agent_scan;
mod backup_integration;
mod cli_commands;
mod settings_integration;
mod test_utils;

pub use test_utils::{with_home_env, write_document};
