//! Source composition for settings.

pub mod merge_policy;
pub mod service;
