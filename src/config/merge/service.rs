//! MergeService: orchestrates sources, applies merge policy, deserializes to
//! ManagerConfig.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::ManagerConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file ->
    /// environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<ManagerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, explicit)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Defaults plus one file, without the global file or the environment.
    pub fn load_from_file(path: &Path) -> Result<ManagerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, Some(path))?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
