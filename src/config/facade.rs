//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ManagerConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from every source and validate them.
    pub fn load(explicit: Option<&Path>) -> Result<ManagerConfig, ApiError> {
        let config = MergeService::load(explicit)?;
        Self::validate(config)
    }

    /// Load settings from a specific file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<ManagerConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        Self::validate(config)
    }

    /// Validate settings assembled or adjusted outside the loader.
    pub fn validate(config: ManagerConfig) -> Result<ManagerConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
