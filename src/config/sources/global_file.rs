//! Global settings file: $XDG_CONFIG_HOME/claude-manager/config.toml or
//! ~/.config/claude-manager/config.toml

use crate::config::paths::xdg_root::global_config_path;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use tracing::debug;

/// Add the global settings file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.is_file() {
            builder = builder.add_source(File::from(path).required(false));
        } else {
            debug!(config_path = %path.display(), "No global settings file");
        }
    }
    Ok(builder)
}
