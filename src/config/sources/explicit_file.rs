//! Settings file named on the command line. It must exist.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::Message(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            Ok(builder.add_source(File::from(path).required(true)))
        }
        None => Ok(builder),
    }
}
