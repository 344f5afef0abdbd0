//! `validate-config` command handler.

use crate::AppConfig;
use packshot_error::ConfigError;
use std::path::Path;

/// Loads the configuration and prints it as TOML.
#[tracing::instrument(skip_all)]
pub fn handle_validate_config_command(path: Option<&Path>) -> Result<(), ConfigError> {
    let config = AppConfig::load(path)?;
    println!("{}", config.to_toml()?);
    Ok(())
}
