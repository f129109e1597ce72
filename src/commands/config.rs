//! Config command - inspect the effective configuration

use crate::cli::ConfigCommands;
use crate::config::ExplorerConfig;
use crate::{ExplorerError, Result};
use std::path::Path;

/// Execute the config command
///
/// `path` is the file the configuration was read from.
///
/// # Errors
///
/// Returns `ExplorerError` if the configuration cannot be serialized.
pub fn execute(config: &ExplorerConfig, path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let mut shown = config.clone();
            if shown.source.api_key.is_some() {
                shown.source.api_key = Some("********".to_string());
            }
            let text = toml::to_string_pretty(&shown)
                .map_err(|e| ExplorerError::InvalidInput(format!("Failed to serialize config: {e}")))?;
            print!("{text}");
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}
