//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when the explorer is run for the first time.

use super::{ExplorerConfig, SourceConfig};
use crate::dataset::DEFAULT_TABLE;
use config::ConfigError;
use dialoguer::{Input, Password, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the dataset endpoint
///
/// Guides the user through connecting to the hosted destinations table:
/// 1. Prompts for the endpoint URL
/// 2. Prompts for the public API key (hidden input)
/// 3. Prompts for the table name (default: "destinations")
/// 4. Creates and saves the configuration
///
/// The favorites location keeps its default and can be edited in the file.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
///
/// # Examples
/// ```ignore
/// use explorer::config::first_time_setup;
///
/// let config = first_time_setup()?;
/// println!("Reading destinations from {:?}", config.source.url);
/// ```
pub fn first_time_setup() -> Result<ExplorerConfig, ConfigError> {
    println!("Welcome to the Uttarakhand explorer! Let's connect to your destinations table.\n");

    let theme = ColorfulTheme::default();

    let url: String = Input::with_theme(&theme)
        .with_prompt("Endpoint URL")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let api_key = Password::with_theme(&theme)
        .with_prompt("API key")
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let table: String = Input::with_theme(&theme)
        .with_prompt("Table")
        .default(DEFAULT_TABLE.to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = ExplorerConfig {
        source: SourceConfig {
            url: Some(url.trim().to_string()),
            api_key: Some(api_key.trim().to_string()),
            table: table.trim().to_string(),
            file: None,
        },
        ..ExplorerConfig::default()
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_signature() {
        let _: fn() -> Result<ExplorerConfig, ConfigError> = first_time_setup;
    }
}
