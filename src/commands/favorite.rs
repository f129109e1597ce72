//! Favorite command - toggle one destination's favorite flag

use super::{open_view, report_notices};
use crate::config::ExplorerConfig;
use crate::models::DestinationId;
use crate::view::ViewState;
use crate::Result;
use colored::Colorize;

/// Execute the favorite command
///
/// Ids missing from the dataset can still be toggled; a note is printed.
///
/// # Errors
///
/// Returns `ExplorerError` if the favorites cannot be saved.
pub async fn execute(config: &ExplorerConfig, id: DestinationId, quiet: bool) -> Result<()> {
    let mut view = open_view(config, ViewState::default()).await?;
    report_notices(&mut view, quiet);

    let result = view.toggle_favorite(id);
    report_notices(&mut view, quiet);
    let toggle = result?;

    if !quiet {
        match view.destination(id) {
            Some(dest) => println!("  {} ({} favorites)", dest.name.bold(), toggle.favorites.len()),
            None => println!(
                "  {}",
                format!("Destination {id} is not in the current dataset").yellow()
            ),
        }
    }
    Ok(())
}
