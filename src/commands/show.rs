//! Show command - print the detail view of one destination

use super::{open_view, report_notices};
use crate::config::ExplorerConfig;
use crate::models::DestinationId;
use crate::output;
use crate::view::ViewState;
use crate::{ExplorerError, Result};

/// Execute the show command
///
/// # Errors
///
/// Returns `ExplorerError::InvalidInput` if no destination has this id.
pub async fn execute(config: &ExplorerConfig, id: DestinationId, quiet: bool) -> Result<()> {
    let mut view = open_view(config, ViewState::default()).await?;
    report_notices(&mut view, quiet);

    view.select(id);
    let dest = view
        .selected()
        .ok_or_else(|| ExplorerError::InvalidInput(format!("Destination {id} not found")))?;

    println!("{}", output::detail(dest, view.is_favorite(id)));
    Ok(())
}
