//! Browse command - the interactive terminal browser

use crate::cli::QueryArgs;
use crate::config::ExplorerConfig;
use crate::ui;
use crate::view::{PresentationMode, ViewController, ViewState};
use crate::Result;

/// Execute the browse command
///
/// Favorites are read before the UI starts; the dataset streams in while it
/// runs.
///
/// # Errors
///
/// Returns `ExplorerError` if the source or favorites store cannot be opened,
/// or the terminal fails.
pub async fn execute(
    config: &ExplorerConfig,
    query: &QueryArgs,
    mode: PresentationMode,
) -> Result<()> {
    let loader = config.source.build()?;
    let store = config.favorites.open_store()?;

    let state = ViewState {
        criteria: query.criteria(),
        sort: query.sort_or(config.default_sort),
        selection: None,
        mode,
    };
    let mut view = ViewController::with_state(store, state);
    view.load_favorites();

    ui::run(view, loader).await?;
    Ok(())
}
