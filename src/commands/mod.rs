//! Command implementations
//!
//! Each command is a module with an `execute` function that takes the loaded
//! configuration plus parsed CLI args and runs the operation.

pub mod browse;
pub mod categories;
pub mod clean;
pub mod config;
pub mod favorite;
pub mod list;
pub mod show;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use categories::execute as categories;
pub use clean::execute as clean;
pub use config::execute as config;
pub use favorite::execute as favorite;
pub use list::execute as list;
pub use show::execute as show;

use crate::config::ExplorerConfig;
use crate::favorites::{FavoritesBackend, SledBackend};
use crate::output;
use crate::view::{ViewController, ViewState};
use crate::Result;

/// Build the configured source and store, then fetch the dataset and favorites
///
/// A failed fetch is not an error here: it leaves an empty dataset and a
/// queued notice, exactly as in the browser.
///
/// # Errors
///
/// Returns `ExplorerError` if the source is misconfigured or the favorites
/// database cannot be opened.
pub async fn open_view(
    config: &ExplorerConfig,
    state: ViewState,
) -> Result<ViewController<SledBackend>> {
    let loader = config.source.build()?;
    let store = config.favorites.open_store()?;

    let mut view = ViewController::with_state(store, state);
    view.bootstrap(&loader).await;
    Ok(view)
}

/// Print queued notices: errors to stderr always, successes unless quiet
pub fn report_notices<B: FavoritesBackend>(view: &mut ViewController<B>, quiet: bool) {
    for notice in view.drain_notices() {
        if notice.is_error() {
            eprintln!("{}", output::notice(&notice));
        } else if !quiet {
            println!("{}", output::notice(&notice));
        }
    }
}
