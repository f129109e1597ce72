//! List command - print the derived list as cards or map markers

use super::{open_view, report_notices};
use crate::cli::QueryArgs;
use crate::config::ExplorerConfig;
use crate::favorites::FavoritesBackend;
use crate::output;
use crate::view::{PresentationMode, ViewController, ViewState};
use crate::Result;

/// Execute the list command
///
/// # Errors
///
/// Returns `ExplorerError` if the source or favorites store cannot be opened.
pub async fn execute(
    config: &ExplorerConfig,
    query: &QueryArgs,
    mode: PresentationMode,
    quiet: bool,
) -> Result<()> {
    let state = ViewState {
        criteria: query.criteria(),
        sort: query.sort_or(config.default_sort),
        selection: None,
        mode,
    };

    let mut view = open_view(config, state).await?;
    report_notices(&mut view, quiet);
    print!("{}", render(&view, quiet));
    Ok(())
}

/// Text of the current derived list in the active presentation
#[must_use]
pub fn render<B: FavoritesBackend>(view: &ViewController<B>, quiet: bool) -> String {
    let mut out = String::new();

    if view.count() == 0 {
        if !quiet {
            out.push_str("No destinations found.\n");
        }
        return out;
    }

    for dest in view.derived() {
        let is_favorite = view.is_favorite(dest.id);
        let line = match view.state().mode {
            PresentationMode::Grid => output::card(dest, is_favorite, quiet),
            PresentationMode::Map => output::marker(dest, is_favorite, quiet),
        };
        out.push_str(&line);
        out.push('\n');
        if !quiet && view.state().mode == PresentationMode::Grid {
            out.push('\n');
        }
    }

    if !quiet {
        out.push_str(&view.summary());
        out.push('\n');
    }
    out
}
