//! Categories command - list the categories present in the dataset

use super::{open_view, report_notices};
use crate::config::ExplorerConfig;
use crate::output;
use crate::query::ALL_CATEGORIES;
use crate::view::ViewState;
use crate::Result;

/// Execute the categories command
///
/// # Errors
///
/// Returns `ExplorerError` if the source or favorites store cannot be opened.
pub async fn execute(config: &ExplorerConfig, quiet: bool) -> Result<()> {
    let mut view = open_view(config, ViewState::default()).await?;
    report_notices(&mut view, quiet);

    let categories = view.categories();
    if categories.is_empty() {
        if !quiet {
            println!("No categories found.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{}", output::category(ALL_CATEGORIES, true, quiet));
    }
    for category in &categories {
        println!("{}", output::category(category, false, quiet));
    }
    Ok(())
}
