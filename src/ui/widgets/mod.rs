//! Ratatui widgets for the destination browser

mod card_grid;
mod details_modal;
mod filter_bar;
mod help_bar;
mod map_view;
mod search_bar;
mod status_bar;

pub use card_grid::{CARD_HEIGHT, CARD_WIDTH, CardGrid, columns_for};
pub use details_modal::DetailsModal;
pub use filter_bar::FilterBar;
pub use help_bar::{HelpBar, KeyHint};
pub use map_view::MapView;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
