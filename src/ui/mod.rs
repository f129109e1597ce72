//! Terminal user interface
//!
//! A ratatui front end over the [`ViewController`](crate::view::ViewController).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  keys   ┌───────────┐  setters  ┌────────────────┐
//! │  crossterm   │ ──────→ │    App    │ ────────→ │ ViewController │
//! └──────────────┘         └─────┬─────┘           └───────┬────────┘
//!                                │ draw                    │ derived list
//!                                ▼                         ▼
//!                   search · filters · cards | map · status · help
//! ```
//!
//! The dataset is fetched on a tokio task and handed to the app over a
//! oneshot channel, so the first frames render a loading state.

mod app;
mod error;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::{App, run};
pub use error::{Result, UiError};
pub use events::{Action, map_key};
pub use state::{AppState, Direction, Focus};
pub use theme::Theme;
