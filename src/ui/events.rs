//! Event handling for the terminal UI
//!
//! Translates key presses into [`Action`]s. The mapping is a pure function of
//! the key and the current focus so it can be tested without a terminal.

use super::state::{Direction, Focus};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Something the user asked the browser to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusSearch,
    FocusResults,
    Insert(char),
    Backspace,
    CaretLeft,
    CaretRight,
    ClearSearch,
    Move(Direction),
    First,
    Last,
    OpenDetails,
    CloseDetails,
    ToggleFavorite,
    NextCategory,
    PreviousCategory,
    CycleSort,
    ToggleFavoritesOnly,
    ToggleMode,
}

/// Wait up to `timeout` for a key press
///
/// # Errors
///
/// Returns `io::Error` if the terminal cannot be read.
pub fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action
#[must_use]
pub fn map_key(key: KeyEvent, focus: Focus, details_open: bool) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if details_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseDetails),
            KeyCode::Char(' ' | 'f') => Some(Action::ToggleFavorite),
            _ => None,
        };
    }

    match focus {
        Focus::Search => map_search_key(key),
        Focus::Results => map_results_key(key),
    }
}

fn map_search_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => Some(Action::FocusResults),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Left => Some(Action::CaretLeft),
        KeyCode::Right => Some(Action::CaretRight),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearSearch)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Insert(c)),
        _ => None,
    }
}

fn map_results_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('/') | KeyCode::Tab => Action::FocusSearch,
        KeyCode::Up | KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::Move(Direction::Right),
        KeyCode::Home | KeyCode::Char('g') => Action::First,
        KeyCode::End | KeyCode::Char('G') => Action::Last,
        KeyCode::Enter => Action::OpenDetails,
        KeyCode::Char(' ' | 'f') => Action::ToggleFavorite,
        KeyCode::Char('c') => Action::NextCategory,
        KeyCode::Char('C') => Action::PreviousCategory,
        KeyCode::Char('s') => Action::CycleSort,
        KeyCode::Char('F') => Action::ToggleFavoritesOnly,
        KeyCode::Char('m') => Action::ToggleMode,
        _ => return None,
    };
    Some(action)
}
