//! Terminal-side state of the browser
//!
//! Everything the view controller does not own: which widget has focus, the
//! search input being edited, the grid cursor and recent status messages.

use crate::view::Notice;
use std::time::{Duration, Instant};

/// How long a notice stays in the status bar
pub const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// Widget receiving typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Cards or map markers
    #[default]
    Results,
    /// The search input
    Search,
}

/// Cursor movement in the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A notice with the time it was raised
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub notice: Notice,
    pub created: Instant,
}

impl StatusMessage {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created.elapsed() >= ttl
    }
}

/// Mutable UI state
#[derive(Debug)]
pub struct AppState {
    pub focus: Focus,
    /// Search text as typed
    pub query: String,
    /// Byte offset of the caret in `query`
    pub query_cursor: usize,
    /// Index into the derived list
    pub cursor: usize,
    /// Cards per grid row, updated on every render
    pub columns: usize,
    pub should_quit: bool,
    messages: Vec<StatusMessage>,
    message_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            focus: Focus::Results,
            query: String::new(),
            query_cursor: 0,
            cursor: 0,
            columns: 1,
            should_quit: false,
            messages: Vec::new(),
            message_ttl: MESSAGE_TTL,
        }
    }
}

impl AppState {
    /// Start with a pre-filled search query
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query_cursor: query.len(),
            query,
            ..Self::default()
        }
    }

    // --- search input ---

    pub fn insert_char(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Delete the character before the caret; false if nothing was deleted
    pub fn delete_char(&mut self) -> bool {
        let Some(prev) = self.query[..self.query_cursor].chars().next_back() else {
            return false;
        };
        self.query_cursor -= prev.len_utf8();
        self.query.remove(self.query_cursor);
        true
    }

    pub fn caret_left(&mut self) {
        if let Some(prev) = self.query[..self.query_cursor].chars().next_back() {
            self.query_cursor -= prev.len_utf8();
        }
    }

    pub fn caret_right(&mut self) {
        if let Some(next) = self.query[self.query_cursor..].chars().next() {
            self.query_cursor += next.len_utf8();
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    // --- results cursor ---

    /// Move the cursor within a list of `len` items laid out in rows
    pub fn move_cursor(&mut self, direction: Direction, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let columns = self.columns.max(1);
        let last = len - 1;
        self.cursor = match direction {
            Direction::Left => self.cursor.saturating_sub(1),
            Direction::Right => (self.cursor + 1).min(last),
            Direction::Up => self.cursor.saturating_sub(columns),
            Direction::Down => (self.cursor + columns).min(last),
        };
    }

    /// Keep the cursor inside a list of `len` items
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    // --- status messages ---

    pub fn push_notice(&mut self, notice: Notice) {
        self.messages.push(StatusMessage {
            notice,
            created: Instant::now(),
        });
    }

    /// Most recent unexpired notice
    #[must_use]
    pub fn active_message(&self) -> Option<&Notice> {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.is_expired(self.message_ttl))
            .map(|m| &m.notice)
    }

    /// Drop expired notices
    pub fn prune_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }

    #[cfg(test)]
    pub(crate) const fn set_message_ttl(&mut self, ttl: Duration) {
        self.message_ttl = ttl;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_editing_multibyte() {
        let mut state = AppState::default();
        for c in "ऋषि".chars() {
            state.insert_char(c);
        }
        state.insert_char('k');
        assert_eq!(state.query, "ऋषिk");

        state.caret_left();
        state.caret_left();
        assert!(state.delete_char());
        assert_eq!(state.query, "ऋिk");
        assert_eq!(state.query_cursor, "ऋ".len());

        state.clear_query();
        assert!(!state.delete_char());
        assert_eq!(state.query_cursor, 0);
    }

    #[test]
    fn test_with_query_places_caret_at_end() {
        let state = AppState::with_query("lake");
        assert_eq!(state.query_cursor, 4);
    }

    #[test]
    fn test_grid_navigation() {
        let mut state = AppState {
            columns: 3,
            ..AppState::default()
        };
        state.move_cursor(Direction::Down, 7);
        assert_eq!(state.cursor, 3);
        state.move_cursor(Direction::Down, 7);
        assert_eq!(state.cursor, 6);
        state.move_cursor(Direction::Down, 7);
        assert_eq!(state.cursor, 6);
        state.move_cursor(Direction::Right, 7);
        assert_eq!(state.cursor, 6);
        state.move_cursor(Direction::Up, 7);
        assert_eq!(state.cursor, 3);
        state.move_cursor(Direction::Left, 7);
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_cursor_on_empty_list() {
        let mut state = AppState {
            cursor: 5,
            ..AppState::default()
        };
        state.move_cursor(Direction::Down, 0);
        assert_eq!(state.cursor, 0);

        state.cursor = 9;
        state.clamp_cursor(4);
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn test_messages_expire() {
        let mut state = AppState::default();
        state.push_notice(Notice::success("Added to favorites"));
        assert_eq!(
            state.active_message().map(|n| n.message.as_str()),
            Some("Added to favorites")
        );

        state.set_message_ttl(Duration::ZERO);
        assert!(state.active_message().is_none());
        state.prune_messages();
        assert!(state.messages.is_empty());
    }
}
