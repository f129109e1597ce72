//! Search bar widget for query input

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Byte offset of the caret in the query
    cursor: usize,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether the widget has focus
    focused: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ");

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("🔍", self.theme.dimmed_style()), Span::raw(" ")];

        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled(
                "Search destinations, districts, categories… (/)",
                self.theme.dimmed_style(),
            ));
        } else {
            let split = self.cursor.min(self.query.len());
            let (before, after) = self.query.split_at(split);
            spans.push(Span::raw(before));
            if self.focused {
                spans.push(Span::styled(
                    "│",
                    Style::default().add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            spans.push(Span::raw(after));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
