//! Status bar widget: results counter and the latest notice

use crate::ui::theme::Theme;
use crate::view::{Notice, NoticeLevel};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget
pub struct StatusBar<'a> {
    /// Results counter, e.g. "Showing 3 destinations"
    summary: &'a str,
    /// Notice to show instead of the counter
    notice: Option<&'a Notice>,
    /// Number of favorites
    favorites: usize,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(summary: &'a str, favorites: usize, theme: &'a Theme) -> Self {
        Self {
            summary,
            notice: None,
            favorites,
            loading: false,
            theme,
        }
    }

    #[must_use]
    pub const fn with_notice(mut self, notice: Option<&'a Notice>) -> Self {
        self.notice = notice;
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn left_line(&self) -> Line<'a> {
        if let Some(notice) = self.notice {
            let (prefix, style) = match notice.level {
                NoticeLevel::Success => ("✓ ", self.theme.success_style()),
                NoticeLevel::Error => ("✗ ", self.theme.error_style()),
            };
            return Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(notice.message.as_str(), style),
            ]);
        }
        if self.loading {
            return Line::styled("Loading destinations…", self.theme.dimmed_style());
        }
        Line::raw(self.summary)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(inner);

        Paragraph::new(self.left_line()).render(chunks[0], buf);

        let favorites = Line::from(vec![
            Span::styled("♥ ", self.theme.favorite_style()),
            Span::styled(format!("{} favorites", self.favorites), self.theme.dimmed_style()),
        ]);
        Paragraph::new(favorites)
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}
