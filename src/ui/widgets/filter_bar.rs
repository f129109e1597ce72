//! Filter controls: category, sort order and the favorites-only switch

use crate::query::{CategoryFilter, SortKey};
use crate::ui::theme::Theme;
use crate::view::PresentationMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FilterBar<'a> {
    category: &'a CategoryFilter,
    sort: SortKey,
    favorites_only: bool,
    mode: PresentationMode,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    #[must_use]
    pub const fn new(
        category: &'a CategoryFilter,
        sort: SortKey,
        favorites_only: bool,
        mode: PresentationMode,
        theme: &'a Theme,
    ) -> Self {
        Self {
            category,
            sort,
            favorites_only,
            mode,
            theme,
        }
    }

    fn control(&self, label: &'a str, value: String, key: &'a str) -> Vec<Span<'a>> {
        vec![
            Span::styled(label, self.theme.dimmed_style()),
            Span::styled(value, self.theme.title_style()),
            Span::styled(format!(" ({key})  "), self.theme.dimmed_style()),
        ]
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let favorites = if self.favorites_only { "on" } else { "off" };

        let mut spans = Vec::new();
        spans.extend(self.control("Category: ", self.category.to_string(), "c"));
        spans.extend(self.control("Sort: ", self.sort.label().to_string(), "s"));
        spans.extend(self.control("Favorites only: ", favorites.to_string(), "F"));
        spans.extend(self.control("View: ", self.mode.label().to_string(), "m"));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
