//! Grid of destination cards

use crate::favorites::FavoriteSet;
use crate::models::Destination;
use crate::output::{FAVORITE_MARK, rating, truncate};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Minimum width of one card, borders included
pub const CARD_WIDTH: u16 = 34;

/// Height of one card, borders included
pub const CARD_HEIGHT: u16 = 6;

/// Cards per row for a grid of the given inner width
#[must_use]
pub fn columns_for(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// First row to draw so the cursor row stays visible
#[must_use]
pub fn first_visible_row(cursor: usize, columns: usize, visible_rows: usize) -> usize {
    let cursor_row = cursor / columns.max(1);
    cursor_row.saturating_sub(visible_rows.max(1) - 1)
}

pub struct CardGrid<'a> {
    items: &'a [Destination],
    favorites: &'a FavoriteSet,
    cursor: usize,
    theme: &'a Theme,
    placeholder: &'a str,
}

impl<'a> CardGrid<'a> {
    #[must_use]
    pub const fn new(
        items: &'a [Destination],
        favorites: &'a FavoriteSet,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            items,
            favorites,
            cursor,
            theme,
            placeholder: "No destinations match your filters",
        }
    }

    /// Text shown when there are no cards
    #[must_use]
    pub const fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    fn card(&self, dest: &'a Destination, width: u16, is_cursor: bool) -> Paragraph<'a> {
        let text_width = usize::from(width.saturating_sub(2));

        let mut title = vec![Span::styled(
            truncate(&dest.name, text_width.saturating_sub(2)),
            self.theme.title_style(),
        )];
        if self.favorites.contains(dest.id) {
            title.push(Span::raw(" "));
            title.push(Span::styled(FAVORITE_MARK, self.theme.favorite_style()));
        }

        let lines = vec![
            Line::from(title),
            Line::from(vec![
                Span::styled(dest.district.as_str(), self.theme.district_style()),
                Span::styled(" · ", self.theme.dimmed_style()),
                Span::styled(dest.category.as_str(), self.theme.category_style()),
            ]),
            Line::from(Span::styled(rating(dest.rating), self.theme.rating_style())),
            Line::from(Span::styled(
                truncate(&dest.description, text_width),
                self.theme.dimmed_style(),
            )),
        ];

        let border = if is_cursor {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .wrap(Wrap { trim: true })
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Destinations ");
        let inner = block.inner(area);
        block.render(area, buf);

        if self.items.is_empty() {
            Paragraph::new(Line::styled(self.placeholder, self.theme.dimmed_style()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let columns = columns_for(inner.width);
        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        let first_row = first_visible_row(self.cursor, columns, visible_rows);
        let card_width = inner.width / u16::try_from(columns).unwrap_or(1);

        let visible = self
            .items
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns);

        for (index, dest) in visible {
            let row = index / columns - first_row;
            let col = index % columns;
            let Ok(row) = u16::try_from(row) else { break };
            let Ok(col) = u16::try_from(col) else { break };

            let y = inner.y + row * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
            if height < 3 {
                break;
            }
            let rect = Rect::new(inner.x + col * card_width, y, card_width, height);
            self.card(dest, card_width, index == self.cursor)
                .render(rect, buf);
        }
    }
}
