//! Map of destination markers
//!
//! Plots every destination that has coordinates on a lon/lat canvas. The
//! marker under the cursor is highlighted and labelled with its name.

use crate::favorites::FavoriteSet;
use crate::models::Destination;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    text::Span,
    widgets::{Block, Borders, Widget, canvas::Canvas},
};

/// Longitude range of Uttarakhand, padded
pub const DEFAULT_LON: [f64; 2] = [77.4, 81.2];

/// Latitude range of Uttarakhand, padded
pub const DEFAULT_LAT: [f64; 2] = [28.6, 31.6];

const PADDING: f64 = 0.2;

/// Canvas bounds covering the state and every plotted marker
#[must_use]
pub fn bounds(items: &[Destination]) -> ([f64; 2], [f64; 2]) {
    items
        .iter()
        .filter_map(Destination::coordinates)
        .fold((DEFAULT_LON, DEFAULT_LAT), |(lon, lat), (y, x)| {
            (
                [lon[0].min(x - PADDING), lon[1].max(x + PADDING)],
                [lat[0].min(y - PADDING), lat[1].max(y + PADDING)],
            )
        })
}

pub struct MapView<'a> {
    items: &'a [Destination],
    favorites: &'a FavoriteSet,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> MapView<'a> {
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
        }
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let placed = self
            .items
            .iter()
            .filter(|d| d.coordinates().is_some())
            .count();
        let unplaced = self.items.len() - placed;

        let title = if unplaced > 0 {
            format!(" Map · {placed} markers · {unplaced} without location ")
        } else {
            format!(" Map · {placed} markers ")
        };

        let (x_bounds, y_bounds) = bounds(self.items);
        let cursor_item = self.items.get(self.cursor);

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title(title),
            )
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (index, dest) in self.items.iter().enumerate() {
                    let Some((lat, lon)) = dest.coordinates() else {
                        continue;
                    };
                    let style = if index == self.cursor {
                        self.theme.cursor_style()
                    } else if self.favorites.contains(dest.id) {
                        self.theme.favorite_style()
                    } else {
                        self.theme.marker_style()
                    };
                    let symbol = if index == self.cursor { "◉" } else { "●" };
                    ctx.print(lon, lat, Span::styled(symbol, style));
                }

                if let Some(dest) = cursor_item
                    && let Some((lat, lon)) = dest.coordinates()
                {
                    ctx.print(
                        lon + 0.06,
                        lat,
                        Span::styled(format!(" {}", dest.name), self.theme.title_style()),
                    );
                }
            })
            .render(area, buf);
    }
}
