//! Details modal widget for displaying one destination

use crate::models::Destination;
use crate::output::{FAVORITE_MARK, coordinates, rating};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Details modal widget that overlays the results
pub struct DetailsModal<'a> {
    destination: &'a Destination,
    is_favorite: bool,
    theme: &'a Theme,
}

impl<'a> DetailsModal<'a> {
    /// Create a new details modal
    #[must_use]
    pub const fn new(destination: &'a Destination, is_favorite: bool, theme: &'a Theme) -> Self {
        Self {
            destination,
            is_favorite,
            theme,
        }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let popup_layout = Layout::vertical([
            Constraint::Percentage((100 - height.min(90)) / 2),
            Constraint::Percentage(height.min(90)),
            Constraint::Percentage((100 - height.min(90)) / 2),
        ])
        .split(area);

        Layout::horizontal([
            Constraint::Percentage((100 - width.min(90)) / 2),
            Constraint::Percentage(width.min(90)),
            Constraint::Percentage((100 - width.min(90)) / 2),
        ])
        .split(popup_layout[1])[1]
    }

    fn field(label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<11}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    }

    /// Build content lines for the modal
    fn build_content(&self) -> Vec<Line<'static>> {
        let dest = self.destination;

        let mut title = vec![Span::styled(
            dest.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if self.is_favorite {
            title.push(Span::raw(" "));
            title.push(Span::styled(FAVORITE_MARK, self.theme.favorite_style()));
        }

        let mut lines = vec![Line::from(title), Line::from("─".repeat(60)), Line::default()];

        lines.push(Self::field("District:", dest.district.clone()));
        lines.push(Self::field("Category:", dest.category.clone()));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", "Rating:"), Style::default().fg(Color::DarkGray)),
            Span::styled(rating(dest.rating), self.theme.rating_style()),
        ]));
        lines.push(Self::field(
            "Best time:",
            dest.best_time_to_visit
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ));
        lines.push(Self::field(
            "Location:",
            coordinates(dest).unwrap_or_else(|| "-".to_string()),
        ));
        if let Some(image) = &dest.image {
            lines.push(Self::field("Image:", image.clone()));
        }

        if !dest.description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::raw(dest.description.clone())));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "f: toggle favorite   Esc: close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));

        lines
    }
}

impl Widget for DetailsModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = Self::centered_rect(70, 60, area);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Destination ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_destinations;

    #[test]
    fn test_content_lists_fields() {
        let dest = sample_destinations()[0].clone().with_best_time("Jul-Sep");
        let theme = Theme::default();
        let modal = DetailsModal::new(&dest, true, &theme);

        let text: Vec<String> = modal
            .build_content()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(text[0], format!("Valley of Flowers {FAVORITE_MARK}"));
        assert!(text.iter().any(|l| l.contains("Jul-Sep")));
        assert!(text.iter().any(|l| l.contains("30.7266, 79.6053")));
        assert!(text.iter().any(|l| l.contains("Alpine meadows")));
    }
}
