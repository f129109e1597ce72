//! Color theme definitions for the terminal UI
//!
//! Defines colors and styles used throughout the application.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border of the card under the cursor
    pub cursor: Color,
    /// Color for success notices
    pub success: Color,
    /// Color for error notices
    pub error: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for district names
    pub district: Color,
    /// Color for category labels
    pub category: Color,
    /// Color for ratings
    pub rating: Color,
    /// Color for the favorite marker
    pub favorite: Color,
    /// Color for map markers
    pub marker: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            district: Color::Cyan,
            category: Color::Magenta,
            rating: Color::Yellow,
            favorite: Color::Red,
            marker: Color::Green,
        }
    }

    /// Style for the cursor card border and focused inputs
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.cursor).add_modifier(Modifier::BOLD)
    }

    /// Style for destination names
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for success notices
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for error notices
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn district_style(&self) -> Style {
        Style::default().fg(self.district)
    }

    #[must_use]
    pub fn category_style(&self) -> Style {
        Style::default().fg(self.category)
    }

    #[must_use]
    pub fn rating_style(&self) -> Style {
        Style::default().fg(self.rating)
    }

    #[must_use]
    pub fn favorite_style(&self) -> Style {
        Style::default().fg(self.favorite).add_modifier(Modifier::BOLD)
    }

    /// Style for map markers; the cursor marker uses `cursor_style`
    #[must_use]
    pub fn marker_style(&self) -> Style {
        Style::default().fg(self.marker)
    }
}
