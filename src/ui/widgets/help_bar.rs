//! Help bar widget for displaying keybind hints

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Enter", "/")
    pub key: String,
    /// Action description (e.g., "details", "search")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    /// Hints to display
    hints: &'a [KeyHint],
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints while browsing results
    #[must_use]
    pub fn results_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("←↑↓→", "move"),
            KeyHint::new("Enter", "details"),
            KeyHint::new("Space", "favorite"),
            KeyHint::new("/", "search"),
            KeyHint::new("q", "quit"),
        ]
    }

    /// Hints while typing a search
    #[must_use]
    pub fn search_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter/Esc", "done"),
            KeyHint::new("ctrl+u", "clear"),
        ]
    }

    /// Hints while the detail overlay is open
    #[must_use]
    pub fn details_hints() -> Vec<KeyHint> {
        vec![KeyHint::new("f", "favorite"), KeyHint::new("Esc", "close")]
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
