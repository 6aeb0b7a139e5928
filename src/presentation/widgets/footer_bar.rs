//! Key-hint footer bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line bar listing the keys the focused screen understands.
pub struct FooterBar {
    hints: Vec<(&'static str, &'static str)>,
}

impl FooterBar {
    /// Creates a bar from `(key, action)` pairs.
    #[must_use]
    pub fn new(hints: Vec<(&'static str, &'static str)>) -> Self {
        Self { hints }
    }
}

impl Widget for &FooterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (index, (key, action)) in self.hints.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {action}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
