//! Labeled form field widget
//!
//! Stateless: the canonical value lives in the wizard store and the caller
//! passes the already-masked display string.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A single-line form field with a bracketed label
#[derive(Debug, Clone)]
pub struct FormField<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    locked: bool,
}

impl<'a> FormField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            locked: false,
        }
    }

    /// Highlight as the focused field
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render dimmed and without a cursor (not editable right now)
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

impl Widget for FormField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else if self.locked {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("[{}]", self.label));

        let mut spans = vec![Span::styled(
            self.value,
            if self.locked {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            },
        )];
        if self.focused && !self.locked {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
