//! Blocking alert dialog
//!
//! The wizard's only error surface: a modal message that swallows input
//! until dismissed.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Widget for rendering a modal alert
pub struct AlertDialog<'a> {
    message: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Alert ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new("Press Esc or Enter to dismiss")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

/// Centered area for the alert dialog
pub fn alert_area(parent: Rect) -> Rect {
    // Widened in u32: 60% of a huge terminal would wrap around in u16
    let width = ((u32::from(parent.width) * 60 / 100) as u16)
        .clamp(30, 70)
        .min(parent.width);
    let height = 7u16.min(parent.height);

    let x = parent.x + (parent.width.saturating_sub(width)) / 2;
    let y = parent.y + (parent.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_area_is_centered_and_bounded() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = alert_area(parent);
        assert!(area.width >= 30 && area.width <= 70);
        assert_eq!(area.height, 7);
        assert_eq!(area.x, (100 - area.width) / 2);
    }

    #[test]
    fn test_alert_area_very_wide_terminal() {
        let parent = Rect::new(0, 0, u16::MAX, 40);
        let area = alert_area(parent);
        assert_eq!(area.width, 70);
        assert_eq!(area.x, (u16::MAX - 70) / 2);
    }

    #[test]
    fn test_alert_area_tiny_terminal() {
        let parent = Rect::new(0, 0, 20, 4);
        let area = alert_area(parent);
        assert!(area.height <= 4);
        assert!(area.width <= parent.width);
    }
}
