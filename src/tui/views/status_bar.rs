//! Status bar
//!
//! Token status, the transient status note, and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    let token_label = |name: &str, present: bool| -> Vec<Span<'static>> {
        let (text, color) = if present {
            (format!(" {} \u{2713} ", name), Color::Green)
        } else {
            (format!(" {} \u{2717} ", name), Color::Red)
        };
        vec![Span::styled(text, Style::default().fg(color))]
    };

    spans.extend(token_label("int", !app.store.internal_token().is_empty()));
    spans.extend(token_label("ext", !app.store.external_token().is_empty()));

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw("\u{2502} "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("\u{2502} "));
    spans.push(Span::styled(
        "Tab fields \u{00b7} Enter submit \u{00b7} Esc back \u{00b7} F2 debug \u{00b7} F5 reset \u{00b7} Ctrl-C quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
