//! View rendering
//!
//! One screen per wizard step, plus the progress header, status bar, the
//! optional debug pane, and the modal alert overlay.

pub mod form;
pub mod receipt;
pub mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::widgets::alert::{alert_area, AlertDialog};

const STEP_TITLES: [&str; 5] = [
    "Transaction Setup",
    "Virtual Account Inquiry",
    "Inquiry Review",
    "Payment & Fee Transfer",
    "Receipt",
];

/// Render the whole frame
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    // Debug pane takes the right half of the body when enabled
    let body = if app.store.debug() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        render_debug(frame, app, halves[1]);
        halves[0]
    } else {
        chunks[1]
    };

    match app.store.step() {
        1 => form::render_setup(frame, app, body),
        2 => form::render_inquiry(frame, app, body),
        3 => form::render_review(frame, app, body),
        4 => form::render_payment(frame, app, body),
        _ => receipt::render(frame, app, body),
    }

    status_bar::render(frame, app, chunks[2]);

    if let Some(ref message) = app.alert {
        frame.render_widget(AlertDialog::new(message), alert_area(frame.area()));
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let step = app.store.step();
    let title = STEP_TITLES
        .get(step.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("");

    let mut spans = vec![
        Span::styled(
            " vateller ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("Step {}/{}", step, crate::store::MAX_STEP),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" \u{2502} "),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
    ];

    if app.store.loading() || app.pending.is_some() {
        spans.push(Span::raw(" \u{2502} "));
        spans.push(Span::styled(
            "Working...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_debug(frame: &mut Frame, app: &App, area: Rect) {
    let dump = serde_json::to_string_pretty(&app.store)
        .unwrap_or_else(|e| format!("state dump failed: {}", e));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Debug (F2) ");

    frame.render_widget(
        Paragraph::new(dump)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
