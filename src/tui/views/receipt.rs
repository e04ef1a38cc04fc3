//! Receipt screen (step 5)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::masking::{currency, virtual_account};

use super::super::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let inquiry = app.store.inquiry_response();
    let payment = app.store.payment_va_response();
    let transfer = app.store.fund_transfer_response();
    let request = app.store.fund_transfer_request();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(area);

    let payment_lines = vec![
        line("Name", &inquiry.nama_va),
        line("VA Number", &virtual_account(&inquiry.nomor_va)),
        line("Amount", &currency(&inquiry.nominal_total)),
        line("Status", &status_text(&payment.status, &payment.message)),
        line("STAN / RRN", &format!("{} / {}", inquiry.stan, inquiry.rrn)),
    ];
    frame.render_widget(
        Paragraph::new(payment_lines)
            .block(Block::default().borders(Borders::ALL).title(" Payment ")),
        chunks[0],
    );

    let transfer_lines = vec![
        line("From Account", &request.from_account),
        line("Fee", &currency(&request.nominal)),
        line("Status", &status_text(&transfer.status, &transfer.message)),
    ];
    frame.render_widget(
        Paragraph::new(transfer_lines)
            .block(Block::default().borders(Borders::ALL).title(" Fee Transfer ")),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "F5 starts a new transaction, q quits",
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[2],
    );
}

fn status_text(status: &str, message: &str) -> String {
    if status.is_empty() && message.is_empty() {
        "(no response)".to_string()
    } else {
        format!("{} {}", status, message)
    }
}

fn line<'a>(label: &str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:<14}", label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
