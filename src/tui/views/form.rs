//! Step form rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::masking::{currency, virtual_account};

use super::super::app::App;
use super::super::widgets::input::FormField;

fn rows(area: Rect, count: usize) -> std::rc::Rc<[Rect]> {
    let mut constraints = vec![Constraint::Length(3); count];
    constraints.push(Constraint::Min(0));
    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area)
}

fn split2(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Step 1: identity kind, transaction mode, and routing codes
pub fn render_setup(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = rows(area, 4);
    let focus = app.focused_field;
    let req = app.store.inquiry_request();

    let jenis = if app.store.jenis_id() == 1 {
        "1 - Virtual Account Number"
    } else {
        "2 - Identity Number"
    };
    let mode = if app.store.mode_transaksi() == "1" {
        "1 - Full amount (fixed by inquiry)"
    } else {
        "2 - Open amount"
    };

    let top = split2(chunks[0]);
    frame.render_widget(FormField::new("Identity Kind", jenis).focused(focus == 0), top[0]);
    frame.render_widget(FormField::new("Transaction Mode", mode).focused(focus == 1), top[1]);

    let mid = split2(chunks[1]);
    frame.render_widget(
        FormField::new("Bank Code", &req.kode_bank).focused(focus == 2),
        mid[0],
    );
    frame.render_widget(
        FormField::new("Institution Code", &req.kode_instansi).focused(focus == 3),
        mid[1],
    );

    let bottom = split2(chunks[2]);
    frame.render_widget(
        FormField::new("Product Code", &req.kode_produk).focused(focus == 4),
        bottom[0],
    );
    frame.render_widget(
        FormField::new("Office Code", &req.kode_kantor_tx).focused(focus == 5),
        bottom[1],
    );

    render_hint(
        frame,
        chunks[3],
        "Space toggles a selection, Enter continues",
    );
}

/// Step 2: the inquiry target plus STAN/RRN sequencing
pub fn render_inquiry(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = rows(area, 3);
    let focus = app.focused_field;
    let req = app.store.inquiry_request();

    frame.render_widget(
        FormField::new("VA Number", &virtual_account(&req.nomor_va)).focused(focus == 0),
        chunks[0],
    );
    frame.render_widget(
        FormField::new("Identity Number", &req.nomor_identitas).focused(focus == 1),
        chunks[1],
    );

    let pair = split2(chunks[2]);
    frame.render_widget(FormField::new("stan", &req.stan).focused(focus == 2), pair[0]);
    frame.render_widget(FormField::new("rrn", &req.rrn).focused(focus == 3), pair[1]);
}

/// Step 3: read-only review of the inquiry answer and its fee lines
pub fn render_review(frame: &mut Frame, app: &App, area: Rect) {
    let resp = app.store.inquiry_response();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let va_number = virtual_account(&resp.nomor_va);
    let total_amount = currency(&resp.nominal_total);
    let status = format!("{} {}", resp.status, resp.message);
    let lines = vec![
        info_line("Name", &resp.nama_va),
        info_line("VA Number", &va_number),
        info_line("Total Amount", &total_amount),
        info_line("Status", &status),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Inquiry Result ");
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let rows: Vec<Row> = resp
        .additional_data
        .iter()
        .map(|fee| {
            Row::new(vec![
                fee.nama_produk.clone(),
                fee.kode_transaksi.clone(),
                fee.rekening_sumber.clone(),
                currency(&fee.nominal_va),
                currency(&fee.nominal_fee),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Product", "Tx", "Source", "Amount", "Fee"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Fee Lines "));

    frame.render_widget(table, chunks[1]);
}

/// Step 4: payment amount plus the fund-transfer detail form
pub fn render_payment(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.focused_field;
    let payment = app.store.payment_va_request();
    let transfer = app.store.fund_transfer_request();
    let amount_locked = app.store.mode_transaksi() == "1";

    let chunks = rows(area, if app.show_form_detail { 5 } else { 2 });

    frame.render_widget(
        FormField::new("Amount", &currency(&payment.nominal_va))
            .focused(focus == 0)
            .locked(amount_locked),
        chunks[0],
    );

    if app.show_form_detail {
        let r1 = split2(chunks[1]);
        frame.render_widget(
            FormField::new("VA Number", &virtual_account(&transfer.nomor_va)).focused(focus == 1),
            r1[0],
        );
        frame.render_widget(
            FormField::new("Fee", &currency(&transfer.nominal)).focused(focus == 2),
            r1[1],
        );

        let r2 = split2(chunks[2]);
        frame.render_widget(
            FormField::new("From Account", &transfer.from_account).focused(focus == 3),
            r2[0],
        );
        frame.render_widget(
            FormField::new("Detail", &transfer.keterangan).focused(focus == 4),
            r2[1],
        );

        let r3 = split2(chunks[3]);
        frame.render_widget(FormField::new("stan", &transfer.stan).focused(focus == 5), r3[0]);
        frame.render_widget(FormField::new("rrn", &transfer.rrn).focused(focus == 6), r3[1]);

        render_hint(frame, chunks[4], "F3 hides the detail form, Enter pays");
    } else {
        render_hint(frame, chunks[1], "F3 shows the detail form, Enter pays");
    }
}

fn info_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
