//! Event handler for the TUI
//!
//! Routes key events to field editing, step navigation, and submissions.
//! Digit fields are filtered as they are typed; display grouping happens in
//! the views, never in the stored value.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::FundTransferRequest;

use super::app::{App, PendingAction};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // A blocking alert swallows everything until dismissed
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_alert();
        }
        return Ok(());
    }

    // Global keys
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return Ok(());
        }
        KeyCode::F(2) => {
            app.store.toggle_debug();
            return Ok(());
        }
        KeyCode::F(3) if app.store.step() == 4 => {
            app.show_form_detail = !app.show_form_detail;
            app.focused_field = 0;
            return Ok(());
        }
        KeyCode::F(5) => {
            app.pending = Some(PendingAction::Reset);
            return Ok(());
        }
        KeyCode::Esc => {
            // Back one step; the store refuses at the bounds and while
            // unauthenticated
            app.store.retreat_step();
            app.focused_field = 0;
            return Ok(());
        }
        KeyCode::Enter => {
            app.pending = Some(PendingAction::Submit);
            return Ok(());
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            return Ok(());
        }
        _ => {}
    }

    // Read-only screens may quit with q
    if matches!(app.store.step(), 3 | 5) {
        if let KeyCode::Char('q') = key.code {
            app.quit();
            return Ok(());
        }
    }

    // Field editing
    match key.code {
        KeyCode::Char(c) => handle_char(app, c),
        KeyCode::Backspace => handle_backspace(app),
        KeyCode::Left | KeyCode::Right => handle_toggle(app),
        _ => {}
    }

    Ok(())
}

/// Append a character to the focused field, applying the field's mask
fn handle_char(app: &mut App, c: char) {
    if c == ' ' {
        handle_toggle(app);
        return;
    }
    if c.is_control() {
        return;
    }

    match (app.store.step(), app.focused_field) {
        // Step 1: transaction setup
        (1, 2) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().kode_bank.clone(),
            |app, v| app.store.set_kode_bank(v),
        ),
        (1, 3) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().kode_instansi.clone(),
            |app, v| app.store.set_kode_instansi(v),
        ),
        (1, 4) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().kode_produk.clone(),
            |app, v| app.store.set_kode_produk(v),
        ),
        (1, 5) => push_field(
            app,
            c,
            false,
            |app| app.store.inquiry_request().kode_kantor_tx.clone(),
            |app, v| app.store.set_kode_kantor_tx(v),
        ),

        // Step 2: inquiry target
        (2, 0) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().nomor_va.clone(),
            |app, v| app.store.set_nomor_va(v),
        ),
        (2, 1) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().nomor_identitas.clone(),
            |app, v| app.store.set_nomor_identitas(v),
        ),
        (2, 2) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().stan.clone(),
            |app, v| app.store.set_stan(v),
        ),
        (2, 3) => push_field(
            app,
            c,
            true,
            |app| app.store.inquiry_request().rrn.clone(),
            |app, v| app.store.set_rrn(v),
        ),

        // Step 4: amount is locked while the inquiry fixes it (mode "1")
        (4, 0) => {
            if app.store.mode_transaksi() != "1" && c.is_ascii_digit() {
                let mut v = app.store.payment_va_request().nominal_va.clone();
                v.push(c);
                app.store.set_nominal_va(v);
            }
        }
        (4, 1) => edit_transfer(app, |req| push_masked(&mut req.nomor_va, c, true)),
        (4, 2) => edit_transfer(app, |req| push_masked(&mut req.nominal, c, true)),
        // Source account is free text, like the remark
        (4, 3) => edit_transfer(app, |req| push_masked(&mut req.from_account, c, false)),
        (4, 4) => edit_transfer(app, |req| push_masked(&mut req.keterangan, c, false)),
        (4, 5) => edit_transfer(app, |req| push_masked(&mut req.stan, c, true)),
        (4, 6) => edit_transfer(app, |req| push_masked(&mut req.rrn, c, true)),

        _ => {}
    }
}

/// Remove the last character of the focused field
fn handle_backspace(app: &mut App) {
    match (app.store.step(), app.focused_field) {
        (1, 2) => pop_field(
            app,
            |app| app.store.inquiry_request().kode_bank.clone(),
            |app, v| app.store.set_kode_bank(v),
        ),
        (1, 3) => pop_field(
            app,
            |app| app.store.inquiry_request().kode_instansi.clone(),
            |app, v| app.store.set_kode_instansi(v),
        ),
        (1, 4) => pop_field(
            app,
            |app| app.store.inquiry_request().kode_produk.clone(),
            |app, v| app.store.set_kode_produk(v),
        ),
        (1, 5) => pop_field(
            app,
            |app| app.store.inquiry_request().kode_kantor_tx.clone(),
            |app, v| app.store.set_kode_kantor_tx(v),
        ),

        (2, 0) => pop_field(
            app,
            |app| app.store.inquiry_request().nomor_va.clone(),
            |app, v| app.store.set_nomor_va(v),
        ),
        (2, 1) => pop_field(
            app,
            |app| app.store.inquiry_request().nomor_identitas.clone(),
            |app, v| app.store.set_nomor_identitas(v),
        ),
        (2, 2) => pop_field(
            app,
            |app| app.store.inquiry_request().stan.clone(),
            |app, v| app.store.set_stan(v),
        ),
        (2, 3) => pop_field(
            app,
            |app| app.store.inquiry_request().rrn.clone(),
            |app, v| app.store.set_rrn(v),
        ),

        (4, 0) => {
            if app.store.mode_transaksi() != "1" {
                let mut v = app.store.payment_va_request().nominal_va.clone();
                v.pop();
                app.store.set_nominal_va(v);
            }
        }
        (4, 1) => edit_transfer(app, |req| {
            req.nomor_va.pop();
        }),
        (4, 2) => edit_transfer(app, |req| {
            req.nominal.pop();
        }),
        (4, 3) => edit_transfer(app, |req| {
            req.from_account.pop();
        }),
        (4, 4) => edit_transfer(app, |req| {
            req.keterangan.pop();
        }),
        (4, 5) => edit_transfer(app, |req| {
            req.stan.pop();
        }),
        (4, 6) => edit_transfer(app, |req| {
            req.rrn.pop();
        }),

        _ => {}
    }
}

/// Toggle fields (identity kind, transaction mode) on step 1
fn handle_toggle(app: &mut App) {
    if app.store.step() != 1 {
        return;
    }
    match app.focused_field {
        0 => {
            let next = if app.store.jenis_id() == 1 { 2 } else { 1 };
            app.store.set_jenis_id(next);
        }
        1 => {
            let next = if app.store.mode_transaksi() == "1" { "2" } else { "1" };
            app.store.set_mode_transaksi(next);
        }
        _ => {}
    }
}

fn push_masked(value: &mut String, c: char, digits_only: bool) {
    if digits_only && !c.is_ascii_digit() {
        return;
    }
    value.push(c);
}

fn push_field(
    app: &mut App,
    c: char,
    digits_only: bool,
    get: impl Fn(&App) -> String,
    set: impl Fn(&mut App, String),
) {
    let mut value = get(app);
    push_masked(&mut value, c, digits_only);
    set(app, value);
}

fn pop_field(app: &mut App, get: impl Fn(&App) -> String, set: impl Fn(&mut App, String)) {
    let mut value = get(app);
    value.pop();
    set(app, value);
}

/// Clone-modify-replace on the fund-transfer request, keeping the store's
/// wholesale-replacement contract
fn edit_transfer(app: &mut App, f: impl FnOnce(&mut FundTransferRequest)) {
    let mut request = app.store.fund_transfer_request().clone();
    f(&mut request);
    app.store.set_fund_transfer_request(request);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::{TellerError, TellerResult};
    use crate::gateway::{ExternalGateway, InternalGateway};
    use crate::models::{InquiryRequest, InquiryResponse, PaymentVaRequest, ResponseStatus};

    struct OfflineExternal;

    impl ExternalGateway for OfflineExternal {
        fn authenticate(&self) -> TellerResult<String> {
            Err(TellerError::gateway(503, "offline"))
        }

        fn inquiry(&self, _: &InquiryRequest, _: &str) -> TellerResult<InquiryResponse> {
            Err(TellerError::gateway(503, "offline"))
        }

        fn payment_va(&self, _: &PaymentVaRequest, _: &str) -> TellerResult<InquiryResponse> {
            Err(TellerError::gateway(503, "offline"))
        }
    }

    struct OfflineInternal;

    impl InternalGateway for OfflineInternal {
        fn authenticate(&self) -> TellerResult<String> {
            Err(TellerError::gateway(503, "offline"))
        }

        fn fund_transfer(&self, _: &FundTransferRequest, _: &str) -> TellerResult<ResponseStatus> {
            Err(TellerError::gateway(503, "offline"))
        }

        fn balance(&self, _: &str, _: &str) -> TellerResult<ResponseStatus> {
            Err(TellerError::gateway(503, "offline"))
        }
    }

    fn test_app() -> App {
        let mut app = App::new(
            Settings::default(),
            Box::new(OfflineInternal),
            Box::new(OfflineExternal),
        );
        // Editing never runs the queued startup authentication
        app.pending = None;
        app
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_event(app, Event::Key(KeyEvent::from(KeyCode::Char(c)))).unwrap();
        }
    }

    #[test]
    fn test_from_account_accepts_free_text() {
        let mut app = test_app();
        app.store.set_step(4);
        app.focused_field = 3;

        type_str(&mut app, "GL-012x");
        assert_eq!(app.store.fund_transfer_request().from_account, "GL-012x");
    }

    #[test]
    fn test_digit_fields_drop_non_digits() {
        let mut app = test_app();
        app.store.set_step(2);
        app.focused_field = 0;

        type_str(&mut app, "12ab34");
        assert_eq!(app.store.inquiry_request().nomor_va, "1234");
    }

    #[test]
    fn test_backspace_trims_from_account() {
        let mut app = test_app();
        app.store.set_step(4);
        app.focused_field = 3;

        type_str(&mut app, "acct-9");
        handle_event(&mut app, Event::Key(KeyEvent::from(KeyCode::Backspace))).unwrap();
        assert_eq!(app.store.fund_transfer_request().from_account, "acct-");
    }
}
