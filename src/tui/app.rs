//! Application state for the TUI
//!
//! [`App`] owns the wizard store, the two gateway clients, and the purely
//! presentational state (field focus, pending actions, the active alert).
//! Network chains run synchronously between frames: the handler queues a
//! [`PendingAction`], the loop draws one frame showing the loading state,
//! then the chain executes.

use crate::config::Settings;
use crate::flow::{self, LoadingPolicy};
use crate::gateway::{ExternalGateway, InternalGateway};
use crate::store::WizardStore;

/// Work queued by the handler for the main loop to run after a redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Submit the current step
    Submit,
    /// Reload semantics: rebuild the store and re-authenticate
    Reset,
    /// Startup (or post-reset) token acquisition
    Authenticate,
}

/// Main application state
pub struct App {
    /// The wizard store — the single source of truth
    pub store: WizardStore,

    /// Resolved settings
    pub settings: Settings,

    external: Box<dyn ExternalGateway>,
    internal: Box<dyn InternalGateway>,
    policy: LoadingPolicy,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Index of the focused form field on the current step
    pub focused_field: usize,

    /// Step 4: show the fund-transfer detail fields
    pub show_form_detail: bool,

    /// Active blocking alert, dismissed with Esc/Enter
    pub alert: Option<String>,

    /// Transient status-bar note (balance, hints)
    pub status_message: Option<String>,

    /// Action queued for the main loop
    pub pending: Option<PendingAction>,
}

impl App {
    /// Create the app in its initial state with startup authentication queued
    pub fn new(
        settings: Settings,
        internal: Box<dyn InternalGateway>,
        external: Box<dyn ExternalGateway>,
    ) -> Self {
        let policy = LoadingPolicy::from_settings(&settings);
        let mut store = WizardStore::new();

        // Settings may pin the fee source account up front
        if !settings.from_account.is_empty() {
            let mut transfer = store.fund_transfer_request().clone();
            transfer.from_account = settings.from_account.clone();
            store.set_fund_transfer_request(transfer);
        }

        Self {
            store,
            settings,
            external,
            internal,
            policy,
            should_quit: false,
            focused_field: 0,
            show_form_detail: true,
            alert: None,
            status_message: None,
            pending: Some(PendingAction::Authenticate),
        }
    }

    /// Signal the main loop to exit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Dismiss the active alert
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Number of focusable fields on the current step
    pub fn field_count(&self) -> usize {
        match self.store.step() {
            1 => 6,
            2 => 4,
            4 => {
                if self.show_form_detail {
                    7
                } else {
                    1
                }
            }
            _ => 0,
        }
    }

    /// Move focus to the next field, wrapping
    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    /// Move focus to the previous field, wrapping
    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    /// Run a queued action. Called by the main loop after it has drawn a
    /// frame, so the loading state is visible while the chain blocks.
    pub fn run_pending(&mut self, action: PendingAction) {
        match action {
            PendingAction::Authenticate => self.run_authenticate(),
            PendingAction::Submit => self.run_submit(),
            PendingAction::Reset => self.run_reset(),
        }
    }

    fn run_authenticate(&mut self) {
        let outcome = flow::authenticate(
            &mut self.store,
            self.internal.as_ref(),
            self.external.as_ref(),
            self.settings.auth_attempts,
            &self.policy,
        );
        self.alert = outcome.alert;
        if self.store.authenticated() {
            self.status_message = Some("Connected to both gateways".to_string());
        }
    }

    fn run_submit(&mut self) {
        match self.store.step() {
            1 => {
                if self.store.authenticated() {
                    self.store.advance_step();
                    self.focused_field = 0;
                } else {
                    self.alert = Some("Not authenticated — press F5 to retry".to_string());
                }
            }
            2 => {
                let outcome =
                    flow::submit_inquiry(&mut self.store, self.external.as_ref(), &self.policy);
                self.alert = outcome.alert;
                if outcome.advanced {
                    self.focused_field = 0;
                }
            }
            3 => {
                self.store.advance_step();
                self.focused_field = 0;
            }
            4 => {
                let outcome = flow::submit_payment(
                    &mut self.store,
                    self.external.as_ref(),
                    self.internal.as_ref(),
                    self.settings.auth_attempts,
                    &self.policy,
                );
                self.alert = outcome.alert;
                if outcome.advanced {
                    self.focused_field = 0;
                    self.status_message =
                        flow::check_balance(&self.store, self.internal.as_ref());
                }
            }
            _ => {}
        }
    }

    fn run_reset(&mut self) {
        self.store.reset();
        self.focused_field = 0;
        self.show_form_detail = true;
        self.alert = None;
        self.status_message = None;
        // Reload semantics: a fresh "page" authenticates again
        self.run_authenticate();
    }
}
