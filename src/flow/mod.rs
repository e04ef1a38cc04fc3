//! Step submission flows
//!
//! Each wizard screen that talks to a backend submits through a function in
//! this module: a strictly sequential call chain operating on the store, with
//! the outcome (advanced or not, plus an optional alert) handed back to the
//! TUI for display. The chains deliberately keep the observed production
//! semantics, including the asymmetric error handling on the payment step:
//! a failed first call never advances, a failed downstream fund transfer
//! still advances and keeps the upstream payment payload.

use std::thread;
use std::time::Duration;

use crate::config::Settings;
use crate::error::{TellerError, TellerResult};
use crate::gateway::{ExternalGateway, InternalGateway};
use crate::masking::only_digits;
use crate::models::{FundTransferRequest, PaymentVaRequest, ResponseStatus};
use crate::store::WizardStore;

/// Minimum visible loading duration. Responses are held back until this much
/// time has passed so the loading state does not flicker. Zero disables the
/// hold entirely (tests).
#[derive(Debug, Clone, Copy)]
pub struct LoadingPolicy {
    min_visible: Duration,
}

impl LoadingPolicy {
    pub fn new(min_visible: Duration) -> Self {
        Self { min_visible }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Duration::from_millis(settings.min_loading_ms))
    }

    /// No hold at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Block until the minimum visible duration has passed
    fn settle(&self) {
        if !self.min_visible.is_zero() {
            thread::sleep(self.min_visible);
        }
    }
}

/// What a submission did, as the TUI needs to know it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether the wizard moved forward one step
    pub advanced: bool,
    /// Blocking alert to show, if any
    pub alert: Option<String>,
}

impl SubmitOutcome {
    fn advanced() -> Self {
        Self {
            advanced: true,
            alert: None,
        }
    }

    fn advanced_with_alert(alert: impl Into<String>) -> Self {
        Self {
            advanced: true,
            alert: Some(alert.into()),
        }
    }

    fn blocked(alert: impl Into<String>) -> Self {
        Self {
            advanced: false,
            alert: Some(alert.into()),
        }
    }

    fn quiet() -> Self {
        Self {
            advanced: false,
            alert: None,
        }
    }
}

/// Bounded token acquisition: an explicit counted loop, no backoff. Fails
/// with a single [`TellerError::Auth`] once the budget is spent.
fn acquire_token<F>(
    backend: &'static str,
    attempts: u32,
    mut authenticate: F,
) -> TellerResult<String>
where
    F: FnMut() -> TellerResult<String>,
{
    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        match authenticate() {
            Ok(token) => return Ok(token),
            Err(err) => {
                tracing::warn!(backend, attempt, error = %err, "token acquisition failed");
            }
        }
    }
    Err(TellerError::Auth { backend, attempts })
}

/// Startup authentication against both backends. Tokens gate all step
/// movement, so nothing else can happen until this succeeds.
pub fn authenticate(
    store: &mut WizardStore,
    internal: &dyn InternalGateway,
    external: &dyn ExternalGateway,
    attempts: u32,
    policy: &LoadingPolicy,
) -> SubmitOutcome {
    store.set_loading(true);

    match acquire_token("external", attempts, || external.authenticate()) {
        Ok(token) => store.set_external_token(token),
        Err(err) => {
            tracing::error!(error = %err, "external authentication exhausted");
            policy.settle();
            store.set_loading(false);
            return SubmitOutcome::blocked("Failed get external token");
        }
    }

    match acquire_token("internal", attempts, || internal.authenticate()) {
        Ok(token) => store.set_internal_token(token),
        Err(err) => {
            tracing::error!(error = %err, "internal authentication exhausted");
            policy.settle();
            store.set_loading(false);
            return SubmitOutcome::blocked("Failed get internal token");
        }
    }

    policy.settle();
    store.set_loading(false);
    SubmitOutcome::quiet()
}

/// Step 2: inquire the virtual account and seed the payment and fund-transfer
/// requests from the answer.
pub fn submit_inquiry(
    store: &mut WizardStore,
    external: &dyn ExternalGateway,
    policy: &LoadingPolicy,
) -> SubmitOutcome {
    // Inquiry target depends on the identity kind chosen on step 1
    if store.jenis_id() == 1 {
        if store.inquiry_request().nomor_va.is_empty() {
            return SubmitOutcome::blocked("Nomor VA can't be empty");
        }
    } else if store.inquiry_request().nomor_identitas.is_empty() {
        return SubmitOutcome::blocked("Nomor identitas can't be empty");
    }

    store.set_loading(true);

    let response = match external.inquiry(store.inquiry_request(), store.external_token()) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "inquiry failed");
            policy.settle();
            store.set_loading(false);
            return SubmitOutcome::blocked("Inquiry VA failed");
        }
    };

    // Pre-seed the payment leg from the inquiry answer
    let mut payment = PaymentVaRequest {
        nomor_va: response.nomor_va.clone(),
        nominal_va: only_digits(&response.nominal_total),
        kode_kantor_tx: store.inquiry_request().kode_kantor_tx.clone(),
        kode_bank: store.inquiry_request().kode_bank.clone(),
        stan: response.stan.clone(),
        rrn: response.rrn.clone(),
        ..Default::default()
    };

    // Fresh transfer request keeps its seeded timestamp and STAN/RRN
    let mut transfer = FundTransferRequest {
        nomor_va: response.nomor_va.clone(),
        from_account: store.fund_transfer_request().from_account.clone(),
        ..Default::default()
    };

    if let Some(fee) = response.additional_data.first() {
        payment.kode_transaksi = fee.kode_transaksi.clone();
        transfer.nominal = only_digits(&fee.nominal_fee);
        if !fee.rekening_sumber.is_empty() {
            transfer.from_account = fee.rekening_sumber.clone();
        }
    }

    policy.settle();
    store.set_payment_va_request(payment);
    store.set_fund_transfer_request(transfer);
    store.set_inquiry_response(response);
    store.set_loading(false);
    store.advance_step();
    SubmitOutcome::advanced()
}

/// Step 4: pay the virtual account, re-authenticate against the internal
/// ledger, then collect the fee.
///
/// Error semantics are asymmetric and deliberate:
/// - amount guard fails: abort with an alert, `loading` stays set;
/// - payment call fails: alert, nothing committed, no advance;
/// - internal re-auth exhausts its budget: alert, nothing committed, no
///   advance, the fund transfer is never issued;
/// - fund transfer fails after a successful payment: the payment payload is
///   still committed to both response records, the step still advances, and
///   the alert reports only the fee failure.
pub fn submit_payment(
    store: &mut WizardStore,
    external: &dyn ExternalGateway,
    internal: &dyn InternalGateway,
    auth_attempts: u32,
    policy: &LoadingPolicy,
) -> SubmitOutcome {
    store.set_loading(true);

    // Amount guard. The abort path leaves `loading` set; screens observe
    // this today and resetting it here would change visible behavior.
    let nominal = store.payment_va_request().nominal_va.clone();
    if nominal.is_empty() {
        return SubmitOutcome::blocked("Nominal VA can't be empty");
    }
    match nominal.parse::<i64>() {
        Ok(n) if n > 0 => {}
        _ => return SubmitOutcome::blocked("Nominal VA should be greater than 0"),
    }

    let payload = match external.payment_va(store.payment_va_request(), store.external_token()) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "payment VA failed");
            policy.settle();
            store.set_loading(false);
            return SubmitOutcome::blocked("Payment VA failed");
        }
    };

    // Fresh internal token before the transfer leg
    let token = match acquire_token("internal", auth_attempts, || internal.authenticate()) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(error = %err, "internal re-authentication exhausted");
            policy.settle();
            store.set_loading(false);
            return SubmitOutcome::blocked("Failed get internal token");
        }
    };
    store.set_internal_token(token.clone());

    match internal.fund_transfer(store.fund_transfer_request(), &token) {
        Ok(status) => {
            policy.settle();
            store.set_payment_va_response(ResponseStatus::from(&payload));
            store.set_inquiry_response(payload);
            store.set_fund_transfer_response(status);
            store.set_loading(false);
            store.advance_step();
            SubmitOutcome::advanced()
        }
        Err(err) => {
            tracing::warn!(error = %err, "fund transfer failed after successful payment");
            policy.settle();
            store.set_payment_va_response(ResponseStatus::from(&payload));
            store.set_inquiry_response(payload);
            store.set_loading(false);
            store.advance_step();
            SubmitOutcome::advanced_with_alert("Fund Transfer fee failed")
        }
    }
}

/// Step 5 supplement: fetch the fee source account's balance for the receipt.
/// Failures degrade to a status note, never a blocking alert.
pub fn check_balance(store: &WizardStore, internal: &dyn InternalGateway) -> Option<String> {
    let account = store.fund_transfer_request().from_account.clone();
    if account.is_empty() {
        return None;
    }

    match internal.balance(&account, store.internal_token()) {
        Ok(status) => Some(format!("Account {}: {}", account, status.message)),
        Err(err) => {
            tracing::warn!(error = %err, account, "balance lookup failed");
            Some("Balance unavailable".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::error::TellerError;
    use crate::models::{FeeLine, InquiryRequest, InquiryResponse};

    fn gateway_error() -> TellerError {
        TellerError::gateway(500, "boom")
    }

    #[derive(Default)]
    struct FakeExternal {
        auth_calls: Cell<u32>,
        inquiry_calls: Cell<u32>,
        payment_calls: Cell<u32>,
        fail_auth: bool,
        fail_inquiry: bool,
        fail_payment: bool,
        payload: InquiryResponse,
    }

    impl ExternalGateway for FakeExternal {
        fn authenticate(&self) -> TellerResult<String> {
            self.auth_calls.set(self.auth_calls.get() + 1);
            if self.fail_auth {
                Err(gateway_error())
            } else {
                Ok("ext-token".to_string())
            }
        }

        fn inquiry(&self, _: &InquiryRequest, _: &str) -> TellerResult<InquiryResponse> {
            self.inquiry_calls.set(self.inquiry_calls.get() + 1);
            if self.fail_inquiry {
                Err(gateway_error())
            } else {
                Ok(self.payload.clone())
            }
        }

        fn payment_va(&self, _: &PaymentVaRequest, _: &str) -> TellerResult<InquiryResponse> {
            self.payment_calls.set(self.payment_calls.get() + 1);
            if self.fail_payment {
                Err(gateway_error())
            } else {
                Ok(self.payload.clone())
            }
        }
    }

    #[derive(Default)]
    struct FakeInternal {
        auth_calls: Cell<u32>,
        transfer_calls: Cell<u32>,
        /// Fail this many auth attempts before succeeding
        fail_auth_times: u32,
        fail_transfer: bool,
        transfer_token_seen: RefCell<Option<String>>,
    }

    impl InternalGateway for FakeInternal {
        fn authenticate(&self) -> TellerResult<String> {
            let call = self.auth_calls.get() + 1;
            self.auth_calls.set(call);
            if call <= self.fail_auth_times {
                Err(gateway_error())
            } else {
                Ok(format!("int-token-{}", call))
            }
        }

        fn fund_transfer(
            &self,
            _: &FundTransferRequest,
            token: &str,
        ) -> TellerResult<ResponseStatus> {
            self.transfer_calls.set(self.transfer_calls.get() + 1);
            *self.transfer_token_seen.borrow_mut() = Some(token.to_string());
            if self.fail_transfer {
                Err(gateway_error())
            } else {
                Ok(ResponseStatus {
                    message: "fee collected".to_string(),
                    status: "00".to_string(),
                })
            }
        }

        fn balance(&self, _: &str, _: &str) -> TellerResult<ResponseStatus> {
            Ok(ResponseStatus {
                message: "1.000.000".to_string(),
                status: "00".to_string(),
            })
        }
    }

    fn payment_payload() -> InquiryResponse {
        InquiryResponse {
            nomor_va: "8808123456789012".to_string(),
            nominal_total: "150000".to_string(),
            message: "payment ok".to_string(),
            nama_va: "BUDI SANTOSO".to_string(),
            status: "00".to_string(),
            stan: "210596".to_string(),
            rrn: "110480000002".to_string(),
            ..Default::default()
        }
    }

    fn store_at_payment_step() -> WizardStore {
        let mut store = WizardStore::new();
        store.set_internal_token("stale-int-token");
        store.set_external_token("ext-token");
        store.set_step(4);
        store.set_nominal_va("150000");
        store
    }

    // === authenticate ===

    #[test]
    fn test_authenticate_sets_both_tokens() {
        let mut store = WizardStore::new();
        let external = FakeExternal::default();
        let internal = FakeInternal::default();

        let outcome = authenticate(&mut store, &internal, &external, 3, &LoadingPolicy::none());

        assert_eq!(outcome, SubmitOutcome::quiet());
        assert!(store.authenticated());
        assert!(!store.loading());
        assert_eq!(external.auth_calls.get(), 1);
        assert_eq!(internal.auth_calls.get(), 1);
    }

    #[test]
    fn test_authenticate_external_failure_blocks() {
        let mut store = WizardStore::new();
        let external = FakeExternal {
            fail_auth: true,
            ..Default::default()
        };
        let internal = FakeInternal::default();

        let outcome = authenticate(&mut store, &internal, &external, 3, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Failed get external token"));
        assert!(!store.authenticated());
        assert!(!store.loading());
        // Bounded retry: exactly the budget, and the internal backend
        // is never consulted
        assert_eq!(external.auth_calls.get(), 3);
        assert_eq!(internal.auth_calls.get(), 0);
    }

    // === submit_inquiry ===

    #[test]
    fn test_inquiry_success_seeds_payment_and_transfer() {
        let mut store = WizardStore::new();
        store.set_internal_token("int");
        store.set_external_token("ext");
        store.set_step(2);
        store.set_nomor_va("8808123456789012");
        store.set_kode_bank("014");

        let mut payload = payment_payload();
        payload.additional_data.push(FeeLine {
            kode_transaksi: "21".to_string(),
            nominal_fee: "2500".to_string(),
            rekening_sumber: "002200".to_string(),
            ..Default::default()
        });
        let external = FakeExternal {
            payload,
            ..Default::default()
        };

        let outcome = submit_inquiry(&mut store, &external, &LoadingPolicy::none());

        assert!(outcome.advanced);
        assert_eq!(store.step(), 3);
        assert!(!store.loading());
        assert_eq!(store.inquiry_response().nama_va, "BUDI SANTOSO");

        let payment = store.payment_va_request();
        assert_eq!(payment.nomor_va, "8808123456789012");
        assert_eq!(payment.nominal_va, "150000");
        assert_eq!(payment.kode_bank, "014");
        assert_eq!(payment.kode_transaksi, "21");

        let transfer = store.fund_transfer_request();
        assert_eq!(transfer.nominal, "2500");
        assert_eq!(transfer.from_account, "002200");
        assert_eq!(transfer.nomor_va, "8808123456789012");
    }

    #[test]
    fn test_inquiry_empty_target_never_calls_gateway() {
        let mut store = WizardStore::new();
        store.set_internal_token("int");
        store.set_external_token("ext");
        store.set_step(2);
        let external = FakeExternal::default();

        let outcome = submit_inquiry(&mut store, &external, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert!(outcome.alert.is_some());
        assert_eq!(external.inquiry_calls.get(), 0);
        assert_eq!(store.step(), 2);
    }

    #[test]
    fn test_inquiry_failure_leaves_state_untouched() {
        let mut store = WizardStore::new();
        store.set_internal_token("int");
        store.set_external_token("ext");
        store.set_step(2);
        store.set_nomor_va("8808");
        let external = FakeExternal {
            fail_inquiry: true,
            ..Default::default()
        };

        let outcome = submit_inquiry(&mut store, &external, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Inquiry VA failed"));
        assert_eq!(store.step(), 2);
        assert!(!store.loading());
        assert_eq!(store.inquiry_response(), &InquiryResponse::default());
    }

    // === submit_payment ===

    #[test]
    fn test_payment_empty_amount_aborts_with_loading_left_set() {
        let mut store = store_at_payment_step();
        store.set_nominal_va("");
        store.set_loading(false);
        let external = FakeExternal::default();
        let internal = FakeInternal::default();

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Nominal VA can't be empty"));
        assert_eq!(external.payment_calls.get(), 0);
        assert_eq!(internal.transfer_calls.get(), 0);
        assert_eq!(store.step(), 4);
        // The guard abort path does not reset the loading flag
        assert!(store.loading());
    }

    #[test]
    fn test_payment_zero_amount_blocked() {
        let mut store = store_at_payment_step();
        store.set_nominal_va("0");
        let external = FakeExternal::default();
        let internal = FakeInternal::default();

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert_eq!(
            outcome.alert.as_deref(),
            Some("Nominal VA should be greater than 0")
        );
        assert_eq!(external.payment_calls.get(), 0);
    }

    #[test]
    fn test_payment_first_call_failure_commits_nothing() {
        let mut store = store_at_payment_step();
        let external = FakeExternal {
            fail_payment: true,
            ..Default::default()
        };
        let internal = FakeInternal::default();

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Payment VA failed"));
        assert_eq!(store.step(), 4);
        assert!(!store.loading());
        assert_eq!(store.payment_va_response(), &ResponseStatus::default());
        assert_eq!(store.inquiry_response(), &InquiryResponse::default());
        // The chain stopped at the first call
        assert_eq!(internal.auth_calls.get(), 0);
        assert_eq!(internal.transfer_calls.get(), 0);
    }

    #[test]
    fn test_payment_full_success_advances_and_commits() {
        let mut store = store_at_payment_step();
        let external = FakeExternal {
            payload: payment_payload(),
            ..Default::default()
        };
        let internal = FakeInternal::default();

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert_eq!(outcome, SubmitOutcome::advanced());
        assert_eq!(store.step(), 5);
        assert!(!store.loading());
        assert_eq!(store.payment_va_response().message, "payment ok");
        assert_eq!(store.inquiry_response().nama_va, "BUDI SANTOSO");
        assert_eq!(store.fund_transfer_response().message, "fee collected");
        // The transfer went out with the freshly acquired token, not the
        // stale one from startup
        assert_eq!(
            internal.transfer_token_seen.borrow().as_deref(),
            Some("int-token-1")
        );
        assert_eq!(store.internal_token(), "int-token-1");
    }

    #[test]
    fn test_payment_transfer_failure_still_advances_with_partial_commit() {
        let mut store = store_at_payment_step();
        let external = FakeExternal {
            payload: payment_payload(),
            ..Default::default()
        };
        let internal = FakeInternal {
            fail_transfer: true,
            ..Default::default()
        };

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        // Asymmetric branch: the step advances and the upstream payment
        // payload is retained, only the fee alert is raised
        assert!(outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Fund Transfer fee failed"));
        assert_eq!(store.step(), 5);
        assert!(!store.loading());
        assert_eq!(store.payment_va_response().message, "payment ok");
        assert_eq!(store.inquiry_response().status, "00");
        assert_eq!(store.fund_transfer_response(), &ResponseStatus::default());
    }

    #[test]
    fn test_payment_auth_exhaustion_blocks_before_transfer() {
        let mut store = store_at_payment_step();
        let external = FakeExternal {
            payload: payment_payload(),
            ..Default::default()
        };
        let internal = FakeInternal {
            fail_auth_times: u32::MAX,
            ..Default::default()
        };

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert!(!outcome.advanced);
        assert_eq!(outcome.alert.as_deref(), Some("Failed get internal token"));
        assert_eq!(store.step(), 4);
        assert!(!store.loading());
        // Exactly the retry budget, no transfer issued, nothing committed
        assert_eq!(internal.auth_calls.get(), 3);
        assert_eq!(internal.transfer_calls.get(), 0);
        assert_eq!(store.payment_va_response(), &ResponseStatus::default());
        // The stale token survives
        assert_eq!(store.internal_token(), "stale-int-token");
    }

    #[test]
    fn test_payment_auth_recovers_within_budget() {
        let mut store = store_at_payment_step();
        let external = FakeExternal {
            payload: payment_payload(),
            ..Default::default()
        };
        let internal = FakeInternal {
            fail_auth_times: 2,
            ..Default::default()
        };

        let outcome =
            submit_payment(&mut store, &external, &internal, 3, &LoadingPolicy::none());

        assert_eq!(outcome, SubmitOutcome::advanced());
        assert_eq!(internal.auth_calls.get(), 3);
        assert_eq!(internal.transfer_calls.get(), 1);
        assert_eq!(store.internal_token(), "int-token-3");
    }

    // === check_balance ===

    #[test]
    fn test_check_balance_formats_note() {
        let mut store = store_at_payment_step();
        store.set_fund_transfer_request(FundTransferRequest {
            from_account: "002200".to_string(),
            ..Default::default()
        });
        let internal = FakeInternal::default();

        let note = check_balance(&store, &internal);
        assert_eq!(note.as_deref(), Some("Account 002200: 1.000.000"));
    }

    #[test]
    fn test_check_balance_skips_empty_account() {
        let store = WizardStore::new();
        let internal = FakeInternal::default();
        assert_eq!(check_balance(&store, &internal), None);
    }
}
