//! The wizard store
//!
//! Single source of truth for wizard state: the step counter, the two bearer
//! tokens, the request/response record pairs, and the loading/debug flags.
//! The store is an owned value handed to the TUI by reference — there is no
//! ambient singleton — and it is only ever mutated through the action methods
//! below. No action validates its payload or returns an error; step movement
//! is the only guarded operation.

use serde::Serialize;

use crate::models::{
    FundTransferRequest, InquiryRequest, InquiryResponse, PaymentVaRequest, ResponseStatus,
};

/// Number of wizard screens; fixed for the process lifetime
pub const MAX_STEP: u32 = 5;

/// All wizard state, mutated exclusively through the methods below
#[derive(Debug, Clone, Serialize)]
pub struct WizardStore {
    step: u32,
    internal_token: String,
    external_token: String,
    jenis_id: u8,
    mode_transaksi: String,
    inquiry_request: InquiryRequest,
    inquiry_response: InquiryResponse,
    payment_va_request: PaymentVaRequest,
    payment_va_response: ResponseStatus,
    fund_transfer_request: FundTransferRequest,
    fund_transfer_response: ResponseStatus,
    loading: bool,
    debug: bool,
}

impl Default for WizardStore {
    fn default() -> Self {
        Self {
            step: 1,
            internal_token: String::new(),
            external_token: String::new(),
            jenis_id: 1,
            mode_transaksi: "1".to_string(),
            inquiry_request: InquiryRequest::default(),
            inquiry_response: InquiryResponse::default(),
            payment_va_request: PaymentVaRequest::default(),
            payment_va_response: ResponseStatus::default(),
            fund_transfer_request: FundTransferRequest::default(),
            fund_transfer_response: ResponseStatus::default(),
            // The app starts in its startup-authentication chain
            loading: true,
            debug: false,
        }
    }
}

impl WizardStore {
    /// Create a store at its initial state
    pub fn new() -> Self {
        Self::default()
    }

    // === Step movement ===

    /// Advance one step. No-op at the last step or while either token is
    /// empty (unauthenticated sessions cannot navigate).
    pub fn advance_step(&mut self) {
        if self.step >= MAX_STEP {
            return;
        }
        if self.internal_token.is_empty() || self.external_token.is_empty() {
            return;
        }
        self.step += 1;
    }

    /// Retreat one step. Mirror of [`advance_step`](Self::advance_step):
    /// no-op at step 1 or while either token is empty.
    pub fn retreat_step(&mut self) {
        if self.step <= 1 {
            return;
        }
        if self.internal_token.is_empty() || self.external_token.is_empty() {
            return;
        }
        self.step -= 1;
    }

    /// Absolute jump with no bounds or token check. Inconsistent with the
    /// guarded movements above, kept that way deliberately: the contract is
    /// an unguarded jump, and callers are expected to pass a valid step.
    pub fn set_step(&mut self, step: u32) {
        self.step = step;
    }

    // === Tokens ===

    pub fn set_internal_token(&mut self, token: impl Into<String>) {
        self.internal_token = token.into();
    }

    pub fn set_external_token(&mut self, token: impl Into<String>) {
        self.external_token = token.into();
    }

    // === Inquiry request leaf fields (edited on steps 1 and 2) ===

    pub fn set_jenis_id(&mut self, jenis_id: u8) {
        self.jenis_id = jenis_id;
    }

    pub fn set_mode_transaksi(&mut self, mode: impl Into<String>) {
        self.mode_transaksi = mode.into();
    }

    pub fn set_nomor_va(&mut self, nomor_va: impl Into<String>) {
        self.inquiry_request.nomor_va = nomor_va.into();
    }

    pub fn set_nomor_identitas(&mut self, nomor_identitas: impl Into<String>) {
        self.inquiry_request.nomor_identitas = nomor_identitas.into();
    }

    pub fn set_kode_instansi(&mut self, kode_instansi: impl Into<String>) {
        self.inquiry_request.kode_instansi = kode_instansi.into();
    }

    pub fn set_kode_produk(&mut self, kode_produk: impl Into<String>) {
        self.inquiry_request.kode_produk = kode_produk.into();
    }

    pub fn set_kode_kantor_tx(&mut self, kode_kantor_tx: impl Into<String>) {
        self.inquiry_request.kode_kantor_tx = kode_kantor_tx.into();
    }

    pub fn set_kode_bank(&mut self, kode_bank: impl Into<String>) {
        self.inquiry_request.kode_bank = kode_bank.into();
    }

    pub fn set_stan(&mut self, stan: impl Into<String>) {
        self.inquiry_request.stan = stan.into();
    }

    pub fn set_rrn(&mut self, rrn: impl Into<String>) {
        self.inquiry_request.rrn = rrn.into();
    }

    // === Payment amount (edited on step 4) ===

    pub fn set_nominal_va(&mut self, nominal_va: impl Into<String>) {
        self.payment_va_request.nominal_va = nominal_va.into();
    }

    // === Wholesale record replacement (API payload commits) ===

    pub fn set_inquiry_response(&mut self, response: InquiryResponse) {
        self.inquiry_response = response;
    }

    pub fn set_payment_va_request(&mut self, request: PaymentVaRequest) {
        self.payment_va_request = request;
    }

    pub fn set_payment_va_response(&mut self, response: ResponseStatus) {
        self.payment_va_response = response;
    }

    pub fn set_fund_transfer_request(&mut self, request: FundTransferRequest) {
        self.fund_transfer_request = request;
    }

    pub fn set_fund_transfer_response(&mut self, response: ResponseStatus) {
        self.fund_transfer_response = response;
    }

    // === Flags ===

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
    }

    /// Discard everything and return to the initial state. Reload semantics:
    /// the caller is expected to re-run startup authentication afterwards,
    /// the same way a page reload would.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // === Read access ===

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn internal_token(&self) -> &str {
        &self.internal_token
    }

    pub fn external_token(&self) -> &str {
        &self.external_token
    }

    /// True once both backends have issued a bearer token
    pub fn authenticated(&self) -> bool {
        !self.internal_token.is_empty() && !self.external_token.is_empty()
    }

    pub fn jenis_id(&self) -> u8 {
        self.jenis_id
    }

    pub fn mode_transaksi(&self) -> &str {
        &self.mode_transaksi
    }

    pub fn inquiry_request(&self) -> &InquiryRequest {
        &self.inquiry_request
    }

    pub fn inquiry_response(&self) -> &InquiryResponse {
        &self.inquiry_response
    }

    pub fn payment_va_request(&self) -> &PaymentVaRequest {
        &self.payment_va_request
    }

    pub fn payment_va_response(&self) -> &ResponseStatus {
        &self.payment_va_response
    }

    pub fn fund_transfer_request(&self) -> &FundTransferRequest {
        &self.fund_transfer_request
    }

    pub fn fund_transfer_response(&self) -> &ResponseStatus {
        &self.fund_transfer_response
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
