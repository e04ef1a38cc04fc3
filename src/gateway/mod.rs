//! Gateway clients for the two REST backends
//!
//! The wizard talks to an external payment gateway (inquiry, paymentVA) and
//! an internal ledger gateway (fund transfer, balance). Both sit behind
//! traits so the step flows can be exercised against fakes.

pub mod http;

use crate::error::TellerResult;
use crate::models::{
    FundTransferRequest, InquiryRequest, InquiryResponse, PaymentVaRequest, ResponseStatus,
};

pub use http::{HttpExternalGateway, HttpInternalGateway};

/// The external payment gateway
pub trait ExternalGateway {
    /// Obtain a bearer token for subsequent calls
    fn authenticate(&self) -> TellerResult<String>;

    /// Look up a virtual account's payable amount and metadata
    fn inquiry(&self, request: &InquiryRequest, token: &str) -> TellerResult<InquiryResponse>;

    /// Settle a virtual account. Answers with the full inquiry-shaped
    /// payload, which callers commit to both response records.
    fn payment_va(&self, request: &PaymentVaRequest, token: &str)
        -> TellerResult<InquiryResponse>;
}

/// The internal ledger gateway
pub trait InternalGateway {
    /// Obtain a bearer token for subsequent calls
    fn authenticate(&self) -> TellerResult<String>;

    /// Collect the fee via an internal ledger transfer
    fn fund_transfer(
        &self,
        request: &FundTransferRequest,
        token: &str,
    ) -> TellerResult<ResponseStatus>;

    /// Current balance of a source account, for the receipt screen
    fn balance(&self, account: &str, token: &str) -> TellerResult<ResponseStatus>;
}
