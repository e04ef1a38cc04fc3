//! Wire-level records exchanged with the payment gateways
//!
//! Field names follow the gateway protocol (camelCase, Indonesian banking
//! vocabulary); the Rust side uses snake_case with serde renames. All fields
//! are opaque strings per the protocol — STAN/RRN sequencing identifiers
//! included.

pub mod request;
pub mod response;

pub use request::{AuthRequest, FundTransferRequest, InquiryRequest, PaymentVaRequest};
pub use response::{AuthResponse, FeeLine, InquiryResponse, ResponseStatus};
