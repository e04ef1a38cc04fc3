//! vateller - Terminal-based virtual account payment teller
//!
//! A five-step transaction wizard driven from the terminal: look up a
//! virtual account, review the payable amount, settle it against the
//! external payment gateway, and collect the fee through the internal
//! ledger gateway.
//!
//! # Architecture
//!
//! - `config`: settings (gateway URLs, credentials, retry budget)
//! - `error`: custom error types
//! - `models`: wire-level request/response records
//! - `masking`: digit filtering and display grouping helpers
//! - `store`: the wizard store — all wizard state behind a narrow action API
//! - `gateway`: trait seams and blocking HTTP clients for the two backends
//! - `flow`: the sequential call chains each step submits through
//! - `tui`: ratatui screens, event loop, and widgets

pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod masking;
pub mod models;
pub mod store;
pub mod tui;

pub use error::TellerError;
