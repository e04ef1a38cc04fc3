//! Request payloads
//!
//! Defaults mirror the gateway protocol's seeded sentinels: `"0"` for
//! unfilled codes and fixed STAN/RRN starting values.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Virtual-account inquiry request (external gateway)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    #[serde(rename = "nomorVA")]
    pub nomor_va: String,
    pub nomor_identitas: String,
    pub kode_instansi: String,
    pub kode_produk: String,
    pub kode_kantor_tx: String,
    pub kode_bank: String,
    pub stan: String,
    pub rrn: String,
}

impl Default for InquiryRequest {
    fn default() -> Self {
        Self {
            nomor_va: String::new(),
            nomor_identitas: String::new(),
            kode_instansi: "0".to_string(),
            kode_produk: "0".to_string(),
            kode_kantor_tx: "0".to_string(),
            kode_bank: "0".to_string(),
            stan: "210595".to_string(),
            rrn: "110480000001".to_string(),
        }
    }
}

/// Virtual-account payment request (external gateway)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVaRequest {
    #[serde(rename = "nomorVA")]
    pub nomor_va: String,
    #[serde(rename = "nominalVA")]
    pub nominal_va: String,
    pub kode_transaksi: String,
    pub kode_kantor_tx: String,
    pub kode_bank: String,
    pub stan: String,
    pub rrn: String,
}

impl Default for PaymentVaRequest {
    fn default() -> Self {
        Self {
            nomor_va: String::new(),
            nominal_va: String::new(),
            kode_transaksi: "0".to_string(),
            kode_kantor_tx: "K".to_string(),
            kode_bank: "0".to_string(),
            stan: "210595".to_string(),
            rrn: "110480000001".to_string(),
        }
    }
}

/// Fee collection transfer on the internal ledger, issued after a
/// successful VA payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferRequest {
    pub trans_date_time: String,
    pub from_account: String,
    pub nominal: String,
    #[serde(rename = "nomorVA")]
    pub nomor_va: String,
    pub keterangan: String,
    pub stan: String,
    pub rrn: String,
}

impl Default for FundTransferRequest {
    fn default() -> Self {
        Self {
            trans_date_time: Utc::now().timestamp_millis().to_string(),
            from_account: String::new(),
            nominal: String::new(),
            nomor_va: String::new(),
            keterangan: "pembayaran".to_string(),
            stan: "010595".to_string(),
            rrn: "010480000001".to_string(),
        }
    }
}

/// Credentials body for the /auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}
