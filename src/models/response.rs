//! Response payloads
//!
//! The external paymentVA endpoint answers with the full inquiry-shaped
//! payload; the status view of it ([`ResponseStatus`]) is extracted for the
//! payment response record.

use serde::{Deserialize, Serialize};

/// One fee line in an inquiry's `additionalData` sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLine {
    #[serde(rename = "nomorVA")]
    pub nomor_va: String,
    pub rekening_fee_sumber: String,
    pub nama_produk: String,
    pub kode_transaksi: String,
    pub rekening_sumber: String,
    pub nominal_fee: String,
    #[serde(rename = "nominalVA")]
    pub nominal_va: String,
    pub jenis_transaksi: String,
}

/// Full inquiry/payment payload from the external gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
    #[serde(rename = "nomorVA")]
    pub nomor_va: String,
    pub stan: String,
    pub nominal_total: String,
    pub nomor_identitas: String,
    pub jumlah_data: String,
    #[serde(default)]
    pub additional_data: Vec<FeeLine>,
    pub message: String,
    #[serde(rename = "namaVA")]
    pub nama_va: String,
    pub status: String,
    pub rrn: String,
}

/// Minimal status shape shared by payment and fund-transfer responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    pub message: String,
    pub status: String,
}

impl From<&InquiryResponse> for ResponseStatus {
    fn from(payload: &InquiryResponse) -> Self {
        Self {
            message: payload.message.clone(),
            status: payload.status.clone(),
        }
    }
}

/// Token answer from the /auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
