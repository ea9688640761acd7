//! TrexPay wire types.
//!
//! Field names mirror the gateway API exactly; do not rename them.

use serde::{Deserialize, Serialize};

use crate::ports::{Attribution, PixStatus};

/// Outbound body for deposit creation.
#[derive(Debug, Serialize)]
pub struct DepositRequestBody {
    pub token: String,
    pub secret: String,
    pub postback: String,
    pub amount: f64,
    pub debtor_name: String,
    pub email: String,
    pub debtor_document_number: String,
    pub phone: String,
    pub method_pay: &'static str,

    /// Flattened; unset keys are omitted from the body entirely.
    #[serde(flatten)]
    pub attribution: Attribution,
}

/// Success body from deposit creation.
#[derive(Debug, Deserialize)]
pub struct DepositResponseBody {
    #[serde(rename = "idTransaction")]
    pub transaction_id: Option<String>,

    #[serde(rename = "qrCode")]
    pub qr_code: Option<String>,

    #[serde(rename = "qrCodeBase64")]
    pub qr_code_base64: Option<String>,

    #[serde(rename = "pixKey")]
    pub pix_key: Option<String>,

    #[serde(rename = "expiresAt")]
    pub expires_at: Option<String>,
}

/// Error body the gateway attaches to non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponseBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Outbound body for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusRequestBody<'a> {
    #[serde(rename = "idTransaction")]
    pub transaction_id: &'a str,
}

/// Success body from the status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusResponseBody {
    pub status: PixStatus,
    pub amount: Option<f64>,
    pub paid_at: Option<String>,
}
