//! Payment gateway port for the PIX deposit flow.
//!
//! Defines the contract for the external payment provider integration.
//!
//! # Design
//!
//! - **Gateway agnostic**: the surface names no provider; the concrete
//!   adapter lives under `adapters`
//! - **Expected failures are values**: operations return a typed error with
//!   a stable code taxonomy and never panic
//! - **No retries**: a deposit POST is not idempotent, and a blind retry
//!   could double-submit a charge; callers needing resilience own it

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the PIX payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a PIX deposit and return its payment (QR) data.
    async fn create_deposit(&self, request: DepositRequest) -> Result<Deposit, GatewayError>;

    /// Poll the gateway for the current status of a deposit.
    async fn deposit_status(&self, transaction_id: &str) -> Result<DepositStatus, GatewayError>;
}

/// Request to create a PIX deposit.
#[derive(Debug, Clone)]
pub struct DepositRequest {
    /// Charge amount exactly as the storefront provided it; no unit
    /// conversion and no positivity check happens at this layer.
    pub amount: f64,

    /// Customer identification required by the gateway.
    pub customer: CustomerDetails,

    /// Checkout attribution parameters, forwarded when present.
    pub attribution: Option<Attribution>,
}

/// Customer fields required by the gateway.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub name: String,

    pub email: String,

    /// CPF/CNPJ in any punctuation; normalized before sending.
    pub document: String,

    /// Phone in any punctuation; normalized to `+<country><number>`.
    pub phone: String,
}

/// The seven free-text attribution keys the storefront may carry.
///
/// Unset keys are omitted from outbound gateway payloads entirely, never
/// serialized as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sck: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
}

/// A created deposit with its PIX payment data.
///
/// Every field is optional on purpose: the gateway omits fields freely and
/// their absence is part of the wire contract, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Gateway-assigned transaction identifier.
    pub transaction_id: Option<String>,

    /// PIX QR payload ("copia e cola" text).
    pub qr_code: Option<String>,

    /// QR code rendered as a base64 image.
    pub qr_code_base64: Option<String>,

    /// PIX key the deposit settles to.
    pub pix_key: Option<String>,

    /// Expiry timestamp, as reported by the gateway.
    pub expires_at: Option<String>,
}

/// Deposit lifecycle status reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixStatus {
    /// Awaiting payment. Also the safe default when a poll fails.
    #[default]
    Pending,

    /// Payment settled.
    Paid,

    /// QR code expired before payment.
    Expired,

    /// Deposit cancelled.
    Cancelled,
}

impl PixStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixStatus::Pending => "pending",
            PixStatus::Paid => "paid",
            PixStatus::Expired => "expired",
            PixStatus::Cancelled => "cancelled",
        }
    }
}

/// Current state of a deposit as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositStatus {
    /// Echoes the identifier the caller supplied, not the response body.
    pub transaction_id: String,

    /// Gateway-reported status.
    pub status: PixStatus,

    /// Amount, when the gateway reports it.
    pub amount: Option<f64>,

    /// Settlement timestamp, when the gateway reports it.
    pub paid_at: Option<String>,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Application-level error code reported by the gateway, if any.
    pub provider_code: Option<String>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Attach the gateway's own error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a missing-credentials error (no I/O was attempted).
    pub fn invalid_credentials() -> Self {
        Self::new(
            GatewayErrorCode::InvalidCredentials,
            "Gateway credentials are not configured",
        )
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ApiError, message)
    }

    /// Create a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::MalformedResponse, message)
    }

    /// Code surfaced to operators: the gateway's own error code when it
    /// sent one, else the canonical category.
    pub fn public_code(&self) -> String {
        self.provider_code
            .clone()
            .unwrap_or_else(|| self.code.to_string())
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Gateway error codes. The four categories are exhaustive and never
/// conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayErrorCode {
    /// Token or secret missing from configuration; no I/O attempted.
    InvalidCredentials,

    /// Gateway reported failure, at the HTTP or application level.
    ApiError,

    /// Transport could not complete the request.
    NetworkError,

    /// Gateway answered success with a body that does not decode as the
    /// expected shape.
    MalformedResponse,
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            GatewayErrorCode::ApiError => "API_ERROR",
            GatewayErrorCode::NetworkError => "NETWORK_ERROR",
            GatewayErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
        };
        write!(f, "{}", s)
    }
}
