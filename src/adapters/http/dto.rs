//! Wire DTOs for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::ports::{DepositStatus, GatewayError};

/// Standard error envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Acknowledgement returned to the gateway after a processed webhook.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Operator-facing view of a status poll.
///
/// A failed poll still carries `status: "pending"`: callers always receive
/// a status value, and pending is the only safe assumption when the
/// gateway cannot be reached.
#[derive(Debug, Serialize, Deserialize)]
pub struct DepositStatusResponse {
    pub success: bool,

    #[serde(rename = "idTransaction")]
    pub transaction_id: String,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DepositStatusResponse {
    /// Successful poll.
    pub fn from_status(status: DepositStatus) -> Self {
        Self {
            success: true,
            transaction_id: status.transaction_id,
            status: status.status.as_str().to_string(),
            amount: status.amount,
            paid_at: status.paid_at,
            error: None,
        }
    }

    /// Failed poll; status defaults to pending.
    pub fn from_error(transaction_id: &str, err: &GatewayError) -> Self {
        Self {
            success: false,
            transaction_id: transaction_id.to_string(),
            status: "pending".to_string(),
            amount: None,
            paid_at: None,
            error: Some(err.public_code()),
        }
    }
}

/// Configuration and connectivity report for operators.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugStatusResponse {
    pub gateway: GatewayConfigStatus,
    pub tracking: TrackingConfigStatus,
    pub environment: String,
    pub webhooks: WebhookUrls,
    pub gateway_connection: String,
    pub tracking_connection: String,
}

/// Gateway credential presence. The token is surfaced only as a truncated
/// prefix; the secret only as present/absent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfigStatus {
    pub token: String,
    pub secret: String,
    pub token_length: usize,
    pub secret_length: usize,
}

/// Tracking credential presence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingConfigStatus {
    pub api_token: String,
}

/// Callback URLs to configure on the gateway side.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookUrls {
    pub pix: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PixStatus;

    #[test]
    fn status_response_from_success() {
        let response = DepositStatusResponse::from_status(DepositStatus {
            transaction_id: "TX-1".to_string(),
            status: PixStatus::Paid,
            amount: Some(49.9),
            paid_at: Some("2024-01-01T12:00:00Z".to_string()),
        });

        assert!(response.success);
        assert_eq!(response.status, "paid");
        assert!(response.error.is_none());
    }

    #[test]
    fn status_response_from_error_defaults_to_pending() {
        let err = GatewayError::network("connection refused");
        let response = DepositStatusResponse::from_error("TX-1", &err);

        assert!(!response.success);
        assert_eq!(response.transaction_id, "TX-1");
        assert_eq!(response.status, "pending");
        assert_eq!(response.error.as_deref(), Some("NETWORK_ERROR"));
    }

    #[test]
    fn status_response_serializes_wire_field_names() {
        let err = GatewayError::api("x").with_provider_code("LIMIT_EXCEEDED");
        let value =
            serde_json::to_value(DepositStatusResponse::from_error("TX-1", &err)).unwrap();

        assert_eq!(value["idTransaction"], "TX-1");
        assert_eq!(value["error"], "LIMIT_EXCEEDED");
        // Unset optionals are omitted, not null
        assert!(!value.as_object().unwrap().contains_key("amount"));
    }
}
