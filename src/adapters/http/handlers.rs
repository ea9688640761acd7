//! HTTP handlers wiring routes to the ports.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::config::AppConfig;
use crate::domain::pix::{PixEventType, PixWebhookPayload, PixWebhookVerifier};
use crate::ports::{
    Commission, CustomerDetails, DepositRequest, OrderTracker, OrderTrackingStatus,
    PaymentGateway, TrackingCustomer, TrackingOrder, TrackingProduct,
};

use super::dto::{
    DebugStatusResponse, DepositStatusResponse, ErrorResponse, GatewayConfigStatus,
    TrackingConfigStatus, WebhookAck, WebhookUrls,
};

/// Shared application state; cloned per request, dependencies Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub order_tracker: Arc<dyn OrderTracker>,
    pub verifier: Arc<PixWebhookVerifier>,
    pub config: Arc<AppConfig>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks/pix - receive gateway payment notifications
///
/// The signature is accepted from the `X-Webhook-Signature` header or the
/// body's `signature` field (header wins); verification runs over the
/// payload with the signature member removed, before any typed parsing of
/// the rest of the body.
pub async fn handle_pix_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, WebhookRejection> {
    let mut payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| WebhookRejection::InvalidPayload(format!("Invalid JSON: {}", e)))?;

    let header_signature = headers
        .get("X-Webhook-Signature")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body_signature = payload
        .get("signature")
        .and_then(|v| v.as_str())
        .map(String::from);
    let signature = header_signature
        .or(body_signature)
        .ok_or(WebhookRejection::MissingSignature)?;

    if let Some(object) = payload.as_object_mut() {
        object.remove("signature");
    }

    if !state.verifier.verify(&payload, &signature) {
        tracing::warn!("Rejected webhook with invalid signature");
        return Err(WebhookRejection::InvalidSignature);
    }

    let payload: PixWebhookPayload = serde_json::from_value(payload)
        .map_err(|e| WebhookRejection::InvalidPayload(format!("Unexpected shape: {}", e)))?;

    match payload.event {
        PixEventType::PixReceived => {
            let event = payload.to_incoming();
            tracing::info!(
                transaction_id = %event.transaction_id,
                status = %event.status,
                amount = event.amount,
                payer = event.payer_name.as_deref(),
                "PIX payment notification received"
            );
        }
        PixEventType::PixSent => {
            let event = payload.to_outgoing();
            tracing::info!(
                transaction_id = %event.transaction_id,
                status = %event.status,
                amount = event.amount,
                pix_key = event.pix_key.as_deref(),
                "PIX payout notification received"
            );
        }
    }

    Ok((StatusCode::OK, Json(WebhookAck { received: true })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Status Poll Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/payments/{transaction_id}/status - storefront status poll
///
/// Always answers 200 with a `success` flag; failed polls carry the error
/// code and status `pending`.
pub async fn get_payment_status(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Json<DepositStatusResponse> {
    match state.gateway.deposit_status(&transaction_id).await {
        Ok(status) => Json(DepositStatusResponse::from_status(status)),
        Err(err) => {
            tracing::error!(transaction_id = %transaction_id, error = %err, "Status poll failed");
            Json(DepositStatusResponse::from_error(&transaction_id, &err))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Diagnostics Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/debug/status - configuration and connectivity diagnostics
///
/// Reports which credentials are configured (tokens as truncated prefixes
/// only) and, when credentials exist, probes both external services: a
/// 1-unit diagnostic deposit against the gateway and a test order against
/// the tracking API.
pub async fn debug_status(State(state): State<AppState>) -> Json<DebugStatusResponse> {
    let gateway_config = &state.config.gateway;
    let tracking_config = &state.config.tracking;

    let gateway = GatewayConfigStatus {
        token: gateway_config
            .token_preview()
            .map(|prefix| format!("configured ({}...)", prefix))
            .unwrap_or_else(|| "not configured".to_string()),
        secret: if gateway_config.secret.is_some() {
            "configured".to_string()
        } else {
            "not configured".to_string()
        },
        token_length: gateway_config.token_length(),
        secret_length: gateway_config.secret_length(),
    };

    let tracking = TrackingConfigStatus {
        api_token: if tracking_config.is_configured() {
            "configured".to_string()
        } else {
            "not configured".to_string()
        },
    };

    let gateway_connection = if gateway_config.is_configured() {
        match state.gateway.create_deposit(diagnostic_deposit()).await {
            Ok(deposit) => format!(
                "connected - transaction {}",
                deposit.transaction_id.unwrap_or_else(|| "<none>".to_string())
            ),
            Err(err) => format!("error: {}", err),
        }
    } else {
        "credentials not configured".to_string()
    };

    let tracking_connection = if tracking_config.is_configured() {
        match state.order_tracker.report_order(diagnostic_order()).await {
            Ok(()) => "connected - test order accepted".to_string(),
            Err(err) => format!("error: {}", err),
        }
    } else {
        "not tested".to_string()
    };

    Json(DebugStatusResponse {
        gateway,
        tracking,
        environment: state.config.server.environment.as_str().to_string(),
        webhooks: WebhookUrls {
            pix: tracking_config.webhook_url(),
        },
        gateway_connection,
        tracking_connection,
    })
}

/// Minimal 1-unit deposit used to probe gateway connectivity.
fn diagnostic_deposit() -> DepositRequest {
    DepositRequest {
        amount: 1.0,
        customer: CustomerDetails {
            name: "Connection Test".to_string(),
            email: "test@example.com".to_string(),
            document: "12345678900".to_string(),
            phone: "+5511999999999".to_string(),
        },
        attribution: None,
    }
}

/// Test-flagged order used to probe the tracking API.
fn diagnostic_order() -> TrackingOrder {
    TrackingOrder {
        order_id: format!("TEST-{}", uuid::Uuid::new_v4()),
        payment_method: "pix".to_string(),
        status: OrderTrackingStatus::WaitingPayment,
        created_at: Utc::now(),
        approved_at: None,
        customer: TrackingCustomer {
            name: "Connection Test".to_string(),
            email: "test@example.com".to_string(),
            phone: "11999999999".to_string(),
            document: "12345678900".to_string(),
            country: "BR".to_string(),
        },
        products: vec![TrackingProduct {
            id: "test-product".to_string(),
            name: "Test Product".to_string(),
            quantity: 1,
            price_in_cents: 100,
        }],
        attribution: None,
        commission: Commission {
            total_price_in_cents: 100,
            gateway_fee_in_cents: 10,
            user_commission_in_cents: 90,
            currency: "BRL".to_string(),
        },
        is_test: true,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Rejection reasons for inbound webhooks.
#[derive(Debug)]
pub enum WebhookRejection {
    /// Body is not JSON, or does not match the expected payload shape.
    InvalidPayload(String),

    /// No signature in header or body.
    MissingSignature,

    /// Signature did not verify against the payload.
    InvalidSignature,
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match self {
            WebhookRejection::InvalidPayload(detail) => {
                (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", detail)
            }
            WebhookRejection::MissingSignature => (
                StatusCode::BAD_REQUEST,
                "MISSING_SIGNATURE",
                "No webhook signature provided".to_string(),
            ),
            WebhookRejection::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                "INVALID_SIGNATURE",
                "Webhook signature verification failed".to_string(),
            ),
        };

        let body = ErrorResponse::new(error_code, message);
        (status, Json(body)).into_response()
    }
}
