//! Axum router for the payments API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{debug_status, get_payment_status, handle_pix_webhook, AppState};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /webhooks/pix` - gateway payment notifications (signature
///   verified, no user auth)
/// - `GET /payments/:transaction_id/status` - storefront status poll
/// - `GET /debug/status` - configuration and connectivity diagnostics
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/webhooks/pix", post(handle_pix_webhook))
        .route("/payments/:transaction_id/status", get(get_payment_status))
        .route("/debug/status", get(debug_status))
}

/// Create the complete application router, mounted under `/api`.
pub fn app_router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}
