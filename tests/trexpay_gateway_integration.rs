//! Integration tests for the TrexPay gateway adapter, run against an
//! in-process fake gateway bound to an ephemeral port.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;

use cometa_payments::adapters::trexpay::{TrexPayConfig, TrexPayGateway};
use cometa_payments::ports::{
    Attribution, CustomerDetails, DepositRequest, GatewayErrorCode, PaymentGateway, PixStatus,
};

async fn spawn_gateway(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn gateway_at(addr: SocketAddr) -> TrexPayGateway {
    let config = TrexPayConfig::new(
        Some(SecretString::new("tok_test_123".to_string())),
        Some(SecretString::new("sec_test_456".to_string())),
        "https://shop.example.com/api/webhooks/pix",
    )
    .with_base_url(format!("http://{}", addr));
    TrexPayGateway::new(config)
}

fn deposit_request() -> DepositRequest {
    DepositRequest {
        amount: 149.9,
        customer: CustomerDetails {
            name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            document: "123.456.789-00".to_string(),
            phone: "(11) 99999-9999".to_string(),
        },
        attribution: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Deposit Creation
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_deposit_maps_success_fields_verbatim() {
    let router = Router::new().route(
        "/api/wallet/deposit/payment",
        post(|| async {
            Json(serde_json::json!({
                "idTransaction": "T1",
                "qrCode": "00020126580014br.gov.bcb.pix",
                "qrCodeBase64": "aVZCT1J3MEtHZ28=",
                "pixKey": "pix@gateway.example",
                "expiresAt": "2024-01-01T00:00:00Z"
            }))
        }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let deposit = gateway.create_deposit(deposit_request()).await.unwrap();

    assert_eq!(deposit.transaction_id.as_deref(), Some("T1"));
    assert_eq!(deposit.qr_code.as_deref(), Some("00020126580014br.gov.bcb.pix"));
    assert_eq!(deposit.qr_code_base64.as_deref(), Some("aVZCT1J3MEtHZ28="));
    assert_eq!(deposit.pix_key.as_deref(), Some("pix@gateway.example"));
    assert_eq!(deposit.expires_at.as_deref(), Some("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn create_deposit_tolerates_omitted_response_fields() {
    let router = Router::new().route(
        "/api/wallet/deposit/payment",
        post(|| async { Json(serde_json::json!({"idTransaction": "T2"})) }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let deposit = gateway.create_deposit(deposit_request()).await.unwrap();

    assert_eq!(deposit.transaction_id.as_deref(), Some("T2"));
    assert!(deposit.qr_code.is_none());
    assert!(deposit.expires_at.is_none());
}

#[tokio::test]
async fn create_deposit_sends_normalized_body_without_unset_attribution() {
    let captured: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let captured_clone = captured.clone();

    let router = Router::new()
        .route(
            "/api/wallet/deposit/payment",
            post(
                move |State(captured): State<Arc<Mutex<Option<serde_json::Value>>>>,
                      Json(body): Json<serde_json::Value>| async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(serde_json::json!({"idTransaction": "T3"}))
                },
            ),
        )
        .with_state(captured_clone);
    let gateway = gateway_at(spawn_gateway(router).await);

    let mut request = deposit_request();
    request.attribution = Some(Attribution {
        src: Some("instagram".to_string()),
        utm_campaign: Some("launch".to_string()),
        ..Default::default()
    });
    gateway.create_deposit(request).await.unwrap();

    let body = captured.lock().unwrap().clone().unwrap();
    let object = body.as_object().unwrap();

    assert_eq!(object["token"], "tok_test_123");
    assert_eq!(object["secret"], "sec_test_456");
    assert_eq!(object["postback"], "https://shop.example.com/api/webhooks/pix");
    assert_eq!(object["amount"], 149.9);
    assert_eq!(object["debtor_name"], "Maria Souza");
    assert_eq!(object["debtor_document_number"], "12345678900");
    assert_eq!(object["phone"], "+5511999999999");
    assert_eq!(object["method_pay"], "pix");
    // Set attribution keys are flattened in
    assert_eq!(object["src"], "instagram");
    assert_eq!(object["utm_campaign"], "launch");
    // Unset keys must be absent, not null
    assert!(!object.contains_key("sck"));
    assert!(!object.contains_key("utm_medium"));
    assert!(object.values().all(|v| !v.is_null()));
}

#[tokio::test]
async fn create_deposit_maps_api_error_body() {
    let router = Router::new().route(
        "/api/wallet/deposit/payment",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "LIMIT_EXCEEDED",
                    "message": "Daily limit reached"
                })),
            )
        }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let err = gateway.create_deposit(deposit_request()).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::ApiError);
    assert_eq!(err.public_code(), "LIMIT_EXCEEDED");
    assert_eq!(err.message, "Daily limit reached");
}

#[tokio::test]
async fn create_deposit_maps_bare_http_error() {
    let router = Router::new().route(
        "/api/wallet/deposit/payment",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({}))) }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let err = gateway.create_deposit(deposit_request()).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::ApiError);
    assert_eq!(err.public_code(), "API_ERROR");
    assert_eq!(err.message, "HTTP error 500");
}

#[tokio::test]
async fn create_deposit_maps_transport_failure_to_network_error() {
    // Bind and immediately drop a listener so the port refuses connections
    let refused_addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let gateway = gateway_at(refused_addr);

    let err = gateway.create_deposit(deposit_request()).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::NetworkError);
}

#[tokio::test]
async fn create_deposit_rejects_malformed_success_body() {
    let router = Router::new().route(
        "/api/wallet/deposit/payment",
        post(|| async {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                "plainly not json",
            )
                .into_response()
        }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let err = gateway.create_deposit(deposit_request()).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::MalformedResponse);
}

#[tokio::test]
async fn create_deposit_without_credentials_makes_no_network_calls() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();

    let router = Router::new()
        .route(
            "/api/wallet/deposit/payment",
            post(move |State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(serde_json::json!({"idTransaction": "never"}))
            }),
        )
        .with_state(hits_clone);
    let addr = spawn_gateway(router).await;

    let config = TrexPayConfig::new(None, None, "https://shop.example.com/hook")
        .with_base_url(format!("http://{}", addr));
    let gateway = TrexPayGateway::new(config);

    let err = gateway.create_deposit(deposit_request()).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::InvalidCredentials);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// ════════════════════════════════════════════════════════════════════════════
// Status Polling
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn deposit_status_echoes_caller_transaction_id() {
    let router = Router::new().route(
        "/api/status",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body, serde_json::json!({"idTransaction": "TX-POLL"}));
            Json(serde_json::json!({
                "status": "paid",
                "amount": 149.9,
                "paid_at": "2024-01-01T12:00:00Z"
            }))
        }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let status = gateway.deposit_status("TX-POLL").await.unwrap();

    assert_eq!(status.transaction_id, "TX-POLL");
    assert_eq!(status.status, PixStatus::Paid);
    assert_eq!(status.amount, Some(149.9));
    assert_eq!(status.paid_at.as_deref(), Some("2024-01-01T12:00:00Z"));
}

#[tokio::test]
async fn deposit_status_tolerates_omitted_optional_fields() {
    let router = Router::new().route(
        "/api/status",
        post(|| async { Json(serde_json::json!({"status": "pending"})) }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let status = gateway.deposit_status("TX-1").await.unwrap();

    assert_eq!(status.status, PixStatus::Pending);
    assert!(status.amount.is_none());
    assert!(status.paid_at.is_none());
}

#[tokio::test]
async fn deposit_status_rejects_unknown_status_as_malformed() {
    let router = Router::new().route(
        "/api/status",
        post(|| async { Json(serde_json::json!({"status": "under_review"})) }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let err = gateway.deposit_status("TX-1").await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::MalformedResponse);
}

#[tokio::test]
async fn deposit_status_maps_api_error() {
    let router = Router::new().route(
        "/api/status",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "NOT_FOUND"})),
            )
        }),
    );
    let gateway = gateway_at(spawn_gateway(router).await);

    let err = gateway.deposit_status("TX-MISSING").await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::ApiError);
    assert_eq!(err.public_code(), "NOT_FOUND");
    assert_eq!(err.message, "HTTP error 404");
}

#[tokio::test]
async fn deposit_status_maps_transport_failure_to_network_error() {
    let refused_addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let gateway = gateway_at(refused_addr);

    let err = gateway.deposit_status("TX-1").await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::NetworkError);
}
