//! Binary entrypoint: configuration, tracing, router, serve.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use cometa_payments::adapters::http::{app_router, AppState};
use cometa_payments::adapters::trexpay::{TrexPayConfig, TrexPayGateway};
use cometa_payments::adapters::utmify::{UtmifyConfig, UtmifyTracker};
use cometa_payments::config::AppConfig;
use cometa_payments::domain::pix::PixWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    if !config.gateway.is_configured() {
        tracing::warn!("Gateway credentials not configured; deposit creation will be rejected");
    }
    if !config.tracking.is_configured() {
        tracing::warn!("Tracking token not configured; order reporting is disabled");
    }

    // The webhook signing secret is the gateway API secret. Without it no
    // inbound signature can verify, so webhooks will be rejected.
    let webhook_secret = config
        .gateway
        .secret
        .as_ref()
        .map(|s| s.expose_secret().clone())
        .unwrap_or_default();

    let state = AppState {
        gateway: Arc::new(TrexPayGateway::new(TrexPayConfig::from_gateway_config(
            &config.gateway,
        ))),
        order_tracker: Arc::new(UtmifyTracker::new(UtmifyConfig::from_tracking_config(
            &config.tracking,
        ))),
        verifier: Arc::new(PixWebhookVerifier::new(webhook_secret)),
        config: Arc::new(config.clone()),
    };

    let app = app_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = config.server.environment.as_str(), "Starting payments server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
