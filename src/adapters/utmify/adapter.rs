//! UTMify order tracking adapter.
//!
//! Implements the `OrderTracker` port against the UTMify API. The token
//! travels in the `x-api-token` header and is never logged.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::TrackingConfig;
use crate::ports::{OrderTracker, TrackingError, TrackingOrder};

use super::wire::OrderBody;

/// Fixed production endpoint of the tracking API.
const UTMIFY_BASE_URL: &str = "https://api.utmify.com.br";

/// UTMify API configuration.
#[derive(Clone)]
pub struct UtmifyConfig {
    /// API token; absent means order reports fail locally.
    api_token: Option<SecretString>,

    /// Platform name attached to every order.
    platform: String,

    /// Base URL; the production constant, overridable for tests.
    base_url: String,
}

impl UtmifyConfig {
    /// Create a new UTMify configuration.
    pub fn new(api_token: Option<SecretString>, platform: impl Into<String>) -> Self {
        Self {
            api_token,
            platform: platform.into(),
            base_url: UTMIFY_BASE_URL.to_string(),
        }
    }

    /// Build from the application's tracking configuration section.
    pub fn from_tracking_config(config: &TrackingConfig) -> Self {
        Self::new(config.api_token.clone(), config.platform.clone())
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// UTMify tracking adapter.
pub struct UtmifyTracker {
    config: UtmifyConfig,
    http_client: reqwest::Client,
}

impl UtmifyTracker {
    /// Create a new adapter with the given configuration.
    pub fn new(config: UtmifyConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OrderTracker for UtmifyTracker {
    async fn report_order(&self, order: TrackingOrder) -> Result<(), TrackingError> {
        let token = self
            .config
            .api_token
            .as_ref()
            .ok_or(TrackingError::MissingCredentials)?;

        let body = OrderBody::from_order(&self.config.platform, &order);

        tracing::info!(
            order_id = %order.order_id,
            status = order.status.as_str(),
            is_test = order.is_test,
            "Reporting order to tracking service"
        );

        let url = format!("{}/api-credentials/orders", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("x-api-token", token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| TrackingError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "Tracking service rejected the order"
            );
            return Err(TrackingError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Commission, OrderTrackingStatus, TrackingCustomer};
    use chrono::Utc;

    fn test_order() -> TrackingOrder {
        TrackingOrder {
            order_id: "ORDER-1".to_string(),
            payment_method: "pix".to_string(),
            status: OrderTrackingStatus::WaitingPayment,
            created_at: Utc::now(),
            approved_at: None,
            customer: TrackingCustomer {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                phone: "11999999999".to_string(),
                document: "12345678900".to_string(),
                country: "BR".to_string(),
            },
            products: vec![],
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

    #[test]
    fn config_defaults_to_production_base_url() {
        let config = UtmifyConfig::new(None, "CometaPapelaria");
        assert_eq!(config.base_url, "https://api.utmify.com.br");
    }

    #[test]
    fn config_with_base_url() {
        let config = UtmifyConfig::new(None, "CometaPapelaria").with_base_url("http://127.0.0.1:1");
        assert_eq!(config.base_url, "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn report_without_token_fails_locally() {
        let tracker = UtmifyTracker::new(UtmifyConfig::new(None, "CometaPapelaria"));
        let err = tracker.report_order(test_order()).await.unwrap_err();
        assert!(matches!(err, TrackingError::MissingCredentials));
    }
}
