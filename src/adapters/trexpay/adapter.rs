//! TrexPay PIX gateway adapter.
//!
//! Implements the `PaymentGateway` port against the TrexPay HTTP API.
//!
//! # Security
//!
//! - Credentials held as `secrecy::SecretString`, exposed only while the
//!   request body is built and never logged
//! - Missing credentials fail locally with `INVALID_CREDENTIALS` before any
//!   network I/O
//!
//! # Configuration
//!
//! ```ignore
//! let config = TrexPayConfig::from_gateway_config(&app_config.gateway);
//! let gateway = TrexPayGateway::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::GatewayConfig;
use crate::domain::normalize::{normalize_document, normalize_phone};
use crate::ports::{Deposit, DepositRequest, DepositStatus, GatewayError, PaymentGateway};

use super::wire::{
    DepositRequestBody, DepositResponseBody, ErrorResponseBody, StatusRequestBody,
    StatusResponseBody,
};

/// Fixed production endpoint of the gateway; not configurable per call.
const TREXPAY_BASE_URL: &str = "https://app.trexpay.com.br";

/// TrexPay API configuration.
#[derive(Clone)]
pub struct TrexPayConfig {
    /// API token; absent means deposit creation is rejected locally.
    token: Option<SecretString>,

    /// API secret, paired with the token on every deposit request.
    secret: Option<SecretString>,

    /// URL the gateway calls back with payment notifications.
    postback_url: String,

    /// Base URL; the production constant, overridable for tests.
    base_url: String,
}

impl TrexPayConfig {
    /// Create a new TrexPay configuration.
    pub fn new(
        token: Option<SecretString>,
        secret: Option<SecretString>,
        postback_url: impl Into<String>,
    ) -> Self {
        Self {
            token,
            secret,
            postback_url: postback_url.into(),
            base_url: TREXPAY_BASE_URL.to_string(),
        }
    }

    /// Build from the application's gateway configuration section.
    pub fn from_gateway_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.token.clone(),
            config.secret.clone(),
            config.postback_url.clone(),
        )
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// TrexPay gateway adapter.
///
/// Implements `PaymentGateway` against the TrexPay HTTP API.
pub struct TrexPayGateway {
    config: TrexPayConfig,
    http_client: reqwest::Client,
}

impl TrexPayGateway {
    /// Create a new adapter with the given configuration.
    pub fn new(config: TrexPayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Both credentials, or `INVALID_CREDENTIALS` without touching the
    /// network.
    fn credentials(&self) -> Result<(&SecretString, &SecretString), GatewayError> {
        match (&self.config.token, &self.config.secret) {
            (Some(token), Some(secret)) => Ok((token, secret)),
            _ => Err(GatewayError::invalid_credentials()),
        }
    }

    /// Build the outbound deposit body, normalizing customer fields.
    fn build_deposit_body(
        &self,
        token: &SecretString,
        secret: &SecretString,
        request: &DepositRequest,
    ) -> DepositRequestBody {
        DepositRequestBody {
            token: token.expose_secret().clone(),
            secret: secret.expose_secret().clone(),
            postback: self.config.postback_url.clone(),
            amount: request.amount,
            debtor_name: request.customer.name.clone(),
            email: request.customer.email.clone(),
            debtor_document_number: normalize_document(&request.customer.document),
            phone: normalize_phone(&request.customer.phone),
            method_pay: "pix",
            attribution: request.attribution.clone().unwrap_or_default(),
        }
    }

    /// Map a non-success HTTP response to an `API_ERROR`, carrying the
    /// gateway's own error code and message when the body provides them.
    async fn api_error_from_response(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let body: ErrorResponseBody = response.json().await.unwrap_or_default();

        let message = body
            .message
            .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

        tracing::error!(
            status = status.as_u16(),
            provider_code = body.error.as_deref(),
            "Gateway returned an error"
        );

        let mut err = GatewayError::api(message);
        if let Some(code) = body.error {
            err = err.with_provider_code(code);
        }
        err
    }
}

#[async_trait]
impl PaymentGateway for TrexPayGateway {
    async fn create_deposit(&self, request: DepositRequest) -> Result<Deposit, GatewayError> {
        let (token, secret) = self.credentials()?;
        let body = self.build_deposit_body(token, secret, &request);

        tracing::info!(
            amount = request.amount,
            customer = %request.customer.name,
            postback = %self.config.postback_url,
            "Creating PIX deposit"
        );

        let url = format!("{}/api/wallet/deposit/payment", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error_from_response(response).await);
        }

        let deposit: DepositResponseBody = response.json().await.map_err(|e| {
            GatewayError::malformed(format!("Failed to decode deposit response: {}", e))
        })?;

        tracing::info!(
            transaction_id = deposit.transaction_id.as_deref(),
            "PIX deposit created"
        );

        Ok(Deposit {
            transaction_id: deposit.transaction_id,
            qr_code: deposit.qr_code,
            qr_code_base64: deposit.qr_code_base64,
            pix_key: deposit.pix_key,
            expires_at: deposit.expires_at,
        })
    }

    async fn deposit_status(&self, transaction_id: &str) -> Result<DepositStatus, GatewayError> {
        tracing::info!(transaction_id, "Polling deposit status");

        let url = format!("{}/api/status", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&StatusRequestBody { transaction_id })
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error_from_response(response).await);
        }

        let body: StatusResponseBody = response.json().await.map_err(|e| {
            GatewayError::malformed(format!("Failed to decode status response: {}", e))
        })?;

        tracing::info!(transaction_id, status = body.status.as_str(), "Deposit status");

        Ok(DepositStatus {
            transaction_id: transaction_id.to_string(),
            status: body.status,
            amount: body.amount,
            paid_at: body.paid_at,
        })
    }
}
