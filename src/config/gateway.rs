//! PIX gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// PIX gateway configuration (TrexPay)
///
/// Credentials are optional on purpose: a deployment without them still
/// boots, reports "not configured" on the diagnostics endpoint, and rejects
/// deposit creation with `INVALID_CREDENTIALS` at call time.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API token
    pub token: Option<SecretString>,

    /// API secret, also the webhook signing secret
    pub secret: Option<SecretString>,

    /// URL the gateway calls back with payment notifications
    #[serde(default = "default_postback_url")]
    pub postback_url: String,
}

impl GatewayConfig {
    /// Check whether both credentials are present
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.secret.is_some()
    }

    /// First eight characters of the token for diagnostics; never the full value
    pub fn token_preview(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| t.expose_secret().chars().take(8).collect())
    }

    /// Length of the configured token (0 when absent)
    pub fn token_length(&self) -> usize {
        self.token.as_ref().map(|t| t.expose_secret().len()).unwrap_or(0)
    }

    /// Length of the configured secret (0 when absent)
    pub fn secret_length(&self) -> usize {
        self.secret
            .as_ref()
            .map(|s| s.expose_secret().len())
            .unwrap_or(0)
    }

    /// Validate gateway configuration
    ///
    /// Absent credentials pass validation; they are a per-call failure,
    /// not a startup failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.postback_url.starts_with("http") {
            return Err(ValidationError::InvalidPostbackUrl);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            token: None,
            secret: None,
            postback_url: default_postback_url(),
        }
    }
}

fn default_postback_url() -> String {
    "http://localhost:8080/api/webhooks/pix".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials() -> GatewayConfig {
        GatewayConfig {
            token: Some(SecretString::new("tok_1234567890".to_string())),
            secret: Some(SecretString::new("sec_abcdef".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_unconfigured() {
        let config = GatewayConfig::default();
        assert!(!config.is_configured());
        assert!(config.token_preview().is_none());
        assert_eq!(config.token_length(), 0);
        assert_eq!(config.secret_length(), 0);
    }

    #[test]
    fn test_configured_with_both_credentials() {
        assert!(with_credentials().is_configured());

        let token_only = GatewayConfig {
            token: Some(SecretString::new("tok_x".to_string())),
            ..Default::default()
        };
        assert!(!token_only.is_configured());
    }

    #[test]
    fn test_token_preview_is_truncated() {
        let config = with_credentials();
        assert_eq!(config.token_preview().unwrap(), "tok_1234");
        assert_eq!(config.token_length(), 14);
        assert_eq!(config.secret_length(), 10);
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let rendered = format!("{:?}", with_credentials());
        assert!(!rendered.contains("tok_1234567890"));
        assert!(!rendered.contains("sec_abcdef"));
    }

    #[test]
    fn test_validation_accepts_missing_credentials() {
        assert!(GatewayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_postback() {
        let config = GatewayConfig {
            postback_url: "ftp://example.com/hook".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
