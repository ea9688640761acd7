//! Order tracking configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Order tracking configuration (UTMify)
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// UTMify API token; absence disables order reporting
    pub api_token: Option<SecretString>,

    /// Platform name attached to every reported order
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Public site URL, used to derive the webhook callback address
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl TrackingConfig {
    /// Check whether the tracking token is present
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    /// Webhook URL the gateway should be configured with
    pub fn webhook_url(&self) -> String {
        format!("{}/api/webhooks/pix", self.site_url.trim_end_matches('/'))
    }

    /// Validate tracking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.site_url.starts_with("http") {
            return Err(ValidationError::InvalidSiteUrl);
        }
        Ok(())
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            platform: default_platform(),
            site_url: default_site_url(),
        }
    }
}

fn default_platform() -> String {
    "CometaPapelaria".to_string()
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}
