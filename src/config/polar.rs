//! Polar API configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Polar API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PolarConfig {
    /// Polar access token (polar_oat_... / polar_pat_...)
    pub access_token: String,

    /// Webhook signing secret shared with Polar.
    ///
    /// Optional at startup; the webhook endpoint rejects all deliveries
    /// while it is unset (fail closed). Required in production.
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// Organization scoping product/order/subscription visibility
    pub organization_id: String,

    /// Base URL for the Polar REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Storefront base URL used for checkout success redirects
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl PolarConfig {
    /// Validate Polar configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.access_token.is_empty() {
            return Err(ValidationError::MissingRequired("POLAR__ACCESS_TOKEN"));
        }
        if self.organization_id.is_empty() {
            return Err(ValidationError::MissingRequired("POLAR__ORGANIZATION_ID"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://") {
            return Err(ValidationError::InvalidFrontendUrl);
        }

        match &self.webhook_secret {
            Some(secret) if secret.is_empty() => return Err(ValidationError::EmptyWebhookSecret),
            None if *environment == Environment::Production => {
                return Err(ValidationError::WebhookSecretRequiredInProduction)
            }
            _ => {}
        }

        Ok(())
    }
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            webhook_secret: None,
            organization_id: String::new(),
            api_base_url: default_api_base_url(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.polar.sh".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}
