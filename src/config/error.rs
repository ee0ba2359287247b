//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Polar API base URL")]
    InvalidApiBaseUrl,

    #[error("Invalid frontend URL")]
    InvalidFrontendUrl,

    #[error("Webhook secret must not be empty when set")]
    EmptyWebhookSecret,

    #[error("Webhook secret is required in production")]
    WebhookSecretRequiredInProduction,
}
