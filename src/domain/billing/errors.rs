//! Billing error types.
//!
//! Errors surfaced by the billing operations: request validation, webhook
//! authentication, upstream Polar failures, and server-side configuration.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | InvalidPayload | 400 |
//! | InvalidWebhookSignature | 401 |
//! | NotFound | 404 |
//! | Upstream | 500 |
//! | Configuration | 500 |

/// Billing-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// A required request field is missing or malformed.
    ValidationFailed { field: String, message: String },

    /// Webhook body could not be parsed as an event envelope.
    InvalidPayload(String),

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// The requested resource does not exist upstream.
    NotFound(String),

    /// Upstream Polar call failed (transport error or non-2xx response).
    ///
    /// `status` is absent for transport failures; `message` carries the
    /// upstream response body verbatim when one was received.
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Server-side configuration is missing or invalid.
    Configuration(String),
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        BillingError::InvalidPayload(message.into())
    }

    pub fn invalid_webhook_signature() -> Self {
        BillingError::InvalidWebhookSignature
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        BillingError::NotFound(resource.into())
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        BillingError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        BillingError::Configuration(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            BillingError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            BillingError::InvalidPayload(message) => {
                format!("Invalid webhook payload: {}", message)
            }
            BillingError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            BillingError::NotFound(resource) => format!("{} not found", resource),
            BillingError::Upstream {
                status: Some(status),
                message,
            } => format!("Polar API error ({}): {}", status, message),
            BillingError::Upstream {
                status: None,
                message,
            } => format!("Polar API unreachable: {}", message),
            BillingError::Configuration(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}
