//! Billing provider port for the upstream payment API.
//!
//! Defines the contract for the hosted-checkout provider (Polar).
//! Implementations issue authenticated HTTP requests; the mock implementation
//! backs handler tests without any network access.
//!
//! # Design
//!
//! - **Provider agnostic**: nothing Polar-specific leaks through the port
//! - **Stateless**: every call is a live pass-through, no local bookkeeping
//! - **Single-shot**: failure semantics carry the upstream status and body,
//!   no retries beyond the adapter's transport-level policy

use crate::domain::billing::BillingError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Port for the upstream billing provider.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a hosted checkout session for a product.
    ///
    /// Returns the URL where the customer completes payment.
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, ProviderError>;

    /// List the organization's non-archived products.
    ///
    /// Products without any price entry are omitted.
    async fn list_products(&self) -> Result<Vec<Product>, ProviderError>;

    /// Fetch a single checkout session by ID.
    async fn get_checkout(&self, checkout_id: &str) -> Result<CheckoutDetail, ProviderError>;

    /// List all orders visible to the organization.
    ///
    /// Customer filtering happens caller-side; the provider API is not
    /// assumed to support server-side email filtering.
    async fn list_orders(&self) -> Result<Vec<Order>, ProviderError>;

    /// List all subscriptions visible to the organization.
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ProviderError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Product to sell.
    pub product_id: String,

    /// Customer email for pre-fill.
    pub customer_email: Option<String>,

    /// Customer display name.
    pub customer_name: Option<String>,

    /// Free-form key/value metadata attached to the checkout.
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// A created hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's checkout ID.
    pub id: String,

    /// URL for the customer to complete payment.
    pub url: String,

    /// When the session expires (RFC 3339), if the provider reports it.
    pub expires_at: Option<String>,
}

/// Detailed checkout state, used for payment-completion polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutDetail {
    /// Provider's checkout ID.
    pub id: String,

    /// Checkout status (open, confirmed, succeeded, expired, ...).
    pub status: String,

    /// Customer email used during checkout.
    pub customer_email: Option<String>,

    /// Total amount in minor currency units.
    pub amount: Option<i64>,

    /// Currency code (lowercase).
    pub currency: Option<String>,

    /// Name of the product being purchased.
    pub product_name: Option<String>,

    /// When the checkout was created (RFC 3339).
    pub created_at: Option<String>,

    /// When payment was confirmed (RFC 3339), if it was.
    pub confirmed_at: Option<String>,
}

/// A sellable product with its display price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Provider's product ID.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Product description.
    pub description: Option<String>,

    /// Price in minor currency units (first price entry).
    pub price_amount: i64,

    /// Currency code (lowercase).
    pub price_currency: String,

    /// Whether the price recurs.
    pub is_recurring: bool,

    /// Billing interval (month, year), only for recurring prices.
    pub interval: Option<String>,
}

/// A completed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Provider's order ID.
    pub id: String,

    /// Customer email on the order.
    pub customer_email: String,

    /// Name of the purchased product.
    pub product_name: String,

    /// Amount paid in minor currency units.
    pub amount: i64,

    /// Currency code (lowercase).
    pub currency: String,

    /// Order status string as reported by the provider.
    pub status: String,

    /// When the order was created (RFC 3339).
    pub created_at: String,
}

/// A customer subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider's subscription ID.
    pub id: String,

    /// Customer email on the subscription.
    pub customer_email: String,

    /// Subscription status string as reported by the provider.
    pub status: String,

    /// End of the current billing period (RFC 3339).
    pub current_period_end: Option<String>,
}

impl Subscription {
    /// Whether this subscription currently grants access.
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Errors from billing provider operations.
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Error code for categorization.
    pub code: ProviderErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Upstream HTTP status, when a response was received.
    pub status: Option<u16>,

    /// Upstream response body, passed through verbatim.
    pub body: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl ProviderError {
    /// Create a new provider error.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            body: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create a transport-level error (connect failure, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Create an error from a non-2xx upstream response.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            code: ProviderErrorCode::Upstream,
            message: format!("Polar API error ({})", status),
            status: Some(status),
            body: Some(body),
            retryable: false,
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(ProviderErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Create an error for an unparsable upstream response.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProviderError {}

impl From<ProviderError> for BillingError {
    fn from(err: ProviderError) -> Self {
        match err.code {
            ProviderErrorCode::NotFound => BillingError::NotFound(
                err.message
                    .strip_suffix(" not found")
                    .unwrap_or(&err.message)
                    .to_string(),
            ),
            ProviderErrorCode::Upstream => {
                BillingError::upstream(err.status, err.body.unwrap_or(err.message))
            }
            ProviderErrorCode::NetworkError | ProviderErrorCode::InvalidResponse => {
                BillingError::upstream(None, err.message)
            }
        }
    }
}

/// Billing provider error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Resource not found upstream.
    NotFound,

    /// Upstream returned a non-2xx response.
    Upstream,

    /// Upstream response could not be parsed.
    InvalidResponse,
}

impl ProviderErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderErrorCode::NetworkError)
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProviderErrorCode::NetworkError => "network_error",
            ProviderErrorCode::NotFound => "not_found",
            ProviderErrorCode::Upstream => "upstream_error",
            ProviderErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}
