//! Polar-specific wire types.
//!
//! These types represent Polar API objects as they arrive in REST responses.
//! Fields are permissive (optional or defaulted) so responses parse across
//! API revisions; mapping into port DTOs happens in the adapter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ════════════════════════════════════════════════════════════════════════════════
// List Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Paginated list envelope returned by Polar collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    /// The page of results.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Pagination metadata.
    pub pagination: Option<Pagination>,
}

/// Pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    /// Total number of results across pages.
    pub total_count: Option<i64>,

    /// Highest available page number.
    pub max_page: Option<i64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for checkout creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckoutBody {
    /// Products offered in the checkout (single-product flow).
    pub products: Vec<String>,

    /// Redirect URL after successful payment; carries the provider's
    /// `{CHECKOUT_ID}` placeholder verbatim.
    pub success_url: String,

    /// Customer email for pre-fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Customer display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Free-form metadata attached to the checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Polar Checkout object.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarCheckout {
    /// Unique checkout identifier.
    pub id: String,

    /// Hosted checkout page URL.
    pub url: Option<String>,

    /// Checkout status (open, confirmed, succeeded, expired, ...).
    pub status: Option<String>,

    /// When the session expires (RFC 3339).
    pub expires_at: Option<String>,

    /// Customer email used during checkout.
    pub customer_email: Option<String>,

    /// Total amount in minor currency units.
    pub amount: Option<i64>,

    /// Currency code (lowercase).
    pub currency: Option<String>,

    /// Product being purchased.
    pub product: Option<PolarProductRef>,

    /// When the checkout was created (RFC 3339).
    pub created_at: Option<String>,

    /// When payment was confirmed (RFC 3339).
    pub confirmed_at: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Product
// ════════════════════════════════════════════════════════════════════════════════

/// Polar Product object.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarProduct {
    /// Unique product identifier.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Product description.
    pub description: Option<String>,

    /// Whether the product has been archived.
    #[serde(default)]
    pub is_archived: bool,

    /// Price entries; the first one is surfaced to the storefront.
    #[serde(default)]
    pub prices: Vec<PolarPrice>,
}

/// Single price entry on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarPrice {
    /// Price in minor currency units.
    #[serde(default)]
    pub price_amount: i64,

    /// Currency code (lowercase).
    #[serde(default)]
    pub price_currency: String,

    /// Whether this price recurs.
    #[serde(default)]
    pub is_recurring: bool,

    /// Billing interval (month, year) for recurring prices.
    pub recurring_interval: Option<String>,
}

/// Slim product reference embedded in orders and checkouts.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarProductRef {
    /// Product name.
    pub name: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Order & Subscription
// ════════════════════════════════════════════════════════════════════════════════

/// Customer reference embedded in orders and subscriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarCustomer {
    /// Customer email address.
    pub email: Option<String>,

    /// Customer name.
    pub name: Option<String>,
}

/// Polar Order object.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarOrder {
    /// Unique order identifier.
    pub id: String,

    /// Amount paid in minor currency units.
    #[serde(default)]
    pub amount: i64,

    /// Currency code (lowercase).
    #[serde(default)]
    pub currency: String,

    /// Order status.
    #[serde(default)]
    pub status: String,

    /// When the order was created (RFC 3339).
    #[serde(default)]
    pub created_at: String,

    /// Customer who placed the order.
    pub customer: Option<PolarCustomer>,

    /// Product that was purchased.
    pub product: Option<PolarProductRef>,
}

/// Polar Subscription object.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarSubscription {
    /// Unique subscription identifier.
    pub id: String,

    /// Subscription status (active, canceled, ...).
    #[serde(default)]
    pub status: String,

    /// End of the current billing period (RFC 3339).
    pub current_period_end: Option<String>,

    /// Customer who owns the subscription.
    pub customer: Option<PolarCustomer>,
}
