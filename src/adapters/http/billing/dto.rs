//! HTTP DTOs (Data Transfer Objects) for the billing endpoints.
//!
//! These types define the JSON request/response structure for the API.
//! They serve as the boundary between HTTP and the application layer.

use crate::ports::{CheckoutDetail, CheckoutSession, Order, Product, Subscription};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a hosted checkout session.
///
/// `product_id` is deserialized as optional so its absence can surface as a
/// 400 validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCheckoutApiRequest {
    /// Product to sell.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Customer email for pre-fill.
    #[serde(default)]
    pub email: Option<String>,

    /// Customer display name.
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Free-form metadata attached to the checkout.
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for checkout creation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutApiResponse {
    /// URL where the customer completes payment.
    pub checkout_url: String,

    /// Provider's checkout ID.
    pub checkout_id: String,

    /// When the session expires (RFC 3339), if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl From<CheckoutSession> for CheckoutApiResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            checkout_url: session.url,
            checkout_id: session.id,
            expires_at: session.expires_at,
        }
    }
}

/// A product in the catalog response.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_amount: i64,
    pub price_currency: String,
    pub is_recurring: bool,
    pub interval: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price_amount: product.price_amount,
            price_currency: product.price_currency,
            is_recurring: product.is_recurring,
            interval: product.interval,
        }
    }
}

/// Response for checkout status polling.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStatusResponse {
    pub checkout_id: String,
    pub status: String,
    pub customer_email: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub product_name: Option<String>,
    pub created_at: Option<String>,
    pub confirmed_at: Option<String>,
}

impl From<CheckoutDetail> for CheckoutStatusResponse {
    fn from(detail: CheckoutDetail) -> Self {
        Self {
            checkout_id: detail.id,
            status: detail.status,
            customer_email: detail.customer_email,
            amount: detail.amount,
            currency: detail.currency,
            product_name: detail.product_name,
            created_at: detail.created_at,
            confirmed_at: detail.confirmed_at,
        }
    }
}

/// An order in the customer order listing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_email: String,
    pub product_name: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_email: order.customer_email,
            product_name: order.product_name,
            amount: order.amount,
            currency: order.currency,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// Active subscription summary.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionSummaryResponse {
    pub id: String,
    pub status: String,
    pub current_period_end: Option<String>,
}

impl From<Subscription> for SubscriptionSummaryResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            status: sub.status,
            current_period_end: sub.current_period_end,
        }
    }
}

/// Response for the subscription status check.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatusResponse {
    pub has_active_subscription: bool,
    pub subscription: Option<SubscriptionSummaryResponse>,
}

/// Acknowledgement body for webhook deliveries.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: &'static str,
    pub event_type: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub environment: &'static str,
    pub timestamp: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code.
    pub error: String,

    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checkout_request_with_only_product_id() {
        let req: CreateCheckoutApiRequest =
            serde_json::from_value(json!({"product_id": "prod_123"})).unwrap();

        assert_eq!(req.product_id.as_deref(), Some("prod_123"));
        assert!(req.email.is_none());
        assert!(req.metadata.is_none());
    }

    #[test]
    fn checkout_request_missing_product_id_still_deserializes() {
        let req: CreateCheckoutApiRequest =
            serde_json::from_value(json!({"email": "buyer@example.com"})).unwrap();

        assert!(req.product_id.is_none());
        assert_eq!(req.email.as_deref(), Some("buyer@example.com"));
    }

    #[test]
    fn checkout_request_with_metadata() {
        let req: CreateCheckoutApiRequest = serde_json::from_value(json!({
            "product_id": "prod_123",
            "metadata": {"plan": "pro", "seats": 3}
        }))
        .unwrap();

        let metadata = req.metadata.unwrap();
        assert_eq!(metadata["plan"], json!("pro"));
        assert_eq!(metadata["seats"], json!(3));
    }

    #[test]
    fn checkout_response_omits_absent_expiry() {
        let response = CheckoutApiResponse::from(CheckoutSession {
            id: "chk_1".to_string(),
            url: "https://pay/x".to_string(),
            expires_at: None,
        });

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["checkout_url"], "https://pay/x");
        assert_eq!(json["checkout_id"], "chk_1");
        assert!(json.get("expires_at").is_none());
    }

    #[test]
    fn subscription_status_serializes_null_subscription() {
        let response = SubscriptionStatusResponse {
            has_active_subscription: false,
            subscription: None,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["has_active_subscription"], false);
        assert_eq!(json["subscription"], serde_json::Value::Null);
    }

    #[test]
    fn error_response_shape() {
        let response = ErrorResponse::new("NOT_FOUND", "Checkout not found");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "Checkout not found");
    }
}
