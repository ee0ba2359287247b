//! Axum router configuration for the billing endpoints.
//!
//! This module defines the route structure for the payment API and wires
//! routes to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_subscription, create_checkout, get_checkout_status, handle_polar_webhook, health,
    list_customer_orders, list_products, BillingAppState,
};

/// Create the storefront-facing API router.
///
/// # Routes
///
/// - `GET /products` - List available products
/// - `POST /checkout` - Create a hosted checkout session
/// - `GET /checkout/:checkout_id` - Get checkout status
/// - `GET /orders/:customer_email` - List a customer's orders
/// - `GET /subscriptions/:customer_email` - Check subscription status
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/checkout", post(create_checkout))
        .route("/checkout/:checkout_id", get(get_checkout_status))
        .route("/orders/:customer_email", get(list_customer_orders))
        .route("/subscriptions/:customer_email", get(check_subscription))
}

/// Create the webhook router.
///
/// Separate from the storefront routes because webhooks carry no user
/// context; authenticity comes from the signature alone.
///
/// # Routes
/// - `POST /polar` - Handle Polar webhook deliveries
pub fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/polar", post(handle_polar_webhook))
}

/// Create the complete application router.
///
/// Mounts the health check at the root, storefront routes under `/api`,
/// webhooks under `/api/webhooks`, and the legacy `/webhook` alias kept for
/// deployments configured against the old path.
pub fn api_router() -> Router<BillingAppState> {
    Router::new()
        .route("/", get(health))
        .nest("/api", billing_routes())
        .nest("/api/webhooks", webhook_routes())
        .route("/webhook", post(handle_polar_webhook))
}
