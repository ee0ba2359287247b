//! Billing handlers.
//!
//! Command and query handlers for the payment intermediary operations:
//!
//! ## Commands
//! - Creating hosted checkout sessions
//! - Processing Polar webhooks
//!
//! ## Queries
//! - List available products
//! - Get checkout status
//! - List a customer's orders
//! - Check a customer's subscription status

mod check_subscription;
mod create_checkout;
mod get_checkout_status;
mod list_customer_orders;
mod list_products;
mod process_webhook;

// Commands
pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use process_webhook::{ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult};

// Queries
pub use check_subscription::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, CheckSubscriptionResult,
};
pub use get_checkout_status::{GetCheckoutStatusHandler, GetCheckoutStatusQuery};
pub use list_customer_orders::{ListCustomerOrdersHandler, ListCustomerOrdersQuery};
pub use list_products::{ListProductsHandler, ListProductsQuery};
