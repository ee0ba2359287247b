//! HTTP adapter for the billing endpoints.
//!
//! The dto/handlers/routes triple exposing the payment API over REST.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::{api_router, billing_routes, webhook_routes};
