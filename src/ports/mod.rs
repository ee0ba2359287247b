//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BillingProvider` - Upstream payment provider (checkout, products,
//!   orders, subscriptions)

mod billing_provider;

pub use billing_provider::{
    BillingProvider, CheckoutDetail, CheckoutSession, CreateCheckoutRequest, Order, Product,
    ProviderError, ProviderErrorCode, Subscription,
};
