//! Polar billing provider adapter.
//!
//! Implements the `BillingProvider` port against Polar's REST API:
//! - Hosted checkout session creation
//! - Product, order, and subscription retrieval
//!
//! # Reliability
//!
//! - Bearer authentication on every request
//! - Explicit per-request timeout
//! - Bounded single retry on transient transport failures (never on 4xx/5xx)
//!
//! # Configuration
//!
//! Driven by `config::PolarConfig`:
//! - `PLARA__POLAR__ACCESS_TOKEN`
//! - `PLARA__POLAR__ORGANIZATION_ID`
//! - `PLARA__POLAR__API_BASE_URL` (optional)

mod api_types;
mod mock_provider;
mod polar_adapter;

pub use api_types::{
    ListResponse, PolarCheckout, PolarCustomer, PolarOrder, PolarProduct, PolarSubscription,
};
pub use mock_provider::MockBillingProvider;
pub use polar_adapter::{PolarApiConfig, PolarBillingAdapter};
