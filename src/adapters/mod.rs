//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API exposure (axum)
//! - `polar` - Polar billing provider client (reqwest)

pub mod http;
pub mod polar;

pub use polar::{MockBillingProvider, PolarApiConfig, PolarBillingAdapter};
