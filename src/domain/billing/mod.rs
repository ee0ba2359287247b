//! Billing domain module.
//!
//! Error taxonomy for the billing operations. The billing value objects
//! themselves live alongside the `BillingProvider` port since they describe
//! its contract.

mod errors;

pub use errors::BillingError;
