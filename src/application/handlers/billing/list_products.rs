//! ListProductsHandler - Query handler for the product catalog.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingProvider, Product};

/// Query for the available product catalog.
#[derive(Debug, Clone)]
pub struct ListProductsQuery {}

/// Handler for listing available products.
///
/// Pure pass-through; the provider already omits archived products and
/// products without a price entry.
pub struct ListProductsHandler {
    billing_provider: Arc<dyn BillingProvider>,
}

impl ListProductsHandler {
    pub fn new(billing_provider: Arc<dyn BillingProvider>) -> Self {
        Self { billing_provider }
    }

    pub async fn handle(&self, _query: ListProductsQuery) -> Result<Vec<Product>, BillingError> {
        Ok(self.billing_provider.list_products().await?)
    }
}
