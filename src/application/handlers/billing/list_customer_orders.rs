//! ListCustomerOrdersHandler - Query handler for a customer's orders.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingProvider, Order};

/// Query for all orders belonging to a customer.
#[derive(Debug, Clone)]
pub struct ListCustomerOrdersQuery {
    /// Customer email, matched exactly (case-sensitive, no normalization).
    pub customer_email: String,
}

/// Handler for listing a customer's orders.
///
/// The provider API is not assumed to support server-side email filtering,
/// so the organization's orders are fetched and filtered here.
pub struct ListCustomerOrdersHandler {
    billing_provider: Arc<dyn BillingProvider>,
}

impl ListCustomerOrdersHandler {
    pub fn new(billing_provider: Arc<dyn BillingProvider>) -> Self {
        Self { billing_provider }
    }

    pub async fn handle(
        &self,
        query: ListCustomerOrdersQuery,
    ) -> Result<Vec<Order>, BillingError> {
        let orders = self.billing_provider.list_orders().await?;

        Ok(orders
            .into_iter()
            .filter(|order| order.customer_email == query.customer_email)
            .collect())
    }
}
