//! GetCheckoutStatusHandler - Query handler for checkout completion polling.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingProvider, CheckoutDetail};

/// Query for a single checkout's status.
#[derive(Debug, Clone)]
pub struct GetCheckoutStatusQuery {
    /// Provider's checkout ID.
    pub checkout_id: String,
}

/// Handler for fetching checkout status.
pub struct GetCheckoutStatusHandler {
    billing_provider: Arc<dyn BillingProvider>,
}

impl GetCheckoutStatusHandler {
    pub fn new(billing_provider: Arc<dyn BillingProvider>) -> Self {
        Self { billing_provider }
    }

    pub async fn handle(
        &self,
        query: GetCheckoutStatusQuery,
    ) -> Result<CheckoutDetail, BillingError> {
        Ok(self
            .billing_provider
            .get_checkout(&query.checkout_id)
            .await?)
    }
}
