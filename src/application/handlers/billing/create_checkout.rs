//! CreateCheckoutHandler - Command handler for hosted checkout creation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingProvider, CheckoutSession, CreateCheckoutRequest};

/// Command to create a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    /// Product to sell.
    pub product_id: String,

    /// Customer email for pre-fill.
    pub customer_email: Option<String>,

    /// Customer display name.
    pub customer_name: Option<String>,

    /// Free-form metadata attached to the checkout.
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Result of checkout creation.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    /// The created session (URL, ID, expiry).
    pub checkout: CheckoutSession,
}

/// Handler for creating checkout sessions.
pub struct CreateCheckoutHandler {
    billing_provider: Arc<dyn BillingProvider>,
}

impl CreateCheckoutHandler {
    pub fn new(billing_provider: Arc<dyn BillingProvider>) -> Self {
        Self { billing_provider }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, BillingError> {
        // Validate before touching the provider; a missing product must not
        // cause any upstream call.
        if cmd.product_id.is_empty() {
            return Err(BillingError::validation(
                "product_id",
                "product_id is required",
            ));
        }

        let checkout = self
            .billing_provider
            .create_checkout(CreateCheckoutRequest {
                product_id: cmd.product_id,
                customer_email: cmd.customer_email,
                customer_name: cmd.customer_name,
                metadata: cmd.metadata,
            })
            .await?;

        tracing::info!(checkout_id = %checkout.id, "Checkout session created");

        Ok(CreateCheckoutResult { checkout })
    }
}
