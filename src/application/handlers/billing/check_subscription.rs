//! CheckSubscriptionHandler - Query handler for subscription access checks.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::ports::{BillingProvider, Subscription};

/// Query for a customer's active-subscription status.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionQuery {
    /// Customer email, matched exactly (case-sensitive).
    pub customer_email: String,
}

/// Result of the subscription check.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionResult {
    /// Whether the customer has at least one active subscription.
    pub has_active_subscription: bool,

    /// The first active subscription found, if any.
    pub subscription: Option<Subscription>,
}

/// Handler for checking whether a customer has an active subscription.
///
/// Linear scan over the organization's subscriptions, short-circuiting on
/// the first active match.
pub struct CheckSubscriptionHandler {
    billing_provider: Arc<dyn BillingProvider>,
}

impl CheckSubscriptionHandler {
    pub fn new(billing_provider: Arc<dyn BillingProvider>) -> Self {
        Self { billing_provider }
    }

    pub async fn handle(
        &self,
        query: CheckSubscriptionQuery,
    ) -> Result<CheckSubscriptionResult, BillingError> {
        let subscriptions = self.billing_provider.list_subscriptions().await?;

        let active = subscriptions
            .into_iter()
            .find(|sub| sub.customer_email == query.customer_email && sub.is_active());

        Ok(CheckSubscriptionResult {
            has_active_subscription: active.is_some(),
            subscription: active,
        })
    }
}
