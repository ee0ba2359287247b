//! ProcessWebhookHandler - Command handler for Polar webhook deliveries.
//!
//! Verifies the delivery signature, parses the event envelope, and
//! dispatches to a per-kind handler. Handlers are log-only stubs marking the
//! extension points for future business logic; once a delivery is
//! authenticated it is always acknowledged, so Polar never retries a
//! delivery we already received.

use crate::domain::billing::BillingError;
use crate::domain::webhook::{
    CheckoutEventData, EventKind, EventPayload, OrderEventData, SignatureVerifier,
    SubscriptionEventData, WebhookEvent,
};

/// Command to process a webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw delivery body, exactly as received.
    pub payload: Vec<u8>,

    /// Value of the `Polar-Signature` header (empty when absent).
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessWebhookResult {
    /// A recognized event was dispatched to its handler.
    Received { event_type: String },

    /// The event type is not recognized; logged and acknowledged.
    Ignored { event_type: String },
}

impl ProcessWebhookResult {
    /// The wire-level event type string of the processed delivery.
    pub fn event_type(&self) -> &str {
        match self {
            ProcessWebhookResult::Received { event_type }
            | ProcessWebhookResult::Ignored { event_type } => event_type,
        }
    }
}

/// Handler for processing Polar webhook deliveries.
#[derive(Clone)]
pub struct ProcessWebhookHandler {
    verifier: SignatureVerifier,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: SignatureVerifier) -> Self {
        Self { verifier }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, BillingError> {
        // 1. Authenticate. Nothing is parsed or dispatched on failure.
        if !self.verifier.verify(&cmd.payload, &cmd.signature) {
            tracing::warn!("Rejected webhook delivery with invalid signature");
            return Err(BillingError::invalid_webhook_signature());
        }

        // 2. Parse the envelope.
        let event = WebhookEvent::parse(&cmd.payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            BillingError::invalid_payload(e.to_string())
        })?;

        let event_type = event.kind.as_str().to_string();
        tracing::info!(event_type = %event_type, "Webhook received");

        // 3. Dispatch to exactly one handler.
        let result = match (&event.kind, &event.payload) {
            (EventKind::CheckoutCreated, EventPayload::Checkout(data)) => {
                self.on_checkout_created(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::CheckoutUpdated, EventPayload::Checkout(data)) => {
                self.on_checkout_updated(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::OrderCreated, EventPayload::Order(data)) => {
                self.on_order_created(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::SubscriptionCreated, EventPayload::Subscription(data)) => {
                self.on_subscription_created(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::SubscriptionUpdated, EventPayload::Subscription(data)) => {
                self.on_subscription_updated(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::SubscriptionCanceled, EventPayload::Subscription(data)) => {
                self.on_subscription_canceled(data);
                ProcessWebhookResult::Received { event_type }
            }
            (EventKind::Unrecognized(_), _) => {
                tracing::warn!(event_type = %event_type, "Unhandled webhook event type");
                ProcessWebhookResult::Ignored { event_type }
            }
            // A known kind whose payload did not match the expected shape.
            // Still acknowledged; the delivery is authentic.
            (_, _) => {
                tracing::warn!(
                    event_type = %event_type,
                    "Webhook payload did not match the expected shape"
                );
                ProcessWebhookResult::Received { event_type }
            }
        };

        Ok(result)
    }

    fn on_checkout_created(&self, data: &CheckoutEventData) {
        tracing::info!(
            checkout_id = ?data.id,
            customer_email = ?data.customer_email,
            amount = ?data.amount,
            currency = ?data.currency,
            "Checkout created"
        );
    }

    fn on_checkout_updated(&self, data: &CheckoutEventData) {
        tracing::info!(checkout_id = ?data.id, status = ?data.status, "Checkout updated");
    }

    fn on_order_created(&self, data: &OrderEventData) {
        tracing::info!(
            order_id = ?data.id,
            customer_email = ?data.customer_email,
            product = ?data.product.as_ref().and_then(|p| p.name.as_deref()),
            amount = ?data.amount,
            currency = ?data.currency,
            "Order created, payment successful"
        );
        // TODO: grant product access and send the confirmation email once
        // fulfilment lands.
    }

    fn on_subscription_created(&self, data: &SubscriptionEventData) {
        tracing::info!(
            subscription_id = ?data.id,
            customer_email = ?data.customer_email,
            status = ?data.status,
            "Subscription created"
        );
    }

    fn on_subscription_updated(&self, data: &SubscriptionEventData) {
        tracing::info!(subscription_id = ?data.id, status = ?data.status, "Subscription updated");
    }

    fn on_subscription_canceled(&self, data: &SubscriptionEventData) {
        tracing::info!(
            subscription_id = ?data.id,
            customer_email = ?data.customer_email,
            "Subscription canceled"
        );
        // TODO: revoke subscription access once fulfilment lands.
    }
}
