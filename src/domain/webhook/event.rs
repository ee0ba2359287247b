//! Polar webhook event model.
//!
//! Deliveries arrive as a `{type, data}` envelope where the shape of `data`
//! varies by event type. The loose envelope is parsed into a closed set of
//! known event kinds, each carrying its own payload shape, plus an
//! `Unrecognized` fallback so unknown types can be acknowledged rather than
//! rejected.

use serde::Deserialize;
use serde_json::Value;

/// Event types emitted by Polar that this backend recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Customer opened a hosted checkout page.
    CheckoutCreated,

    /// Checkout state changed (confirmed, expired, ...).
    CheckoutUpdated,

    /// Payment completed and an order was created.
    OrderCreated,

    /// Subscription started.
    SubscriptionCreated,

    /// Subscription state changed (plan, billing period, ...).
    SubscriptionUpdated,

    /// Subscription was canceled.
    SubscriptionCanceled,

    /// Any event type this backend does not handle.
    Unrecognized(String),
}

impl EventKind {
    /// Map a wire-level `type` string to an event kind.
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "checkout.created" => EventKind::CheckoutCreated,
            "checkout.updated" => EventKind::CheckoutUpdated,
            "order.created" => EventKind::OrderCreated,
            "subscription.created" => EventKind::SubscriptionCreated,
            "subscription.updated" => EventKind::SubscriptionUpdated,
            "subscription.canceled" => EventKind::SubscriptionCanceled,
            other => EventKind::Unrecognized(other.to_string()),
        }
    }

    /// The wire-level `type` string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::CheckoutCreated => "checkout.created",
            EventKind::CheckoutUpdated => "checkout.updated",
            EventKind::OrderCreated => "order.created",
            EventKind::SubscriptionCreated => "subscription.created",
            EventKind::SubscriptionUpdated => "subscription.updated",
            EventKind::SubscriptionCanceled => "subscription.canceled",
            EventKind::Unrecognized(other) => other,
        }
    }
}

/// A verified, parsed webhook delivery.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Which lifecycle event occurred.
    pub kind: EventKind,

    /// Event payload, typed per kind.
    pub payload: EventPayload,
}

/// Typed payload variants per event family.
///
/// Payload structs are fully defaulted so a sparse `data` object still
/// parses; `Raw` carries anything that does not fit the expected shape.
/// Only the envelope itself can fail to parse.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// Checkout session data (`checkout.*` events).
    Checkout(CheckoutEventData),

    /// Order data (`order.*` events).
    Order(OrderEventData),

    /// Subscription data (`subscription.*` events).
    Subscription(SubscriptionEventData),

    /// Payload for unrecognized kinds, or a known kind whose `data` did not
    /// match the expected shape.
    Raw(Value),
}

/// Checkout session fields surfaced in webhook payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutEventData {
    pub id: Option<String>,
    pub status: Option<String>,
    pub customer_email: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// Order fields surfaced in webhook payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderEventData {
    pub id: Option<String>,
    pub customer_email: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub product: Option<OrderProductRef>,
}

/// Product reference embedded in an order payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderProductRef {
    pub name: Option<String>,
}

/// Subscription fields surfaced in webhook payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionEventData {
    pub id: Option<String>,
    pub status: Option<String>,
    pub customer_email: Option<String>,
    pub current_period_end: Option<String>,
}

/// Wire-level event envelope.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    event_type: String,

    #[serde(default)]
    data: Value,
}

impl WebhookEvent {
    /// Parse a raw delivery body into a typed event.
    ///
    /// # Errors
    ///
    /// Fails only when the envelope itself is not valid JSON of the form
    /// `{type, data}`. Payloads that do not match the shape expected for a
    /// known kind degrade to `EventPayload::Raw` instead of failing, so a
    /// delivery is never rejected after authentication.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: RawEnvelope = serde_json::from_slice(body)?;
        let kind = EventKind::from_type(&envelope.event_type);

        let payload = match &kind {
            EventKind::CheckoutCreated | EventKind::CheckoutUpdated => {
                serde_json::from_value(envelope.data.clone())
                    .map(EventPayload::Checkout)
                    .unwrap_or(EventPayload::Raw(envelope.data))
            }
            EventKind::OrderCreated => serde_json::from_value(envelope.data.clone())
                .map(EventPayload::Order)
                .unwrap_or(EventPayload::Raw(envelope.data)),
            EventKind::SubscriptionCreated
            | EventKind::SubscriptionUpdated
            | EventKind::SubscriptionCanceled => serde_json::from_value(envelope.data.clone())
                .map(EventPayload::Subscription)
                .unwrap_or(EventPayload::Raw(envelope.data)),
            EventKind::Unrecognized(_) => EventPayload::Raw(envelope.data),
        };

        Ok(Self { kind, payload })
    }
}
