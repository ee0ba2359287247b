//! Webhook domain module.
//!
//! Signature verification and the typed event model for Polar webhook
//! deliveries.
//!
//! # Module Structure
//!
//! - `signature` - HMAC-SHA256 verification with constant-time comparison
//! - `event` - Event envelope, closed kind enum, per-kind payloads

mod event;
mod signature;

pub use event::{
    CheckoutEventData, EventKind, EventPayload, OrderEventData, OrderProductRef,
    SubscriptionEventData, WebhookEvent,
};
pub use signature::{hex_encode, SignatureVerifier};
