//! Inbound webhook path
//!
//! Gateway notifications reach the app as [`WebhookEvent`]s delivered through
//! a [`WebhookInbox`]. The receiving side checks the event origin and payload
//! shape before anything touches the conversation store.
//!
//! - `inbox` - channel between event sources and the store owner
//! - `registration` - best-effort "listener started" notification
//! - `server` - HTTP listener that feeds the inbox (native only)

mod inbox;
mod registration;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use inbox::{WebhookInbox, WebhookSender};
pub use registration::{REGISTRATION_MESSAGE, register_listener};

use crate::phone::normalize;
use crate::store::ConversationStore;
use crate::types::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WEBHOOK_EVENT_TYPE: &str = "webhook";

/// An event as delivered by some transport, before any validation.
#[derive(Clone, Debug, PartialEq)]
pub struct WebhookEvent {
    /// `None` when delivered in-process without a source.
    pub origin: Option<String>,
    pub data: Value,
}

impl WebhookEvent {
    pub fn new(origin: Option<String>, data: Value) -> Self {
        Self { origin, data }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub from: String,
    pub message: String,
}

/// Trust and shape check. Returns the payload only for same-origin,
/// well-formed `{type: "webhook", payload: {from, message}}` events.
pub fn accept(event: &WebhookEvent, own_origin: &str) -> Option<WebhookPayload> {
    if let Some(origin) = &event.origin
        && origin != own_origin
    {
        tracing::debug!("discarding webhook event from foreign origin {}", origin);
        return None;
    }

    if event.data.get("type").and_then(Value::as_str) != Some(WEBHOOK_EVENT_TYPE) {
        return None;
    }

    let payload = event.data.get("payload")?;
    let from = payload.get("from").and_then(Value::as_str).unwrap_or("");
    let message = payload.get("message").and_then(Value::as_str).unwrap_or("");
    if from.is_empty() || message.is_empty() {
        tracing::debug!("ignoring webhook payload without sender or text");
        return None;
    }

    Some(WebhookPayload {
        from: from.to_string(),
        message: message.to_string(),
    })
}

/// Record an inbound message under the normalized sender. Returns the conversation key.
pub fn receive(store: &mut ConversationStore, payload: &WebhookPayload) -> String {
    let key = normalize(&payload.from);
    if let Err(err) = store.append(&key, Message::received(payload.message.clone())) {
        tracing::error!("received message from {} but failed to persist it: {}", key, err);
    }
    tracing::info!("received message from {}", key);
    key
}

/// [`accept`] then [`receive`]. `None` when the event was discarded.
pub fn ingest(
    store: &mut ConversationStore,
    event: &WebhookEvent,
    own_origin: &str,
) -> Option<String> {
    let payload = accept(event, own_origin)?;
    Some(receive(store, &payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "http://localhost:3000";

    fn event(origin: Option<&str>, data: Value) -> WebhookEvent {
        WebhookEvent::new(origin.map(str::to_string), data)
    }

    #[test]
    fn accepts_same_origin_and_sourceless_events() {
        let data = json!({"type": "webhook", "payload": {"from": "+15551234567", "message": "hello"}});
        let expected = WebhookPayload {
            from: "+15551234567".into(),
            message: "hello".into(),
        };
        assert_eq!(accept(&event(Some(ORIGIN), data.clone()), ORIGIN), Some(expected.clone()));
        assert_eq!(accept(&event(None, data), ORIGIN), Some(expected));
    }

    #[test]
    fn rejects_foreign_origin() {
        let data = json!({"type": "webhook", "payload": {"from": "+15551234567", "message": "hello"}});
        assert_eq!(accept(&event(Some("https://evil.example"), data), ORIGIN), None);
    }

    #[test]
    fn rejects_malformed_payloads() {
        for data in [
            json!({"type": "webhook", "payload": {"from": "", "message": "x"}}),
            json!({"type": "webhook", "payload": {"from": "+1555", "message": ""}}),
            json!({"type": "webhook", "payload": {"message": "Webhook listener started"}}),
            json!({"type": "webhook", "payload": {"from": 5551234567u64, "message": "x"}}),
            json!({"type": "webhook"}),
            json!({"type": "other", "payload": {"from": "+1555", "message": "x"}}),
            json!("webhook"),
            Value::Null,
        ] {
            assert_eq!(accept(&event(None, data.clone()), ORIGIN), None, "{data}");
        }
    }
}
