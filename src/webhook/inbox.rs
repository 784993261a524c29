use super::{WebhookEvent, WebhookPayload, accept};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Producer half handed to transports (HTTP listener, in-process senders).
#[derive(Clone, Debug)]
pub struct WebhookSender {
    tx: mpsc::UnboundedSender<WebhookEvent>,
}

impl WebhookSender {
    /// Queue an event. Returns `false` once the inbox is gone.
    pub fn deliver(&self, event: WebhookEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Inbound event queue owned by the component that holds the store.
///
/// Origin and payload checks happen on the receiving side in [`next_payload`](Self::next_payload).
#[derive(Clone, Debug)]
pub struct WebhookInbox {
    sender: WebhookSender,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<WebhookEvent>>>,
    origin: String,
}

impl WebhookInbox {
    pub fn new(origin: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            sender: WebhookSender { tx },
            rx: Arc::new(Mutex::new(rx)),
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn sender(&self) -> WebhookSender {
        self.sender.clone()
    }

    pub fn deliver(&self, event: WebhookEvent) -> bool {
        self.sender.deliver(event)
    }

    /// Wait for the next event that passes the origin and payload checks.
    /// Events that fail are dropped.
    pub async fn next_payload(&self) -> Option<WebhookPayload> {
        let mut rx = self.rx.lock().await;
        while let Some(event) = rx.recv().await {
            if let Some(payload) = accept(&event, &self.origin) {
                return Some(payload);
            }
        }
        None
    }

    /// Drain whatever is queued right now without waiting.
    pub async fn drain(&self) -> Vec<WebhookPayload> {
        let mut rx = self.rx.lock().await;
        let mut payloads = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let Some(payload) = accept(&event, &self.origin) {
                payloads.push(payload);
            }
        }
        payloads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn next_payload_skips_rejected_events() {
        let inbox = WebhookInbox::new("http://localhost:3000");
        let sender = inbox.sender();

        sender.deliver(WebhookEvent::new(
            Some("https://elsewhere.example".into()),
            json!({"type": "webhook", "payload": {"from": "+15550000000", "message": "spoof"}}),
        ));
        sender.deliver(WebhookEvent::new(
            None,
            json!({"type": "webhook", "payload": {"from": "", "message": "x"}}),
        ));
        sender.deliver(WebhookEvent::new(
            Some("http://localhost:3000".into()),
            json!({"type": "webhook", "payload": {"from": "5551234567", "message": "real"}}),
        ));

        let payload = inbox.next_payload().await.unwrap();
        assert_eq!(payload.message, "real");
        assert!(inbox.drain().await.is_empty());
    }
}
