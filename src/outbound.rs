//! Outbound send path: validate, normalize, hand to the gateway, record.

use crate::config::GatewayCredentials;
use crate::gateway::{OutboundSms, SendError, SmsGateway};
use crate::phone::normalize;
use crate::store::ConversationStore;
use crate::types::Message;

#[derive(Clone, Debug, PartialEq)]
pub enum SendOutcome {
    /// Number or text was empty; nothing was sent.
    Skipped,
    Sent { to: String, message: Message },
}

/// Validate and normalize user input. `None` means there is nothing to send.
pub fn prepare(raw_number: &str, text: &str) -> Option<OutboundSms> {
    if raw_number.is_empty() || text.is_empty() {
        return None;
    }
    Some(OutboundSms {
        to: normalize(raw_number),
        message: text.to_string(),
    })
}

/// Send one SMS and, on success, record it under the normalized number.
///
/// Failures leave the store untouched and are not retried.
pub async fn send(
    store: &mut ConversationStore,
    gateway: &dyn SmsGateway,
    credentials: &GatewayCredentials,
    raw_number: &str,
    text: &str,
) -> Result<SendOutcome, SendError> {
    let Some(sms) = prepare(raw_number, text) else {
        return Ok(SendOutcome::Skipped);
    };
    deliver(gateway, credentials, &sms).await?;
    Ok(record_sent(store, sms))
}

/// Hand a prepared message to the gateway, logging any failure.
///
/// Holds no store borrow, so callers that keep the store behind a lock or
/// signal can await it and record the result afterwards.
pub async fn deliver(
    gateway: &dyn SmsGateway,
    credentials: &GatewayCredentials,
    sms: &OutboundSms,
) -> Result<(), SendError> {
    gateway
        .send_sms(credentials, sms)
        .await
        .inspect_err(|err| tracing::error!("failed to send message to {}: {}", sms.to, err))
}

/// Append a gateway-accepted message to the store.
pub fn record_sent(store: &mut ConversationStore, sms: OutboundSms) -> SendOutcome {
    let message = Message::sent(sms.message);
    if let Err(err) = store.append(&sms.to, message.clone()) {
        tracing::error!("sent message to {} but failed to persist it: {}", sms.to, err);
    }
    tracing::info!("sent message to {}", sms.to);
    SendOutcome::Sent {
        to: sms.to,
        message,
    }
}

/// The phone number and message inputs of the messenger screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    pub phone_number: String,
    pub message_text: String,
}

impl Composer {
    /// Send the current input. The message text is cleared only after a successful send.
    pub async fn send(
        &mut self,
        store: &mut ConversationStore,
        gateway: &dyn SmsGateway,
        credentials: &GatewayCredentials,
    ) -> Result<SendOutcome, SendError> {
        let Some(sms) = self.outbound() else {
            return Ok(SendOutcome::Skipped);
        };
        deliver(gateway, credentials, &sms).await?;
        let outcome = record_sent(store, sms);
        self.message_sent();
        Ok(outcome)
    }

    /// The message the current input would send, if any.
    pub fn outbound(&self) -> Option<OutboundSms> {
        prepare(&self.phone_number, &self.message_text)
    }

    /// Reset the text after the gateway accepted it. The number stays for the next message.
    pub fn message_sent(&mut self) {
        self.message_text.clear();
    }

    pub fn can_send(&self) -> bool {
        !self.phone_number.is_empty() && !self.message_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_rejects_empty_input() {
        assert_eq!(prepare("", "hi"), None);
        assert_eq!(prepare("5551234567", ""), None);
    }

    #[test]
    fn prepare_normalizes_number() {
        let sms = prepare("555-123-4567", "hi").unwrap();
        assert_eq!(sms.to, "+15551234567");
        assert_eq!(sms.message, "hi");
    }

    #[test]
    fn composer_can_send_requires_both_fields() {
        let mut composer = Composer::default();
        assert!(!composer.can_send());
        composer.phone_number = "5551234567".into();
        assert!(!composer.can_send());
        composer.message_text = "hello".into();
        assert!(composer.can_send());
    }

    #[test]
    fn composer_outbound_matches_prepare() {
        let mut composer = Composer {
            phone_number: "(555) 123-4567".into(),
            message_text: "hello".into(),
        };
        assert_eq!(composer.outbound(), prepare("(555) 123-4567", "hello"));

        composer.message_sent();
        assert_eq!(composer.message_text, "");
        assert_eq!(composer.phone_number, "(555) 123-4567");
        assert_eq!(composer.outbound(), None);
    }
}
