//! Outbound send path against an in-process gateway.

mod common;

use axum::http::StatusCode;
use common::MockGateway;
use sms_messenger::config::{GatewayConfig, GatewayCredentials};
use sms_messenger::gateway::{SendError, TextLinkGateway};
use sms_messenger::outbound::{Composer, SendOutcome, send};
use sms_messenger::storage::MemoryStorage;
use sms_messenger::store::ConversationStore;
use std::sync::Arc;

fn credentials() -> GatewayCredentials {
    GatewayCredentials {
        api_key: "test-key".into(),
        sim_card_id: "sim-7".into(),
    }
}

fn gateway_for(mock: &MockGateway) -> TextLinkGateway {
    TextLinkGateway::new(GatewayConfig {
        base_url: mock.address(),
    })
}

fn empty_store() -> ConversationStore {
    ConversationStore::load(Arc::new(MemoryStorage::new()))
}

#[tokio::test]
async fn successful_send_records_message_under_normalized_number() {
    let mock = MockGateway::start(StatusCode::OK).await;
    let gateway = gateway_for(&mock);
    let mut store = empty_store();

    let outcome = send(&mut store, &gateway, &credentials(), "555-123-4567", "hi")
        .await
        .unwrap();

    assert!(matches!(outcome, SendOutcome::Sent { ref to, .. } if to == "+15551234567"));
    assert_eq!(store.list_conversations(), vec!["+15551234567"]);
    let thread = store.get_thread("+15551234567");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].text, "hi");
    assert!(thread[0].is_sent);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/sms");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(requests[0].body["to"], "+15551234567");
    assert_eq!(requests[0].body["message"], "hi");
    assert_eq!(requests[0].body["sim_card_id"], "sim-7");
}

#[tokio::test]
async fn empty_input_makes_no_request() {
    let mock = MockGateway::start(StatusCode::OK).await;
    let gateway = gateway_for(&mock);
    let mut store = empty_store();

    let outcome = send(&mut store, &gateway, &credentials(), "", "hi")
        .await
        .unwrap();
    assert_eq!(outcome, SendOutcome::Skipped);

    let outcome = send(&mut store, &gateway, &credentials(), "5551234567", "")
        .await
        .unwrap();
    assert_eq!(outcome, SendOutcome::Skipped);

    assert!(mock.requests().is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn unauthorized_send_leaves_store_untouched() {
    let mock = MockGateway::start(StatusCode::UNAUTHORIZED).await;
    let gateway = gateway_for(&mock);
    let mut store = empty_store();

    let result = send(&mut store, &gateway, &credentials(), "5551234567", "hi").await;

    assert!(matches!(result, Err(SendError::Unauthorized { .. })));
    assert!(store.is_empty());
}

#[tokio::test]
async fn non_200_status_is_a_rejection() {
    for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::CREATED] {
        let mock = MockGateway::start(status).await;
        let gateway = gateway_for(&mock);
        let mut store = empty_store();

        let result = send(&mut store, &gateway, &credentials(), "5551234567", "hi").await;

        match result {
            Err(SendError::Rejected { status: got, .. }) => assert_eq!(got, status),
            other => panic!("expected rejection for {status}, got {other:?}"),
        }
        assert!(store.is_empty());
    }
}

#[tokio::test]
async fn unreachable_gateway_is_a_network_error() {
    let gateway = TextLinkGateway::new(GatewayConfig {
        base_url: "http://127.0.0.1:1".into(),
    });
    let mut store = empty_store();

    let result = send(&mut store, &gateway, &credentials(), "5551234567", "hi").await;

    assert!(matches!(result, Err(SendError::Network(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn composer_clears_text_only_after_success() {
    let failing = MockGateway::start(StatusCode::BAD_GATEWAY).await;
    let mut store = empty_store();
    let mut composer = Composer {
        phone_number: "5551234567".into(),
        message_text: "hello".into(),
    };

    let result = composer
        .send(&mut store, &gateway_for(&failing), &credentials())
        .await;
    assert!(result.is_err());
    assert_eq!(composer.message_text, "hello");

    let working = MockGateway::start(StatusCode::OK).await;
    composer
        .send(&mut store, &gateway_for(&working), &credentials())
        .await
        .unwrap();
    assert_eq!(composer.message_text, "");
    assert_eq!(composer.phone_number, "5551234567");
    assert_eq!(store.get_thread("+15551234567").len(), 1);
}
