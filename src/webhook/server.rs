//! HTTP listener for gateway webhooks.
//!
//! Accepts the `{type, payload}` envelope or a bare `{from, message}` body on
//! `POST /webhook` and forwards it to the inbox tagged with the app origin.

use super::{WEBHOOK_EVENT_TYPE, WebhookEvent, WebhookSender};
use crate::config::ListenerConfig;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone)]
struct ListenerState {
    sender: WebhookSender,
    origin: String,
}

pub fn router(sender: WebhookSender, origin: impl Into<String>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_check))
        .with_state(ListenerState {
            sender,
            origin: origin.into(),
        })
}

async fn webhook_handler(
    State(state): State<ListenerState>,
    Json(body): Json<Value>,
) -> StatusCode {
    let data = if body.get("type").is_some() {
        body
    } else {
        json!({ "type": WEBHOOK_EVENT_TYPE, "payload": body })
    };

    if state
        .sender
        .deliver(WebhookEvent::new(Some(state.origin.clone()), data))
    {
        StatusCode::OK
    } else {
        tracing::warn!("webhook inbox closed; dropping event");
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn health_check() -> &'static str {
    "ok"
}

/// Serve on an already-bound listener until the task is dropped.
pub async fn serve_on(
    listener: TcpListener,
    sender: WebhookSender,
    origin: String,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("webhook listener on http://{}/webhook", addr);
    axum::serve(listener, router(sender, origin)).await?;
    Ok(())
}

pub async fn serve(config: &ListenerConfig, sender: WebhookSender) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.listen_addr).await.map_err(|e| {
        anyhow::anyhow!("failed to bind webhook listener to {}: {}", config.listen_addr, e)
    })?;
    serve_on(listener, sender, config.app_origin.clone()).await
}
