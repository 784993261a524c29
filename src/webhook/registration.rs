use super::WEBHOOK_EVENT_TYPE;
use serde_json::json;

pub const REGISTRATION_MESSAGE: &str = "Webhook listener started";

/// Tell the webhook endpoint a listener is up. Best effort: failures are
/// logged and never retried. Returns whether the endpoint answered 200.
pub async fn register_listener(client: &reqwest::Client, webhook_url: &str) -> bool {
    let base = webhook_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return false;
    }

    let result = client
        .post(format!("{base}/webhook"))
        .json(&json!({
            "type": WEBHOOK_EVENT_TYPE,
            "payload": { "message": REGISTRATION_MESSAGE },
        }))
        .send()
        .await;

    match result {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            tracing::info!("{}", REGISTRATION_MESSAGE);
            true
        }
        Ok(response) => {
            tracing::error!(
                "error starting webhook listener: endpoint answered {}",
                response.status()
            );
            false
        }
        Err(err) => {
            tracing::error!("error starting webhook listener: {}", err);
            false
        }
    }
}
