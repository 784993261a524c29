#[cfg(not(feature = "ui"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    // A missing .env is normal; settings then come from storage and the real environment.
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {}", err);
    }
}

// dioxus::launch installs its own tracing subscriber.
#[cfg(feature = "ui")]
fn main() {
    load_dotenv();
    dioxus::launch(sms_messenger::ui::App);
}

#[cfg(not(feature = "ui"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    load_dotenv();
    headless::run().await
}

/// Inbox-only mode: serve the webhook listener and record inbound messages.
#[cfg(not(feature = "ui"))]
mod headless {
    use sms_messenger::config::{ListenerConfig, Settings};
    use sms_messenger::storage::default_storage;
    use sms_messenger::store::ConversationStore;
    use sms_messenger::webhook::{WebhookInbox, receive, register_listener, server};

    pub async fn run() -> anyhow::Result<()> {
        let storage = default_storage();
        let settings = Settings::load_with_env(storage.as_ref());
        let mut store = ConversationStore::load(storage);
        tracing::info!("{} conversations on record", store.len());

        let listener = ListenerConfig::from_env();
        let inbox = WebhookInbox::new(listener.app_origin.clone());
        let sender = inbox.sender();
        let server = tokio::spawn(async move {
            if let Err(err) = server::serve(&listener, sender).await {
                tracing::error!("webhook listener stopped: {}", err);
            }
        });

        let webhook_url = settings.webhook_url.clone();
        tokio::spawn(async move {
            register_listener(&reqwest::Client::new(), &webhook_url).await;
        });

        loop {
            tokio::select! {
                payload = inbox.next_payload() => {
                    let Some(payload) = payload else { break };
                    let key = receive(&mut store, &payload);
                    tracing::info!("{} now has {} messages", key, store.get_thread(&key).len());
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!("shutting down");
                    break;
                }
            }
        }

        server.abort();
        Ok(())
    }
}
