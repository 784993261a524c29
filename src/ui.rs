use crate::config::{ListenerConfig, Settings};
use crate::storage::{SharedStorage, default_storage};
use crate::store::ConversationStore;
use crate::theme::theme_definition;
use crate::views::{ConfigView, MessengerView};
use crate::webhook::{WebhookInbox, receive};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Config,
    Messenger,
}

#[component]
pub fn App() -> Element {
    let storage: SharedStorage = use_hook(default_storage);
    let settings = use_signal({
        let storage = storage.clone();
        move || Settings::load_with_env(storage.as_ref())
    });
    let store = use_signal({
        let storage = storage.clone();
        move || ConversationStore::load(storage)
    });
    let screen = use_signal(|| {
        if settings.peek().is_complete() {
            AppScreen::Messenger
        } else {
            AppScreen::Config
        }
    });
    let inbox = use_hook(|| WebhookInbox::new(ListenerConfig::from_env().app_origin));

    use_settings_persistence(settings, storage);
    use_inbox(inbox.clone(), store);
    #[cfg(not(target_arch = "wasm32"))]
    use_webhook_listener(inbox);

    rsx! {
        ThemeStyles { settings }
        div { class: "app",
            AppHeader { screen }
            {match screen() {
                AppScreen::Config => rsx! {
                    ConfigView {
                        settings,
                        on_saved: move |_| {
                            let mut screen = screen;
                            screen.set(AppScreen::Messenger);
                        },
                    }
                },
                AppScreen::Messenger => rsx! {
                    MessengerView { settings, store }
                },
            }}
        }
    }
}

/// Write every setting back to storage whenever one changes.
fn use_settings_persistence(settings: Signal<Settings>, storage: SharedStorage) {
    use_effect(move || {
        if let Err(err) = settings.read().save(storage.as_ref()) {
            tracing::error!("failed to persist settings: {}", err);
        }
    });
}

/// Drain accepted webhook payloads into the store.
fn use_inbox(inbox: WebhookInbox, store: Signal<ConversationStore>) {
    use_future(move || {
        let inbox = inbox.clone();
        async move {
            let mut store = store;
            while let Some(payload) = inbox.next_payload().await {
                store.with_mut(|store| {
                    receive(store, &payload);
                });
            }
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn use_webhook_listener(inbox: WebhookInbox) {
    use_hook(move || {
        let sender = inbox.sender();
        spawn(async move {
            let config = ListenerConfig::from_env();
            if let Err(err) = crate::webhook::server::serve(&config, sender).await {
                tracing::error!("webhook listener stopped: {}", err);
            }
        });
    });
}

#[component]
fn ThemeStyles(settings: Signal<Settings>) -> Element {
    let definition = theme_definition(settings.read().theme);
    rsx! {
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(screen: Signal<AppScreen>) -> Element {
    rsx! {
        div { class: "header",
            div { class: "tabs",
                TabButton { screen, target: AppScreen::Messenger, label: "Messages" }
                TabButton { screen, target: AppScreen::Config, label: "Settings" }
            }
        }
    }
}

#[component]
fn TabButton(screen: Signal<AppScreen>, target: AppScreen, label: &'static str) -> Element {
    let mut screen = screen;
    let class = if screen() == target { "tab active" } else { "tab" };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| screen.set(target),
            "{label}"
        }
    }
}
