use crate::config::{GatewayConfig, Settings};
use crate::gateway::TextLinkGateway;
use crate::outbound::{Composer, deliver, record_sent};
use crate::store::ConversationStore;
use crate::types::Message;
use crate::views::shared::{bubble_class, format_message_time};
use crate::webhook::register_listener;
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn MessengerView(settings: Signal<Settings>, store: Signal<ConversationStore>) -> Element {
    let mut store = store;
    let mut composer = use_signal(Composer::default);
    let selected = use_signal(|| None::<String>);
    let mut sending = use_signal(|| false);
    let mut status = use_signal(|| None::<String>);
    let gateway = use_signal(|| TextLinkGateway::new(GatewayConfig::from_env()));
    let webhook_url = use_memo(move || settings.read().webhook_url.clone());

    use_effect(move || {
        let url = webhook_url();
        if url.is_empty() {
            return;
        }
        spawn(async move {
            register_listener(&reqwest::Client::new(), &url).await;
        });
    });

    // The gateway call runs without a store borrow; the store is only touched
    // once the gateway has accepted the message.
    let mut send_message = move || {
        if sending() {
            return;
        }
        let Some(sms) = composer.peek().outbound() else {
            return;
        };
        let credentials = settings.peek().credentials();
        let gateway = gateway.peek().clone();
        sending.set(true);
        spawn(async move {
            match deliver(&gateway, &credentials, &sms).await {
                Ok(()) => {
                    store.with_mut(|store| {
                        record_sent(store, sms);
                    });
                    composer.with_mut(Composer::message_sent);
                    status.set(None);
                }
                Err(err) => {
                    status.set(Some(format!("Failed to send message: {err}")));
                }
            }
            sending.set(false);
        });
    };

    let phone_number = composer.read().phone_number.clone();
    let message_text = composer.read().message_text.clone();
    let conversations = store.read().list_conversations();
    let thread: Vec<Message> = selected()
        .map(|key| store.read().get_thread(&key).to_vec())
        .unwrap_or_default();

    rsx! {
        div { class: "messenger",
            div { class: "main-content", style: "display: flex; flex: 1;",
                div { class: "conversation-list",
                    for number in conversations {
                        ConversationItem { key: "{number}", number: number.clone(), selected }
                    }
                }
                div { style: "display: flex; flex-direction: column; flex: 1;",
                    div { class: "messages",
                        for (index, msg) in thread.into_iter().enumerate() {
                            MessageBubble { key: "{index}", message: msg }
                        }
                    }
                    {status().map(|error| rsx! {
                        div { class: "status-error", "{error}" }
                    })}
                    div { class: "composer",
                        input {
                            r#type: "text",
                            placeholder: "Phone Number (e.g., +15551234567 or 5551234567)",
                            value: "{phone_number}",
                            oninput: move |ev| composer.write().phone_number = ev.value(),
                        }
                        input {
                            r#type: "text",
                            placeholder: "Message",
                            value: "{message_text}",
                            oninput: move |ev| composer.write().message_text = ev.value(),
                            onkeydown: move |ev: KeyboardEvent| {
                                if ev.key() == Key::Enter {
                                    ev.prevent_default();
                                    send_message();
                                }
                            },
                        }
                        button {
                            class: "btn", r#type: "button",
                            disabled: sending(),
                            onclick: move |_| send_message(),
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConversationItem(number: String, selected: Signal<Option<String>>) -> Element {
    let mut selected = selected;
    let is_active = selected().as_deref() == Some(number.as_str());
    let class = if is_active {
        "conversation-item active"
    } else {
        "conversation-item"
    };
    let value = number.clone();
    rsx! {
        div {
            class: class,
            onclick: move |_| selected.set(Some(value.clone())),
            "{number}"
        }
    }
}

#[component]
fn MessageBubble(message: Message) -> Element {
    let time = format_message_time(&message.timestamp).unwrap_or_default();
    let text = message.text.clone();
    rsx! {
        div { class: bubble_class(message.is_sent),
            "{text}"
            if !time.is_empty() {
                div { class: "message-time", "{time}" }
            }
        }
    }
}
