use crate::config::Settings;
use crate::theme::{ThemeFamily, ThemeMode};
use dioxus::prelude::*;

const TUNNEL_URL: &str = "https://www.cloudflare.com/products/tunnel/";

#[component]
pub fn ConfigView(settings: Signal<Settings>, on_saved: EventHandler<()>) -> Element {
    let mut settings = settings;
    let initial = settings.peek().clone();
    let mut api_key = use_signal(|| initial.api_key.clone());
    let mut sim_card_id = use_signal(|| initial.sim_card_id.clone());
    let mut webhook_url = use_signal(|| initial.webhook_url.clone());

    let theme = settings.read().theme;
    let is_light = theme.mode() == ThemeMode::Light;

    rsx! {
        div { class: "config-container",
            h2 { "Configuration" }
            form {
                class: "config-form",
                onsubmit: move |ev: FormEvent| {
                    ev.prevent_default();
                    settings.with_mut(|s| {
                        s.api_key = api_key().trim().to_string();
                        s.sim_card_id = sim_card_id().trim().to_string();
                        s.webhook_url = webhook_url().trim().to_string();
                    });
                    tracing::info!("configuration saved");
                    on_saved.call(());
                },
                input {
                    r#type: "text", placeholder: "API Key", required: true,
                    value: "{api_key}",
                    oninput: move |ev| api_key.set(ev.value()),
                }
                input {
                    r#type: "text", placeholder: "SIM Card ID", required: true,
                    value: "{sim_card_id}",
                    oninput: move |ev| sim_card_id.set(ev.value()),
                }
                input {
                    r#type: "text", placeholder: "Webhook URL (e.g., http://your-ip:port)", required: true,
                    value: "{webhook_url}",
                    oninput: move |ev| webhook_url.set(ev.value()),
                }
                button { class: "btn", r#type: "submit", "Save Configuration" }
            }
            div { class: "theme-selector",
                select {
                    class: "theme-select",
                    onchange: move |ev| {
                        if let Some(family) = ThemeFamily::parse(&ev.value()) {
                            settings.with_mut(|s| s.theme = s.theme.with_family(family));
                        }
                    },
                    for family in ThemeFamily::ALL {
                        option {
                            value: family.as_str(),
                            selected: theme.family() == Some(family),
                            {family.label()}
                        }
                    }
                }
                div { class: "mode-selector",
                    label {
                        input {
                            r#type: "radio", name: "mode", value: "light",
                            checked: is_light,
                            onchange: move |_| settings.with_mut(|s| s.theme = s.theme.with_mode(ThemeMode::Light)),
                        }
                        "Light"
                    }
                    label {
                        input {
                            r#type: "radio", name: "mode", value: "dark",
                            checked: !is_light,
                            onchange: move |_| settings.with_mut(|s| s.theme = s.theme.with_mode(ThemeMode::Dark)),
                        }
                        "Dark"
                    }
                }
            }
            p { class: "text-muted",
                "For webhook URLs behind a firewall or in a container, consider using a service like "
                a { href: TUNNEL_URL, target: "_blank", "Cloudflare Tunnel" }
                ". It can receive messages through a firewall directly to the tunnel endpoint."
            }
        }
    }
}
