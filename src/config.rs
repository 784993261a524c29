use crate::storage::{KeyValueStore, StorageError};
use crate::theme::ThemeName;
use std::env;

pub const API_KEY_KEY: &str = "apiKey";
pub const SIM_CARD_ID_KEY: &str = "simCardId";
pub const WEBHOOK_URL_KEY: &str = "webhookUrl";
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_GATEWAY_URL: &str = "https://api.textlinksms.com";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

/// Session settings entered on the configuration screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub sim_card_id: String,
    pub webhook_url: String,
    pub theme: ThemeName,
}

impl Settings {
    /// Read each setting from its own key; missing or empty keys fall back to defaults.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        Self::load_with(storage, |_| None)
    }

    /// Like [`load`](Self::load), but keys with no stored value are filled from
    /// the environment. Stored values always win.
    pub fn load_with_env(storage: &dyn KeyValueStore) -> Self {
        Self::load_with(storage, |key| env::var(key).ok())
    }

    fn load_with(storage: &dyn KeyValueStore, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, env_key: &str| {
            storage
                .get(key)
                .filter(|stored| !stored.is_empty())
                .or_else(|| {
                    lookup(env_key)
                        .map(|value| value.trim().to_string())
                        .filter(|value| !value.is_empty())
                })
        };

        Self {
            api_key: value(API_KEY_KEY, "TEXTLINK_API_KEY").unwrap_or_default(),
            sim_card_id: value(SIM_CARD_ID_KEY, "TEXTLINK_SIM_CARD_ID").unwrap_or_default(),
            webhook_url: value(WEBHOOK_URL_KEY, "TEXTLINK_WEBHOOK_URL").unwrap_or_default(),
            theme: value(THEME_KEY, "SMS_THEME")
                .map(|name| ThemeName::parse(&name))
                .unwrap_or_default(),
        }
    }

    pub fn save(&self, storage: &dyn KeyValueStore) -> Result<(), StorageError> {
        storage.set(API_KEY_KEY, &self.api_key)?;
        storage.set(SIM_CARD_ID_KEY, &self.sim_card_id)?;
        storage.set(WEBHOOK_URL_KEY, &self.webhook_url)?;
        storage.set(THEME_KEY, self.theme.as_str())
    }

    pub fn credentials(&self) -> GatewayCredentials {
        GatewayCredentials {
            api_key: self.api_key.clone(),
            sim_card_id: self.sim_card_id.clone(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.sim_card_id.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub api_key: String,
    pub sim_card_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var("TEXTLINK_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        Self { base_url }
    }
}

/// Where the webhook listener binds and which origin inbound events are trusted from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenerConfig {
    pub listen_addr: String,
    pub app_origin: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
        }
    }
}

impl ListenerConfig {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("SMS_WEBHOOK_LISTEN")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            app_origin: env::var("SMS_APP_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_APP_ORIGIN.to_string()),
        }
    }
}
