use crate::config::{GatewayConfig, GatewayCredentials};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("No API key configured")]
    MissingCredentials,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gateway rejected credentials ({status})")]
    Unauthorized { status: StatusCode },

    #[error("Gateway error {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// One outbound SMS, already normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundSms {
    pub to: String,
    pub message: String,
}

/// Something that can hand an SMS to the carrier.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(
        &self,
        credentials: &GatewayCredentials,
        sms: &OutboundSms,
    ) -> Result<(), SendError>;
}

#[derive(Serialize)]
struct SendSmsRequest<'a> {
    to: &'a str,
    message: &'a str,
    sim_card_id: &'a str,
}

/// TextLink HTTP API client.
#[derive(Clone)]
pub struct TextLinkGateway {
    client: reqwest::Client,
    base_url: String,
}

impl TextLinkGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/sms", self.base_url)
    }
}

#[async_trait]
impl SmsGateway for TextLinkGateway {
    async fn send_sms(
        &self,
        credentials: &GatewayCredentials,
        sms: &OutboundSms,
    ) -> Result<(), SendError> {
        if credentials.api_key.trim().is_empty() {
            return Err(SendError::MissingCredentials);
        }

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&credentials.api_key)
            .json(&SendSmsRequest {
                to: &sms.to,
                message: &sms.message,
                sim_card_id: &credentials.sim_card_id,
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SendError::Unauthorized { status })
            }
            _ => Err(SendError::Rejected { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let gateway = TextLinkGateway::new(GatewayConfig {
            base_url: "https://gateway.example/".into(),
        });
        assert_eq!(gateway.endpoint(), "https://gateway.example/v1/sms");
    }

    #[tokio::test]
    async fn empty_api_key_fails_before_any_request() {
        // Unroutable base URL: a request attempt would surface as a network error instead.
        let gateway = TextLinkGateway::new(GatewayConfig {
            base_url: "http://127.0.0.1:1".into(),
        });
        let sms = OutboundSms {
            to: "+15551234567".into(),
            message: "hi".into(),
        };
        let result = gateway.send_sms(&GatewayCredentials::default(), &sms).await;
        assert!(matches!(result, Err(SendError::MissingCredentials)));
    }
}
