//! Telegram bot client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::types::{ApiResponse, Update};
use super::TELEGRAM_API_BASE;
use crate::error::{RadarError, RadarResult};
use crate::notify::Notifier;
use crate::targets::TargetSource;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TELEGRAM_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Bot bound to one chat
pub struct TelegramBot {
    client: Client,
    config: ClientConfig,
    bot_token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> RadarResult<Self> {
        Self::with_config(bot_token, chat_id, ClientConfig::default())
    }

    pub fn with_config(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        config: ClientConfig,
    ) -> RadarResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.base_url, self.bot_token, method)
    }

    /// Call a Bot API method with GET query parameters
    async fn call<T>(&self, method: &str, params: &[(&str, &str)]) -> RadarResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(self.method_url(method))
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RadarError::from_response(response).await);
        }

        let status = response.status().as_u16();
        let body: ApiResponse<T> = response.json().await?;
        match body.result {
            Some(result) if body.ok => Ok(result),
            _ => Err(RadarError::Api {
                status: body
                    .error_code
                    .and_then(|code| u16::try_from(code).ok())
                    .unwrap_or(status),
                body: body
                    .description
                    .unwrap_or_else(|| format!("{} returned no result", method)),
            }),
        }
    }

    /// Send a plain-text message to the configured chat
    pub async fn send_message(&self, text: &str) -> RadarResult<()> {
        let _: serde_json::Value = self
            .call("sendMessage", &[("chat_id", self.chat_id.as_str()), ("text", text)])
            .await?;
        debug!("Telegram message sent: {}", text);
        Ok(())
    }

    /// Most recent update received by the bot (`offset=-1`)
    pub async fn latest_update(&self) -> RadarResult<Option<Update>> {
        let updates: Vec<Update> = self.call("getUpdates", &[("offset", "-1")]).await?;
        Ok(updates.into_iter().next())
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, text: &str) -> bool {
        match self.send_message(text).await {
            Ok(()) => true,
            Err(e) => {
                error!("Telegram message error: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl TargetSource for TelegramBot {
    async fn latest_message_text(&self) -> RadarResult<String> {
        let update = self.latest_update().await?.ok_or(RadarError::NoUpdates)?;
        debug!("Latest update: id={}", update.update_id);
        update
            .message
            .and_then(|m| m.text)
            .ok_or(RadarError::NoMessageText)
    }
}
