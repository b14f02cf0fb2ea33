//! Telegram Bot API notification provider.
//!
//! Posts to `sendPhoto` when the message carries an image, `sendMessage`
//! otherwise. Bot API reference: https://core.telegram.org/bots/api

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::TelegramConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::build_client;

#[derive(Debug, Serialize)]
struct SendPhoto<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Envelope of every Bot API answer
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramProvider {
    http: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramProvider {
    pub fn new(config: TelegramConfig) -> AppResult<Self> {
        Ok(Self {
            http: build_client("telegram", Duration::from_secs(config.timeout))?,
            config,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    /// POST a Bot API method. The token is part of the URL, so transport
    /// errors are stripped of it before they are reported.
    async fn call<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> NotificationResult {
        let start = Instant::now();
        let response = self.http.post(self.method_url(method)).json(body).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status = resp.status();
                let text = resp.text().await.ok();
                let reply = text
                    .as_deref()
                    .and_then(|t| serde_json::from_str::<ApiReply>(t).ok());

                let success = status.is_success() && reply.as_ref().is_some_and(|r| r.ok);
                if !success {
                    tracing::debug!(
                        method,
                        status = status.as_u16(),
                        description = ?reply.and_then(|r| r.description),
                        "Telegram rejected the message"
                    );
                }

                NotificationResult {
                    success,
                    status_code: Some(status.as_u16()),
                    response: text,
                    duration_ms,
                }
            }
            Err(e) => NotificationResult {
                success: false,
                status_code: None,
                response: Some(e.without_url().to_string()),
                duration_ms,
            },
        }
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let chat_id = self.config.chat_id.as_str();
        let parse_mode = self.config.parse_mode.as_str();

        let result = match message.image_url.as_deref() {
            Some(photo) => {
                let body = SendPhoto {
                    chat_id,
                    photo,
                    caption: &message.body,
                    parse_mode,
                };
                self.call("sendPhoto", &body).await
            }
            None => {
                let body = SendMessage {
                    chat_id,
                    text: &message.body,
                    parse_mode,
                };
                self.call("sendMessage", &body).await
            }
        };

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "telegram"
    }

    /// Checks that:
    /// - bot_token looks like `<bot id>:<secret>`
    /// - chat_id is not empty
    /// - api_base_url is a valid http(s) URL
    async fn validate_config(&self) -> AppResult<()> {
        let token = self.config.bot_token.trim();
        if token.is_empty() || !token.contains(':') {
            return Err(AppError::Validation {
                field: "telegram.bot_token".to_string(),
                reason: "Bot token must look like '<bot id>:<secret>'".to_string(),
            });
        }

        if self.config.chat_id.trim().is_empty() {
            return Err(AppError::Validation {
                field: "telegram.chat_id".to_string(),
                reason: "Chat id cannot be empty".to_string(),
            });
        }

        let url = Url::parse(&self.config.api_base_url).map_err(|_| AppError::Validation {
            field: "telegram.api_base_url".to_string(),
            reason: "Invalid URL format".to_string(),
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(AppError::Validation {
                field: "telegram.api_base_url".to_string(),
                reason: "URL must use http or https protocol".to_string(),
            });
        }

        Ok(())
    }
}
