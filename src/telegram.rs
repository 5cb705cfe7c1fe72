use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::watcher::Channel;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Transport failures stay inside this module; the watcher only ever sees
/// the delivered/not-delivered outcome of `notify`.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("request to the Telegram API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram rejected the message: {description}")]
    Api { description: String },

    #[error("unexpected reply from the Telegram API: {0}")]
    Reply(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendMessageReply {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            chat_id,
        }
    }

    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API, self.token);
        let response = self
            .http
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TelegramError::Api {
                description: format!("{} - {}", status, body),
            });
        }

        let reply: SendMessageReply = serde_json::from_str(&body)?;
        if !reply.ok {
            return Err(TelegramError::Api {
                description: reply
                    .description
                    .unwrap_or_else(|| "no description given".to_string()),
            });
        }

        Ok(())
    }
}

impl Channel for TelegramClient {
    /// Attempts one delivery to the configured chat. Failures are logged and
    /// reported as `false`, never propagated.
    async fn notify(&self, text: &str) -> bool {
        match self.send_message(text).await {
            Ok(()) => {
                tracing::debug!(message = %text, "notification sent");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "notification delivery failed");
                false
            }
        }
    }
}
