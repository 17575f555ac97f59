//! Telegram Bot API notification channel.
//!
//! Messages are delivered with a single `sendMessage` call to one chat.
//! Docs: <https://core.telegram.org/bots/api#sendmessage>

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::NotifyChannel;

/// Public Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram bot notification channel bound to a single chat.
pub struct TelegramChannel {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    /// Create a channel that posts to `chat_id` as the bot identified by `bot_token`.
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the channel at a different Bot API server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn enabled(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    async fn send(&self, text: &str) -> Result<(), ChannelError> {
        if self.bot_token.is_empty() {
            return Err(ChannelError::NotConfigured("TELEGRAM_TOKEN".to_string()));
        }
        if self.chat_id.is_empty() {
            return Err(ChannelError::NotConfigured("TELEGRAM_CHAT_ID".to_string()));
        }

        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        debug!(channel = "telegram", chat_id = %self.chat_id, "Sending message");

        // The request URL embeds the bot token, keep it out of error messages.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChannelError::Http(e.without_url()))?;

        let Ok(reply) = serde_json::from_str::<TelegramResponse>(&body) else {
            warn!(
                channel = "telegram",
                status = %status,
                body = %body,
                "Unexpected Bot API response"
            );
            return Err(ChannelError::Other(format!(
                "Telegram returned {status}: {body}"
            )));
        };

        if reply.ok && status.is_success() {
            debug!(channel = "telegram", "Message sent successfully");
            return Ok(());
        }

        if let Some(retry_after_secs) = reply.parameters.and_then(|p| p.retry_after) {
            warn!(channel = "telegram", retry_after_secs, "Bot API rate limit hit");
            return Err(ChannelError::RateLimited { retry_after_secs });
        }

        let code = reply
            .error_code
            .unwrap_or_else(|| i64::from(status.as_u16()));
        let description = reply.description.unwrap_or_default();

        warn!(
            channel = "telegram",
            code,
            description = %description,
            "Bot API rejected the message"
        );

        Err(ChannelError::Api { code, description })
    }
}

// =============================================================================
// Bot API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}
