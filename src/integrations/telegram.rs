// src/integrations/telegram.rs — Telegram adapter (Bot API)
//
// Uses the Telegram Bot API (https://core.telegram.org/bots/api) with
// long-polling getUpdates.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::integrations::types::{IncomingMessage, MessagingAdapter};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram integration adapter.
pub struct TelegramAdapter {
    client: Client,
    bot_token: String,
    api_base: String,
    poll_timeout_secs: u64,
    /// Next update id to ask for; everything below has been handled.
    offset: AtomicI64,
}

impl TelegramAdapter {
    pub fn new(bot_token: String, poll_timeout_secs: u64) -> Self {
        Self::with_api_base(bot_token, poll_timeout_secs, TELEGRAM_API_BASE)
    }

    pub fn with_api_base(bot_token: String, poll_timeout_secs: u64, api_base: &str) -> Self {
        let client = Client::builder()
            // Leave room above the long-poll timeout.
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to build HTTP client ({}), falling back to defaults without a timeout",
                    e
                );
                Client::new()
            });
        Self {
            client,
            bot_token,
            api_base: api_base.trim_end_matches('/').to_string(),
            poll_timeout_secs,
            offset: AtomicI64::new(0),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }

    /// Validate the bot token by calling getMe.
    pub async fn validate(&self) -> anyhow::Result<String> {
        #[derive(Deserialize)]
        struct BotUser {
            username: Option<String>,
            first_name: Option<String>,
        }

        let resp: TelegramResponse<BotUser> = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            anyhow::bail!(
                "Telegram auth failed: {}",
                resp.description.unwrap_or_else(|| "unknown".into())
            );
        }

        let bot = resp.result.unwrap_or(BotUser {
            username: None,
            first_name: None,
        });
        Ok(format!(
            "Authenticated as @{}",
            bot.username
                .unwrap_or_else(|| bot.first_name.unwrap_or_default())
        ))
    }
}

// -- Telegram API response types --

#[derive(Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TgMessage {
    message_id: i64,
    chat: TgChat,
    from: Option<TgUser>,
    text: Option<String>,
}

#[derive(Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Deserialize)]
struct TgUser {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
}

#[derive(Deserialize)]
struct TgUpdate {
    update_id: i64,
    message: Option<TgMessage>,
}

#[derive(Deserialize)]
struct SendMessageResp {
    message_id: i64,
}

/// Convert a batch of updates into messages, returning the next offset.
fn collect_updates(updates: Vec<TgUpdate>, offset: i64) -> (Vec<IncomingMessage>, i64) {
    let next_offset = updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .unwrap_or(offset)
        .max(offset);

    let messages = updates
        .into_iter()
        .filter_map(|u| u.message.map(|m| (u.update_id, m)))
        .filter_map(|(update_id, m)| {
            let text = m.text?;
            let sender = m
                .from
                .as_ref()
                .and_then(|u| u.username.clone().or(u.first_name.clone()))
                .unwrap_or_else(|| "unknown".into());
            Some(IncomingMessage {
                id: format!("{update_id}:{}", m.message_id),
                chat_id: m.chat.id.to_string(),
                sender_id: m.from.as_ref().map(|u| u.id),
                sender,
                content: text,
            })
        })
        .collect();

    (messages, next_offset)
}

// -- MessagingAdapter implementation --

#[async_trait]
impl MessagingAdapter for TelegramAdapter {
    async fn send(&self, target: &str, content: &str) -> anyhow::Result<String> {
        let body = serde_json::json!({
            "chat_id": target,
            "text": content,
        });

        let resp: TelegramResponse<SendMessageResp> = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            anyhow::bail!(
                "Telegram send failed: {}",
                resp.description.unwrap_or_else(|| "unknown".into())
            );
        }

        Ok(resp
            .result
            .map(|r| r.message_id.to_string())
            .unwrap_or_default())
    }

    async fn receive(&self) -> anyhow::Result<Vec<IncomingMessage>> {
        let offset = self.offset.load(Ordering::SeqCst);
        let body = serde_json::json!({
            "offset": offset,
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message"],
        });

        let resp: TelegramResponse<Vec<TgUpdate>> = self
            .client
            .post(self.api_url("getUpdates"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            anyhow::bail!(
                "Telegram getUpdates failed: {}",
                resp.description.unwrap_or_else(|| "unknown".into())
            );
        }

        let (messages, next_offset) = collect_updates(resp.result.unwrap_or_default(), offset);
        self.offset.store(next_offset, Ordering::SeqCst);
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(json: &str) -> Vec<TgUpdate> {
        let resp: TelegramResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        resp.result.unwrap_or_default()
    }

    #[test]
    fn test_api_url() {
        let a = TelegramAdapter::with_api_base("123:abc".into(), 30, "http://localhost:8081/");
        assert_eq!(a.api_url("getMe"), "http://localhost:8081/bot123:abc/getMe");
    }

    #[test]
    fn test_collect_updates_advances_offset() {
        let batch = updates(
            r#"{"ok":true,"result":[
                {"update_id":10,"message":{"message_id":1,"chat":{"id":555},
                    "from":{"id":42,"username":"ana"},"text":"/work Site 100","date":1700000000}},
                {"update_id":11,"message":{"message_id":2,"chat":{"id":555},
                    "from":{"id":42,"first_name":"Ana"},"date":1700000001}},
                {"update_id":12}
            ]}"#,
        );
        let (messages, next) = collect_updates(batch, 0);
        assert_eq!(next, 13);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "10:1");
        assert_eq!(messages[0].chat_id, "555");
        assert_eq!(messages[0].sender_id, Some(42));
        assert_eq!(messages[0].sender, "ana");
        assert_eq!(messages[0].content, "/work Site 100");
    }

    #[test]
    fn test_collect_updates_empty_keeps_offset() {
        let (messages, next) = collect_updates(Vec::new(), 77);
        assert!(messages.is_empty());
        assert_eq!(next, 77);
    }

    #[test]
    fn test_error_response_parses() {
        let resp: TelegramResponse<Vec<TgUpdate>> =
            serde_json::from_str(r#"{"ok":false,"description":"Unauthorized"}"#).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
    }
}
