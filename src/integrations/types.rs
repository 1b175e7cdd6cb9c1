// src/integrations/types.rs — Messaging adapter trait

use async_trait::async_trait;

/// An incoming chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    /// Transport-specific message id, used in logs.
    pub id: String,
    /// Where replies go.
    pub chat_id: String,
    /// Numeric id of the author; `None` for channel posts.
    pub sender_id: Option<i64>,
    /// Display name of the author, used in logs.
    pub sender: String,
    pub content: String,
}

/// Adapter for a chat transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingAdapter: Send + Sync {
    /// Send `content` to `target` (a chat id), returning the message id.
    async fn send(&self, target: &str, content: &str) -> anyhow::Result<String>;

    /// Wait for the next batch of messages. May return an empty batch.
    async fn receive(&self) -> anyhow::Result<Vec<IncomingMessage>>;
}
