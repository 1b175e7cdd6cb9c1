// src/infra/daemon/handler.rs

use std::sync::Arc;

use crate::core::billing::BillingKind;
use crate::core::clock::Clock;
use crate::core::command::Command;
use crate::core::presenter::Presenter;
use crate::core::reminder::ReminderContext;
use crate::core::session::UserId;
use crate::core::{lock_engine, SharedEngine};
use crate::integrations::types::{IncomingMessage, MessagingAdapter};

/// Everything the bot needs to answer messages.
#[derive(Clone)]
pub struct BotContext {
    pub engine: SharedEngine,
    pub clock: Arc<dyn Clock>,
    pub messenger: Arc<dyn MessagingAdapter>,
    pub presenter: Presenter,
    pub default_kind: BillingKind,
}

impl BotContext {
    pub fn reminder_context(&self) -> ReminderContext {
        ReminderContext {
            engine: self.engine.clone(),
            clock: self.clock.clone(),
            messenger: self.messenger.clone(),
            presenter: self.presenter.clone(),
        }
    }
}

/// Work out the reply text for a message, applying it to the engine.
///
/// Returns `None` for messages the bot does not answer: plain text and
/// messages without a known author.
pub fn respond(ctx: &BotContext, msg: &IncomingMessage) -> Option<String> {
    let parsed = Command::parse_message(&msg.content, ctx.default_kind)?;

    let Some(sender_id) = msg.sender_id else {
        tracing::debug!("Ignoring command without sender in chat {}", msg.chat_id);
        return None;
    };
    let user = UserId(sender_id);
    tracing::debug!(
        "Command from {} ({}) in chat {}, message {}",
        msg.sender,
        user,
        msg.chat_id,
        msg.id
    );

    let result = parsed.and_then(|command| {
        let now = ctx.clock.now();
        lock_engine(&ctx.engine).dispatch(command, user, now)
    });

    Some(match result {
        Ok(reply) => ctx.presenter.reply(&reply),
        Err(e) => {
            tracing::debug!("User {} command rejected: {}", user, e);
            ctx.presenter.error(&e)
        }
    })
}

/// Answer one incoming message. Delivery failures are logged.
pub async fn handle_message(ctx: &BotContext, msg: &IncomingMessage) {
    let Some(text) = respond(ctx, msg) else {
        return;
    };

    if let Err(e) = ctx.messenger.send(&msg.chat_id, &text).await {
        tracing::warn!("Failed to reply in chat {}: {}", msg.chat_id, e);
    }
}
