// src/cli/run.rs — Subcommand implementations

use std::sync::Arc;

use crate::core::clock::SystemClock;
use crate::core::engine::SessionEngine;
use crate::core::presenter::Presenter;
use crate::core::shared_engine;
use crate::infra::config::Config;
use crate::infra::daemon::{self, BotContext};
use crate::integrations::telegram::TelegramAdapter;

/// Start the bot and block until shutdown.
pub async fn run_bot(config: &Config) -> anyhow::Result<()> {
    let token = config.bot_token()?;
    let messenger = TelegramAdapter::new(token, config.telegram.poll_timeout_secs);

    match messenger.validate().await {
        Ok(who) => tracing::info!("{}", who),
        Err(e) => tracing::warn!("Could not verify bot token: {}", e),
    }

    let ctx = BotContext {
        engine: shared_engine(SessionEngine::new(config.billing.project_hours)),
        clock: Arc::new(SystemClock),
        messenger: Arc::new(messenger),
        presenter: Presenter::new(config.billing.currency.clone()),
        default_kind: config.billing.default_kind,
    };

    daemon::run_daemon(ctx, config).await
}

/// Validate the bot token against the Bot API.
pub async fn check_token(config: &Config) -> anyhow::Result<()> {
    let token = config.bot_token()?;
    let adapter = TelegramAdapter::new(token, config.telegram.poll_timeout_secs);
    println!("{}", adapter.validate().await?);
    Ok(())
}

/// Print the effective configuration with the token masked.
pub fn show_config(config: &Config) -> anyhow::Result<()> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &Config) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if shown.telegram.bot_token.is_some() {
        shown.telegram.bot_token = Some("********".into());
    }
    Ok(toml::to_string_pretty(&shown)?)
}
