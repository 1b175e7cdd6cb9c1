// src/infra/daemon/mod.rs

use std::future::Future;
use std::time::Duration;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::core::reminder::ReminderScheduler;
use crate::infra::config::Config;
use crate::integrations::types::IncomingMessage;

pub mod handler;

pub use handler::{handle_message, respond, BotContext};

/// Run the bot until Ctrl+C or SIGTERM.
pub async fn run_daemon(ctx: BotContext, config: &Config) -> anyhow::Result<()> {
    let shutdown = shutdown_signal()?;
    println!("Bot running. Press Ctrl+C to stop.");
    run_daemon_until(ctx, config, shutdown).await
}

/// Future that resolves on Ctrl+C, or on SIGTERM under Unix.
///
/// The SIGTERM handler is installed before this returns, so a signal sent
/// right after the call is not lost. Must be called inside a tokio runtime.
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received Ctrl+C"),
                Err(e) => {
                    tracing::error!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate.recv() => tracing::info!("Received SIGTERM"),
        };

        #[cfg(not(unix))]
        ctrl_c.await;
    })
}

/// Poll for messages and answer them one at a time until `shutdown`
/// resolves, then stop reminders.
pub async fn run_daemon_until<F>(
    ctx: BotContext,
    config: &Config,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tracing::info!("workbot starting...");

    let mut reminders =
        ReminderScheduler::new(Duration::from_secs(config.reminder.interval_secs));
    if config.reminder.enabled {
        reminders.start(ctx.reminder_context());
    } else {
        tracing::info!("Reminders disabled");
    }

    let retry_delay = Duration::from_secs(config.telegram.retry_delay_secs);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            messages = poll_once(&ctx, retry_delay) => {
                for msg in &messages {
                    handler::handle_message(&ctx, msg).await;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    reminders.stop().await;
    tracing::info!("workbot stopped.");
    Ok(())
}

/// One receive call. Transport errors are logged and followed by a pause.
async fn poll_once(ctx: &BotContext, retry_delay: Duration) -> Vec<IncomingMessage> {
    match ctx.messenger.receive().await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::warn!("Polling for messages failed: {}", e);
            tokio::time::sleep(retry_delay).await;
            Vec::new()
        }
    }
}
