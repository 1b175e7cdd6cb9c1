// src/core/reminder.rs — Periodic progress reminders
//
// A background task ticks on a fixed interval, asks the engine for progress
// on every live session and pushes one message per user. A failed delivery
// is logged and skipped so the other users still get theirs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::clock::Clock;
use crate::core::presenter::Presenter;
use crate::core::{lock_engine, SharedEngine};
use crate::integrations::types::MessagingAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Everything one sweep needs.
#[derive(Clone)]
pub struct ReminderContext {
    pub engine: SharedEngine,
    pub clock: Arc<dyn Clock>,
    pub messenger: Arc<dyn MessagingAdapter>,
    pub presenter: Presenter,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Send a progress message for every live session.
pub async fn sweep(ctx: &ReminderContext) -> SweepReport {
    let now = ctx.clock.now();
    // Lock only long enough to snapshot; sending happens unlocked.
    let notes = lock_engine(&ctx.engine).tick(now);

    let mut report = SweepReport::default();
    for note in &notes {
        let text = ctx.presenter.notification(note);
        match ctx.messenger.send(&note.user_id.to_string(), &text).await {
            Ok(_) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!("Reminder for user {} failed: {}", note.user_id, e);
            }
        }
    }

    if !notes.is_empty() {
        tracing::debug!(
            "Reminder sweep: {} delivered, {} failed",
            report.delivered,
            report.failed
        );
    }
    report
}

pub struct ReminderScheduler {
    period: Duration,
    shutdown_tx: Option<broadcast::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            shutdown_tx: None,
            handle: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.handle.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Begin sweeping every `period`. Returns `false` if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, ctx: ReminderContext) -> bool {
        if self.state() == SchedulerState::Running {
            return false;
        }

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let period = self.period;

        let handle = tokio::spawn(async move {
            tracing::info!("Reminders started ({}s interval)", period.as_secs());
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweep(&ctx).await;
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Reminders stopping");
                        break;
                    }
                }
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        true
    }

    /// Stop the background task and wait for it to exit.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Reminder task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
