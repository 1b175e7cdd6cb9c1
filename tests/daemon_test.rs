// tests/daemon_test.rs — Command loop against a scripted messaging adapter

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use workbot::core::{
    lock_engine, shared_engine, BillingKind, ManualClock, Presenter, SessionEngine, UserId,
};
use workbot::infra::config::Config;
use workbot::infra::daemon::{run_daemon_until, shutdown_signal, BotContext};
use workbot::integrations::types::{IncomingMessage, MessagingAdapter};

// ---------- Scripted adapter ----------

#[derive(Default)]
struct ScriptedAdapter {
    batches: Mutex<VecDeque<anyhow::Result<Vec<IncomingMessage>>>>,
    sent: Mutex<Vec<(String, String)>>,
}

impl ScriptedAdapter {
    fn with_batches(batches: Vec<anyhow::Result<Vec<IncomingMessage>>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingAdapter for ScriptedAdapter {
    async fn send(&self, target: &str, content: &str) -> anyhow::Result<String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((target.to_string(), content.to_string()));
        Ok(sent.len().to_string())
    }

    async fn receive(&self) -> anyhow::Result<Vec<IncomingMessage>> {
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => std::future::pending().await,
        }
    }
}

fn msg(user: i64, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: format!("{user}-{text}"),
        chat_id: user.to_string(),
        sender_id: Some(user),
        sender: format!("user{user}"),
        content: text.to_string(),
    }
}

fn context(adapter: Arc<ScriptedAdapter>) -> BotContext {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).unwrap());
    BotContext {
        engine: shared_engine(SessionEngine::default()),
        clock: Arc::new(clock),
        messenger: adapter,
        presenter: Presenter::default(),
        default_kind: BillingKind::Hourly,
    }
}

#[tokio::test(start_paused = true)]
async fn daemon_answers_commands_in_order() {
    let adapter = Arc::new(ScriptedAdapter::with_batches(vec![
        Ok(vec![msg(1, "/work Report 40"), msg(2, "hello")]),
        Ok(vec![msg(1, "/workpause"), msg(1, "/workpause")]),
        Ok(vec![msg(2, "/status")]),
    ]));
    let ctx = context(adapter.clone());
    let engine = ctx.engine.clone();

    let mut config = Config::default();
    config.reminder.enabled = false;

    run_daemon_until(ctx, &config, tokio::time::sleep(Duration::from_secs(1)))
        .await
        .unwrap();

    let sent = adapter.sent();
    assert_eq!(sent.len(), 4, "plain text gets no reply: {sent:?}");
    assert_eq!(sent[0].0, "1");
    assert!(sent[0].1.contains("'Report'"));
    assert!(sent[1].1.contains("paused"));
    assert!(sent[2].1.contains("Already paused"));
    assert_eq!(sent[3].0, "2");
    assert!(sent[3].1.contains("No work session"));

    assert!(lock_engine(&engine).store().get(UserId(1)).unwrap().is_paused());
}

#[tokio::test(start_paused = true)]
async fn daemon_keeps_polling_after_transport_error() {
    let adapter = Arc::new(ScriptedAdapter::with_batches(vec![
        Err(anyhow::anyhow!("502 Bad Gateway")),
        Ok(vec![msg(3, "/help")]),
    ]));
    let ctx = context(adapter.clone());

    let mut config = Config::default();
    config.reminder.enabled = false;
    config.telegram.retry_delay_secs = 5;

    run_daemon_until(ctx, &config, tokio::time::sleep(Duration::from_secs(60)))
        .await
        .unwrap();

    let sent = adapter.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("/workend"));
}

#[tokio::test(start_paused = true)]
async fn daemon_sends_reminders_while_running() {
    let adapter = Arc::new(ScriptedAdapter::with_batches(vec![Ok(vec![msg(
        4,
        "/project Logo 800",
    )])]));
    let ctx = context(adapter.clone());

    let mut config = Config::default();
    config.reminder.interval_secs = 600;

    run_daemon_until(ctx, &config, tokio::time::sleep(Duration::from_secs(1801)))
        .await
        .unwrap();

    let sent = adapter.sent();
    // One start reply plus three reminders.
    assert_eq!(sent.len(), 4, "{sent:?}");
    assert!(sent[0].1.contains("Project price: 800.00 MDL"));
    assert!(sent[1..].iter().all(|(to, text)| to == "4" && text.contains("'Logo'")));
}

#[cfg(unix)]
#[tokio::test]
async fn daemon_stops_on_sigterm() {
    let adapter = Arc::new(ScriptedAdapter::with_batches(vec![Ok(vec![msg(
        5,
        "/work Report 40",
    )])]));
    let ctx = context(adapter.clone());
    let config = Config::default();

    let shutdown = shutdown_signal().unwrap();
    let daemon = tokio::spawn(async move { run_daemon_until(ctx, &config, shutdown).await });

    // Wait until the first batch has been answered so the loop is running.
    while adapter.sent().is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let status = tokio::process::Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .await
        .unwrap();
    assert!(status.success());

    let result = tokio::time::timeout(Duration::from_secs(5), daemon)
        .await
        .expect("daemon did not stop after SIGTERM")
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(adapter.sent().len(), 1);
}
