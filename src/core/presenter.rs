// src/core/presenter.rs — Human-readable rendering of engine results

use chrono::Local;

use crate::core::billing::BillingStrategy;
use crate::core::engine::{EndReport, ProgressNotification, Reply, StatusSnapshot};
use crate::core::session::SessionSummary;
use crate::infra::errors::EngineError;

pub const DEFAULT_CURRENCY: &str = "MDL";

#[derive(Debug, Clone)]
pub struct Presenter {
    currency: String,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl Presenter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Format an amount with two decimals and the currency label.
    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.currency)
    }

    pub fn reply(&self, reply: &Reply) -> String {
        match reply {
            Reply::Help => help_text(),
            Reply::Started(summary) => self.started(summary),
            Reply::Paused { name } => {
                format!("⏸️ Session '{name}' paused. Send /workresume to continue.")
            }
            Reply::Resumed { name, paused_for } => {
                format!("▶️ Session '{name}' resumed after a {paused_for} break.")
            }
            Reply::Status(snapshot) => self.status(snapshot),
            Reply::Ended(report) => self.ended(report),
        }
    }

    pub fn error(&self, err: &EngineError) -> String {
        match err {
            EngineError::InvalidArgument(detail) => format!(
                "⚠️ {detail}.\nUsage: /work <session name> <hourly rate> \
                 or /project <session name> <price>\nExample: /work \"Project A\" 200"
            ),
            EngineError::AlreadyActive { name } => format!(
                "🛑 Session '{name}' is still open. \
                 Use /workend to finish it or /workpause to take a break."
            ),
            EngineError::NoActiveSession => {
                "⚠️ No work session is running. Start one with /work.".to_string()
            }
            EngineError::AlreadyPaused => {
                "⏸️ Already paused. Send /workresume to continue.".to_string()
            }
            EngineError::NotPaused => {
                "⚠️ The session isn't paused. Use /workpause to take a break.".to_string()
            }
            EngineError::UnknownCommand(name) => {
                format!("🤔 Unknown command /{name}.\n\n{}", help_text())
            }
        }
    }

    pub fn notification(&self, note: &ProgressNotification) -> String {
        let state = if note.paused { " (paused)" } else { "" };
        format!(
            "⏰ '{}'{}: {}h {}m worked so far.\n💸 Estimated earnings: {}",
            note.session_name,
            state,
            note.hours,
            note.minutes,
            self.money(note.earnings)
        )
    }

    fn started(&self, summary: &SessionSummary) -> String {
        let local = summary.started_at.with_timezone(&Local);
        let billing = match summary.billing {
            BillingStrategy::HourlyRate { rate } => {
                format!("💸 Hourly rate: {}", self.money(rate))
            }
            BillingStrategy::FixedProjectPrice {
                price,
                project_hours,
            } => format!(
                "💼 Project price: {} for {} hours",
                self.money(price),
                project_hours
            ),
        };
        format!(
            "✅ Session '{}' started on {}.\n{}\n⏰ Progress reminders will follow.\n\
             Use /workpause to take a break or /workend to finish.",
            summary.name,
            local.format("%A, %d %b %Y at %H:%M"),
            billing
        )
    }

    fn status(&self, s: &StatusSnapshot) -> String {
        let state = if s.paused { "⏸️ paused" } else { "▶️ running" };
        format!(
            "🔄 Session '{}' ({})\n⏱️ Worked: {}\n💸 Estimated earnings: {}",
            s.summary.name,
            state,
            s.elapsed,
            self.money(s.earnings)
        )
    }

    fn ended(&self, r: &EndReport) -> String {
        format!(
            "🛑 Session '{}' ended.\n⏱️ Duration: {}\n💰 Earned: {}\n🏆 Total earnings: {}",
            r.summary.name,
            r.elapsed,
            self.money(r.earnings),
            self.money(r.total_earnings)
        )
    }
}

fn help_text() -> String {
    [
        "👋 Work tracker commands:",
        "/work <name> <rate> — start an hourly session",
        "/project <name> <price> — start a fixed-price session",
        "/workpause, /workresume — take and end a break",
        "/status — time and earnings so far",
        "/workend — finish and get paid",
    ]
    .join("\n")
}
