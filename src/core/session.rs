// src/core/session.rs — A single user's work session and its time accounting

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::billing::BillingStrategy;

/// Opaque user identifier supplied by the transport (Telegram user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub billing: BillingStrategy,
    /// Stays fixed for the whole session; pauses are tracked separately.
    pub started_at: DateTime<Utc>,
    pub paused_at: Option<DateTime<Utc>>,
    pub total_paused: Duration,
}

impl Session {
    pub fn new(
        user_id: UserId,
        name: String,
        billing: BillingStrategy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            name,
            billing,
            started_at: now,
            paused_at: None,
            total_paused: Duration::zero(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Time spent in the pause that is still open, if any.
    pub fn open_pause(&self, now: DateTime<Utc>) -> Duration {
        self.paused_at
            .map(|at| now.signed_duration_since(at).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }

    /// Wall time since start minus every pause, including an open one.
    /// Clock skew never produces a negative result.
    pub fn active_duration(&self, now: DateTime<Utc>) -> Duration {
        let total = now.signed_duration_since(self.started_at);
        (total - self.total_paused - self.open_pause(now)).max(Duration::zero())
    }

    pub fn active_seconds(&self, now: DateTime<Utc>) -> f64 {
        self.active_duration(now).num_milliseconds() as f64 / 1000.0
    }

    pub fn earnings(&self, now: DateTime<Utc>) -> f64 {
        self.billing.earnings(self.active_seconds(now))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.name.clone(),
            billing: self.billing,
            started_at: self.started_at,
        }
    }
}

/// What a user sees about a session once it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub name: String,
    pub billing: BillingStrategy,
    pub started_at: DateTime<Utc>,
}

/// Whole hours, minutes and seconds of an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_seconds(elapsed: f64) -> Self {
        let total = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed.floor() as u64
        } else {
            0
        };
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn from_duration(d: Duration) -> Self {
        Self::from_seconds(d.num_milliseconds() as f64 / 1000.0)
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}
