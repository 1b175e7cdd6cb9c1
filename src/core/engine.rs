// src/core/engine.rs — Work-session state machine
//
// Every operation takes `now` explicitly. The engine owns the store; callers
// share it behind a mutex so operations for one user never interleave.

use chrono::{DateTime, Utc};

use crate::core::billing::{BillingKind, BillingStrategy, DEFAULT_PROJECT_HOURS};
use crate::core::command::Command;
use crate::core::session::{DurationBreakdown, Session, SessionSummary, UserId};
use crate::core::store::SessionStore;
use crate::infra::errors::EngineError;

/// Read-only view of a live session.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub summary: SessionSummary,
    pub elapsed: DurationBreakdown,
    pub active_seconds: f64,
    pub earnings: f64,
    pub paused: bool,
}

/// Result of ending a session.
#[derive(Debug, Clone, PartialEq)]
pub struct EndReport {
    pub summary: SessionSummary,
    pub elapsed: DurationBreakdown,
    pub active_seconds: f64,
    pub earnings: f64,
    pub total_earnings: f64,
}

/// Periodic progress update for one live session.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressNotification {
    pub user_id: UserId,
    pub session_name: String,
    pub hours: u64,
    pub minutes: u64,
    pub earnings: f64,
    pub paused: bool,
}

/// Successful outcome of a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Help,
    Started(SessionSummary),
    Paused { name: String },
    Resumed { name: String, paused_for: DurationBreakdown },
    Status(StatusSnapshot),
    Ended(EndReport),
}

#[derive(Debug)]
pub struct SessionEngine {
    store: SessionStore,
    project_hours: f64,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_HOURS)
    }
}

impl SessionEngine {
    pub fn new(project_hours: f64) -> Self {
        Self::with_store(SessionStore::new(), project_hours)
    }

    pub fn with_store(store: SessionStore, project_hours: f64) -> Self {
        let project_hours = if project_hours.is_finite() && project_hours > 0.0 {
            project_hours
        } else {
            tracing::warn!(
                "Invalid project_hours {}, using {}",
                project_hours,
                DEFAULT_PROJECT_HOURS
            );
            DEFAULT_PROJECT_HOURS
        };
        Self {
            store,
            project_hours,
        }
    }

    pub fn project_hours(&self) -> f64 {
        self.project_hours
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn start(
        &mut self,
        user: UserId,
        name: &str,
        amount: f64,
        kind: BillingKind,
        now: DateTime<Utc>,
    ) -> Result<SessionSummary, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidArgument(
                "session name must not be empty".into(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        if let Some(existing) = self.store.get(user) {
            return Err(EngineError::AlreadyActive {
                name: existing.name.clone(),
            });
        }

        let billing = BillingStrategy::new(kind, amount, self.project_hours);
        let session = Session::new(user, name.to_string(), billing, now);
        let summary = session.summary();
        self.store.insert(session);

        tracing::info!("User {} started '{}' ({:?}, {:.2})", user, name, kind, amount);
        Ok(summary)
    }

    pub fn pause(&mut self, user: UserId, now: DateTime<Utc>) -> Result<String, EngineError> {
        let session = self
            .store
            .get_mut(user)
            .ok_or(EngineError::NoActiveSession)?;
        if session.is_paused() {
            return Err(EngineError::AlreadyPaused);
        }
        session.paused_at = Some(now);
        tracing::debug!("User {} paused '{}'", user, session.name);
        Ok(session.name.clone())
    }

    /// Close the open pause, returning the session name and the pause length.
    pub fn resume(
        &mut self,
        user: UserId,
        now: DateTime<Utc>,
    ) -> Result<(String, DurationBreakdown), EngineError> {
        let session = self
            .store
            .get_mut(user)
            .ok_or(EngineError::NoActiveSession)?;
        if !session.is_paused() {
            return Err(EngineError::NotPaused);
        }
        let pause = session.open_pause(now);
        session.total_paused += pause;
        session.paused_at = None;
        tracing::debug!(
            "User {} resumed '{}' after {}s",
            user,
            session.name,
            pause.num_seconds()
        );
        Ok((session.name.clone(), DurationBreakdown::from_duration(pause)))
    }

    pub fn status(&self, user: UserId, now: DateTime<Utc>) -> Result<StatusSnapshot, EngineError> {
        let session = self.store.get(user).ok_or(EngineError::NoActiveSession)?;
        let active_seconds = session.active_seconds(now);
        Ok(StatusSnapshot {
            summary: session.summary(),
            elapsed: DurationBreakdown::from_seconds(active_seconds),
            active_seconds,
            earnings: session.billing.earnings(active_seconds),
            paused: session.is_paused(),
        })
    }

    /// Finish the session. A paused session ends as of `now` with the open
    /// pause excluded.
    pub fn end(&mut self, user: UserId, now: DateTime<Utc>) -> Result<EndReport, EngineError> {
        let session = self.store.remove(user).ok_or(EngineError::NoActiveSession)?;
        let active_seconds = session.active_seconds(now);
        let earnings = session.billing.earnings(active_seconds);
        let total_earnings = self.store.credit(user, earnings);

        tracing::info!(
            "User {} ended '{}' after {:.0}s, earned {:.2}",
            user,
            session.name,
            active_seconds,
            earnings
        );

        Ok(EndReport {
            summary: session.summary(),
            elapsed: DurationBreakdown::from_seconds(active_seconds),
            active_seconds,
            earnings,
            total_earnings,
        })
    }

    /// Progress for every live session, running or paused. No mutation.
    pub fn tick(&self, now: DateTime<Utc>) -> Vec<ProgressNotification> {
        self.store
            .sessions()
            .map(|session| {
                let active_seconds = session.active_seconds(now);
                let elapsed = DurationBreakdown::from_seconds(active_seconds);
                ProgressNotification {
                    user_id: session.user_id,
                    session_name: session.name.clone(),
                    hours: elapsed.hours,
                    minutes: elapsed.minutes,
                    earnings: session.billing.earnings(active_seconds),
                    paused: session.is_paused(),
                }
            })
            .collect()
    }

    pub fn total_earnings(&self, user: UserId) -> f64 {
        self.store.total_earnings(user)
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        user: UserId,
        now: DateTime<Utc>,
    ) -> Result<Reply, EngineError> {
        match command {
            Command::Help => Ok(Reply::Help),
            Command::Start { name, amount, kind } => self
                .start(user, &name, amount, kind, now)
                .map(Reply::Started),
            Command::Pause => self.pause(user, now).map(|name| Reply::Paused { name }),
            Command::Resume => self
                .resume(user, now)
                .map(|(name, paused_for)| Reply::Resumed { name, paused_for }),
            Command::Status => self.status(user, now).map(Reply::Status),
            Command::End => self.end(user, now).map(Reply::Ended),
        }
    }
}
