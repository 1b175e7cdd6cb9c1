// src/core/mod.rs — Work-session engine and everything it needs

pub mod billing;
pub mod clock;
pub mod command;
pub mod engine;
pub mod presenter;
pub mod reminder;
pub mod session;
pub mod store;

use std::sync::{Arc, Mutex, MutexGuard};

pub use billing::{BillingKind, BillingStrategy};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Command;
pub use engine::{EndReport, ProgressNotification, Reply, SessionEngine, StatusSnapshot};
pub use presenter::Presenter;
pub use reminder::{ReminderContext, ReminderScheduler, SchedulerState, SweepReport};
pub use session::{DurationBreakdown, Session, SessionSummary, UserId};
pub use store::SessionStore;

/// The engine as shared between the command loop and the reminder task.
pub type SharedEngine = Arc<Mutex<SessionEngine>>;

pub fn shared_engine(engine: SessionEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

/// Lock the engine. Operations validate before mutating, so a poisoned lock
/// still guards consistent state.
pub fn lock_engine(engine: &SharedEngine) -> MutexGuard<'_, SessionEngine> {
    engine.lock().unwrap_or_else(|e| e.into_inner())
}
