// src/core/store.rs — In-memory session store and earnings ledger

use std::collections::{BTreeMap, HashMap};

use super::session::{Session, UserId};

/// Live sessions keyed by user, plus cumulative earnings of finished ones.
///
/// Nothing here survives a restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: BTreeMap<UserId, Session>,
    ledger: HashMap<UserId, f64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserId) -> Option<&Session> {
        self.sessions.get(&user)
    }

    pub fn get_mut(&mut self, user: UserId) -> Option<&mut Session> {
        self.sessions.get_mut(&user)
    }

    /// Insert a session. The caller checks that the user has none yet.
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.user_id, session);
    }

    pub fn remove(&mut self, user: UserId) -> Option<Session> {
        self.sessions.remove(&user)
    }

    /// Live sessions in user-id order.
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    /// Add finished-session earnings to the ledger, returning the new total.
    pub fn credit(&mut self, user: UserId, amount: f64) -> f64 {
        let entry = self.ledger.entry(user).or_default();
        *entry += amount.max(0.0);
        *entry
    }

    pub fn total_earnings(&self, user: UserId) -> f64 {
        self.ledger.get(&user).copied().unwrap_or(0.0)
    }
}
