//! Session load/persist policy over the database
//!
//! Reads fail open: a missing, expired, unreadable, or malformed record all
//! mean "fresh conversation", because a storage hiccup must never stop a
//! user from talking. Writes fail silent but logged: the reply computed for
//! the current turn is returned regardless, at the cost of at most one
//! turn's context.

use crate::db::{Database, DbError};
use crate::dialog::PendingFlow;
use chrono::{Duration, Utc};

/// Store adapter carrying the session TTL policy
#[derive(Clone)]
pub struct SessionStore {
    db: Database,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(db: Database, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// Load the pending flow for a session, failing open to a fresh state
    pub fn load(&self, session_id: &str) -> PendingFlow {
        match self.db.get_session(session_id, Utc::now()) {
            Ok(Some(record)) => record.state,
            Ok(None) => PendingFlow::None,
            Err(DbError::MalformedState(detail)) => {
                tracing::warn!(detail = %detail, "Discarding malformed session state");
                PendingFlow::None
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Session load failed, starting fresh");
                PendingFlow::None
            }
        }
    }

    /// Persist one turn.
    ///
    /// The state upsert happens only when the flow state actually changed
    /// this turn; the audit record (last message and response) is written
    /// unconditionally. Both refresh the TTL.
    pub fn persist_turn(
        &self,
        session_id: &str,
        loaded: &PendingFlow,
        new_state: &PendingFlow,
        message: &str,
        response: &str,
    ) {
        let now = Utc::now();
        let expires_at = (now + self.ttl).timestamp();

        if new_state != loaded {
            if let Err(e) = self
                .db
                .update_session_state(session_id, new_state, now, expires_at)
            {
                tracing::error!(session_id = %session_id, error = %e, "Failed to persist session state");
            }
        }

        if let Err(e) = self
            .db
            .record_exchange(session_id, message, response, now, expires_at)
        {
            tracing::error!(session_id = %session_id, error = %e, "Failed to record exchange");
        }
    }
}
