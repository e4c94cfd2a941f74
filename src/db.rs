//! SQLite persistence for dialog sessions
//!
//! One row per session: the pending flow as tagged JSON, the latest
//! exchange for audit, and an absolute expiry timestamp. State writes and
//! audit writes are separate column-level upserts so neither clobbers the
//! other's fields. Expired rows are deleted the moment a read touches
//! them; the background purge only catches the rows nobody asks for again.

mod schema;

pub use schema::*;

use crate::dialog::PendingFlow;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Malformed session state: {0}")]
    MalformedState(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Session Operations ====================

    /// Fetch a session row, deleting it outright if its TTL has lapsed.
    ///
    /// An expired row must not merely be hidden: leaving it in place would
    /// let a later column-level upsert on the same id refresh its TTL around
    /// stale flow state. Deleting it here means any revisit of the id starts
    /// from the schema defaults.
    ///
    /// A row whose state column fails to parse is reported as
    /// `MalformedState` so callers can apply their fail-open policy
    /// deliberately rather than mistaking it for "no session".
    pub fn get_session(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<SessionRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM sessions WHERE session_id = ?1 AND expires_at <= ?2",
            params![session_id, now.timestamp()],
        )?;
        let fetched = conn.query_row(
            "SELECT session_id, state, last_message, last_response, created_at, updated_at, expires_at
             FROM sessions WHERE session_id = ?1 AND expires_at > ?2",
            params![session_id, now.timestamp()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                ))
            },
        );

        match fetched {
            Ok((
                session_id,
                state_json,
                last_message,
                last_response,
                created_at,
                updated_at,
                expires_at,
            )) => {
                let state: PendingFlow = serde_json::from_str(&state_json).map_err(|e| {
                    DbError::MalformedState(format!("session {session_id}: {e}"))
                })?;
                Ok(Some(SessionRecord {
                    session_id,
                    state,
                    last_message,
                    last_response,
                    created_at: parse_datetime(&created_at),
                    updated_at: parse_datetime(&updated_at),
                    expires_at,
                }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(DbError::Sqlite(other)),
        }
    }

    /// Upsert only the flow state for a session, refreshing the TTL
    pub fn update_session_state(
        &self,
        session_id: &str,
        state: &PendingFlow,
        now: DateTime<Utc>,
        expires_at: i64,
    ) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        let state_json = serde_json::to_string(state).unwrap();
        conn.execute(
            "INSERT INTO sessions (session_id, state, created_at, updated_at, expires_at)
             VALUES (?1, ?2, ?3, ?3, ?4)
             ON CONFLICT(session_id) DO UPDATE SET
                 state = excluded.state,
                 updated_at = excluded.updated_at,
                 expires_at = excluded.expires_at",
            params![session_id, state_json, now.to_rfc3339(), expires_at],
        )?;
        Ok(())
    }

    /// Upsert the latest exchange for a session, refreshing the TTL.
    ///
    /// Never touches the state column: a fresh row gets the schema default
    /// and an existing row keeps whatever flow state it holds.
    pub fn record_exchange(
        &self,
        session_id: &str,
        message: &str,
        response: &str,
        now: DateTime<Utc>,
        expires_at: i64,
    ) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sessions (session_id, last_message, last_response, created_at, updated_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?4, ?5)
             ON CONFLICT(session_id) DO UPDATE SET
                 last_message = excluded.last_message,
                 last_response = excluded.last_response,
                 updated_at = excluded.updated_at,
                 expires_at = excluded.expires_at",
            params![session_id, message, response, now.to_rfc3339(), expires_at],
        )?;
        Ok(())
    }

    /// Delete rows whose TTL has lapsed; returns how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> DbResult<usize> {
        let conn = self.conn.lock().unwrap();
        let purged = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![now.timestamp()],
        )?;
        Ok(purged)
    }

    /// Count sessions still within their TTL
    pub fn count_active_sessions(&self, now: DateTime<Utc>) -> DbResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE expires_at > ?1",
            params![now.timestamp()],
            |row| row.get(0),
        )
        .map_err(DbError::from)
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
