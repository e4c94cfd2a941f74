//! Session table schema and record types

use crate::dialog::PendingFlow;
use chrono::{DateTime, Utc};

/// SQL schema for initialization
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    state TEXT NOT NULL DEFAULT '{"type":"none"}',
    last_message TEXT,
    last_response TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    expires_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at);
"#;

/// One session row, as loaded at the start of a turn
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session_id: String,
    pub state: PendingFlow,
    pub last_message: Option<String>,
    pub last_response: Option<String>,
    #[allow(dead_code)] // Used in tests
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)] // Used in tests
    pub updated_at: DateTime<Utc>,
    /// Unix epoch seconds; rows at or past this instant are invisible to reads
    #[allow(dead_code)] // Used in tests
    pub expires_at: i64,
}
