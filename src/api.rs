//! HTTP API for the teller service

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::bank::BankSnapshot;
use crate::config::AppConfig;
use crate::db::Database;
use crate::engine::DialogEngine;
use crate::session::SessionStore;
use chrono::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: DialogEngine,
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        let store = SessionStore::new(db.clone(), Duration::hours(config.session_ttl_hours));
        let engine = DialogEngine::new(store, BankSnapshot::sample(), config.max_message_length);
        Self { engine, db }
    }
}
