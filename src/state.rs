use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: SqlitePool, session_ttl: Duration) -> Self {
        Self {
            db,
            sessions: SessionStore::new(session_ttl),
        }
    }
}
