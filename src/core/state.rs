// Application state (AppState)

use crate::core::config::Config;
use crate::mail::client::Mailer;
use crate::sessions::store::SessionStore;
use anyhow::Result;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Shared application state, cloned into every handler via axum's State.
pub struct AppState {
    /// Bounded MySQL connection pool.
    pub db: MySqlPool,

    /// Server-side session store.
    pub sessions: SessionStore,

    /// Outbound mail client.
    pub mailer: Mailer,

    /// Configuration.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, db: MySqlPool) -> Result<Self> {
        let duration_secs = (config.session.duration_minutes * 60) as i64;
        let mailer = Mailer::new(&config.mail)?;

        Ok(Self {
            db,
            sessions: SessionStore::new(duration_secs),
            mailer,
            config: Arc::new(config),
        })
    }
}
