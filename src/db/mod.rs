pub mod attendance;
pub mod users;

use crate::core::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Build the bounded connection pool. Connections are established lazily so
/// the server can start while the database is still coming up.
pub fn connect(config: &DatabaseConfig) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)
        .context("Failed to create database pool")
}
