//! Postgres connection pool lifecycle.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// How long a single acquire (including the startup probe) may spend
/// establishing a connection before it is reported as a failure.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 10;

/// Owner of the process-wide Postgres pool.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without touching the network.
    ///
    /// Connections are only opened on first acquire, which during startup
    /// is the connectivity probe.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Verify the database is reachable with a `SELECT 1` round trip.
    ///
    /// Called once before the listener binds; an error here aborts the
    /// whole startup.
    pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Release every pooled connection. Always resolves; safe to call on
    /// a pool that never connected.
    pub async fn close_pool(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            // Nothing listens here; connects are refused immediately.
            port: 1,
            ..DatabaseConfig::default()
        }
    }

    #[tokio::test]
    async fn lazy_construction_does_no_io() {
        // Construction must succeed even though the address is dead.
        let db = Database::connect_lazy(&unreachable_config());
        assert!(!db.is_closed());
    }

    #[tokio::test]
    async fn probe_fails_when_database_is_unreachable() {
        let db = Database::connect_lazy(&unreachable_config());
        assert!(db.test_connection().await.is_err());
    }

    #[tokio::test]
    async fn close_pool_resolves_and_marks_pool_closed() {
        let db = Database::connect_lazy(&unreachable_config());
        db.close_pool().await;
        assert!(db.is_closed());

        // Closing again is a no-op.
        db.close_pool().await;
        assert!(db.is_closed());
    }
}
