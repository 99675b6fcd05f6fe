//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::{routing::get, Router};
use compliance_server::api::{MountError, RouteGroup};
use compliance_server::{AppConfig, AppState, Database};

/// Config bound to loopback with a caller-chosen server port and
/// database port. Point the database port at something dead to simulate
/// an unreachable Postgres.
pub fn test_config(server_port: u16, db_port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = server_port;
    config.server.shutdown_timeout_secs = 5;
    config.database.host = "127.0.0.1".to_string();
    config.database.port = db_port;
    config
}

/// State over a lazy pool; no database needs to be running.
pub fn test_state(config: &AppConfig) -> AppState {
    let db = Database::connect_lazy(&config.database);
    AppState {
        config: Arc::new(config.clone()),
        db,
    }
}

/// Minimal route group standing in for the production ones.
pub struct PingGroup;

impl RouteGroup for PingGroup {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn register(&self, router: Router<AppState>) -> Result<Router<AppState>, MountError> {
        Ok(router.route("/ping", get(|| async { "pong" })))
    }
}

/// Client that never reuses pooled connections, so "connection refused"
/// after a drain is observed reliably.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .expect("client builds")
}
