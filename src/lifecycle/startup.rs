//! Startup orchestration.
//!
//! # Responsibilities
//! - Execute the boot sequence in strict order
//! - Classify failures (everything here is fatal; no retries)
//! - Hand off to the HTTP server, then tear down in order
//!
//! # Design Decisions
//! - Fail fast: a failed step terminates the process, it never rolls
//!   back partial state or serves degraded
//! - The connectivity probe runs before the bind, so a process with an
//!   unreachable database never opens its listening socket
//! - Restart policy belongs to the external supervisor, not this code

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::{MountError, RouteGroup};
use crate::config::AppConfig;
use crate::db::Database;
use crate::http::{self, AppState};
use crate::lifecycle::{signals, ShutdownController};

/// Fatal boot or serve failure. Surfaced once via process exit.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route mount failed: {0}")]
    Mount(#[from] MountError),

    #[error("invalid CORS origin `{origin}`")]
    Cors { origin: String },

    #[error("database connectivity probe failed: {0}")]
    Database(#[source] sqlx::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Process lifecycle coordinator.
///
/// Constructed once by the entry point and consumed by [`run`]. Holds
/// the shutdown controller so other components can obtain a trigger
/// handle before the server starts.
///
/// [`run`]: Lifecycle::run
pub struct Lifecycle {
    config: AppConfig,
    shutdown: ShutdownController,
}

impl Lifecycle {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownController::new(),
        }
    }

    /// Handle for triggering shutdown from elsewhere (e.g., a fatal
    /// error in a background component).
    pub fn shutdown_handle(&self) -> ShutdownController {
        self.shutdown.clone()
    }

    /// Bring the process from cold start to serving, then to a clean
    /// exit.
    ///
    /// Startup is strictly sequential; the returned error identifies the
    /// step that failed. `Ok(())` means a graceful shutdown completed
    /// and every resource was released.
    pub async fn run(self, groups: &[&dyn RouteGroup]) -> Result<(), StartupError> {
        let config = Arc::new(self.config);

        // Lazy pool: no I/O yet, so this step cannot fail.
        let db = Database::connect_lazy(&config.database);

        // Routes and middleware are fully assembled before anything
        // touches the network. A group that fails to mount aborts here.
        let state = AppState {
            config: config.clone(),
            db: db.clone(),
        };
        let app = http::build_app(state, groups)?;

        // The probe gates the bind: serving against an unreachable
        // database would only produce confusing request-time errors.
        db.test_connection().await.map_err(StartupError::Database)?;
        tracing::info!("Database connection verified");

        let addr = config.server.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|source| {
            StartupError::Bind {
                addr: addr.clone(),
                source,
            }
        })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

        signals::spawn_listener(self.shutdown.clone());

        tracing::info!(address = %local_addr, "Server listening");

        let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
        let served = http::serve(listener, app, self.shutdown.clone(), drain_timeout)
            .await
            .map_err(StartupError::Serve);

        // Teardown is uniform: whether the drain finished, hit its
        // deadline, or the server failed outright, the pool is released
        // exactly once before the outcome propagates.
        teardown(&db, &self.shutdown).await;
        served
    }
}

/// Release resources and record the terminal phase.
async fn teardown(db: &Database, shutdown: &ShutdownController) {
    db.close_pool().await;
    shutdown.mark_closed();
    tracing::info!("Database pool released");
}
