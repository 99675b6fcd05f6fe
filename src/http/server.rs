//! HTTP server assembly.
//!
//! # Responsibilities
//! - Create the Axum router with the health endpoint and `/api` groups
//! - Wire up middleware (CORS, tracing, timeout, request ID)
//! - Serve with graceful shutdown, bounded by a drain deadline
//!
//! The listener itself is bound by the lifecycle coordinator so that
//! binding strictly follows the connectivity probe.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::api::RouteGroup;
use crate::config::{AppConfig, CorsConfig};
use crate::db::Database;
use crate::http::health;
use crate::lifecycle::{ShutdownController, StartupError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
}

/// Request ID generator (UUID v4 per request).
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build the complete application router.
///
/// Route groups are registered in order; the first failure aborts with a
/// mount error before any listener exists. The CORS origin is parsed
/// here, so a malformed `CORS_ORIGIN` is also a startup failure rather
/// than a silently-permissive policy.
pub fn build_app(state: AppState, groups: &[&dyn RouteGroup]) -> Result<Router, StartupError> {
    let api = crate::api::mount_groups(groups)?;
    let cors = cors_layer(&state.config.cors)?;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let router = Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Outermost: the id must exist before Propagate copies it to the
        // response.
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .with_state(state);

    Ok(router)
}

/// Exact-origin CORS with credentials, per the frontend contract.
fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origin: HeaderValue = config
        .origin
        .parse()
        .map_err(|_| StartupError::Cors {
            origin: config.origin.clone(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Serve the application until shutdown is triggered.
///
/// Stops accepting as soon as the controller enters `Draining`, then
/// waits for in-flight requests up to `drain_timeout`. If the deadline
/// passes the serve future is dropped, force-closing whatever is left;
/// the caller still releases resources and exits cleanly.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: ShutdownController,
    drain_timeout: Duration,
) -> Result<(), std::io::Error> {
    let drain = {
        let shutdown = shutdown.clone();
        async move {
            shutdown.draining().await;
        }
    };

    let deadline = {
        let shutdown = shutdown.clone();
        async move {
            shutdown.draining().await;
            tokio::time::sleep(drain_timeout).await;
        }
    };

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(drain)
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = deadline => {
            tracing::warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Drain deadline exceeded, forcing close of remaining connections"
            );
        }
    }

    tracing::info!("HTTP server stopped");
    Ok(())
}
