//! API route groups.
//!
//! # Data Flow
//! ```text
//! RouteGroup implementations (auth.rs, reports.rs)
//!     → mount_groups (fold into one router, fatal on first failure)
//!     → nested under /api by the HTTP server assembly
//!     → listening starts only after every group is mounted
//! ```
//!
//! # Design Decisions
//! - Mounting is an explicit, fallible startup step; a group that cannot
//!   register aborts the boot before any socket is bound
//! - The lifecycle coordinator holds no knowledge of group internals
//!   beyond the `RouteGroup` contract
//! - Handler failures map to JSON error responses via `ApiError`; they
//!   never take the server down

pub mod auth;
pub mod reports;

pub use auth::{AuthRoutes, CurrentUser};
pub use reports::ReportRoutes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;

use crate::http::AppState;

/// A cohesive set of endpoints registered together under `/api`.
///
/// Implementations are owned by their own modules; the lifecycle
/// coordinator only guarantees they are mounted before the process
/// starts listening.
pub trait RouteGroup {
    /// Short name used in logs and mount errors.
    fn name(&self) -> &'static str;

    /// Add this group's routes to the router.
    fn register(&self, router: Router<AppState>) -> Result<Router<AppState>, MountError>;
}

/// A route group failed to register. Always fatal at startup.
#[derive(Debug, Error)]
#[error("failed to mount route group `{group}`: {reason}")]
pub struct MountError {
    pub group: &'static str,
    pub reason: String,
}

/// Fold every group into a single router, in order.
pub fn mount_groups(groups: &[&dyn RouteGroup]) -> Result<Router<AppState>, MountError> {
    let mut router = Router::new();
    for group in groups {
        router = group.register(router)?;
        tracing::debug!(group = group.name(), "Route group mounted");
    }
    Ok(router)
}

/// Request-time error for API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("resource not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials
            | ApiError::MissingToken
            | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail stays in the logs, not the response body.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "internal error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    struct Healthy;

    impl RouteGroup for Healthy {
        fn name(&self) -> &'static str {
            "healthy"
        }

        fn register(&self, router: Router<AppState>) -> Result<Router<AppState>, MountError> {
            Ok(router.route("/ping", get(|| async { "pong" })))
        }
    }

    struct Broken;

    impl RouteGroup for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn register(&self, _router: Router<AppState>) -> Result<Router<AppState>, MountError> {
            Err(MountError {
                group: "broken",
                reason: "registration rejected".to_string(),
            })
        }
    }

    #[test]
    fn mounting_stops_at_the_first_failing_group() {
        let err = mount_groups(&[&Healthy, &Broken]).unwrap_err();
        assert_eq!(err.group, "broken");
    }

    #[test]
    fn mounting_succeeds_when_every_group_registers() {
        assert!(mount_groups(&[&Healthy]).is_ok());
    }
}
