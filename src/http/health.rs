//! Liveness endpoint.
//!
//! `GET /health` answers as long as the process is up. It deliberately
//! touches nothing else — no database, no auth — so orchestrators get a
//! pure process-liveness signal.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// ISO-8601 instant at which the check was answered.
    timestamp: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
