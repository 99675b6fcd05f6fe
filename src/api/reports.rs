//! Compliance report route group.
//!
//! CRUD boundary over the `reports` table. The compliance rules
//! themselves live with the reporting frontend and the review workflow;
//! this group only stores and serves submissions for authenticated users.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiError, CurrentUser, MountError, RouteGroup};
use crate::http::AppState;

/// Production reports group, mounted at `/api/reports`.
pub struct ReportRoutes;

impl RouteGroup for ReportRoutes {
    fn name(&self) -> &'static str {
        "reports"
    }

    fn register(&self, router: Router<AppState>) -> Result<Router<AppState>, MountError> {
        Ok(router
            .route("/reports", get(list_reports).post(create_report))
            .route("/reports/{id}", get(get_report)))
    }
}

#[derive(Serialize, sqlx::FromRow)]
struct Report {
    id: Uuid,
    charity_number: String,
    /// Reporting period, e.g. "2025-Q4".
    period: String,
    status: String,
    created_by: Uuid,
    submitted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CreateReport {
    charity_number: String,
    period: String,
}

async fn list_reports(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = sqlx::query_as::<_, Report>(
        "SELECT id, charity_number, period, status, created_by, submitted_at, created_at \
         FROM reports ORDER BY created_at DESC",
    )
    .fetch_all(state.db.pool())
    .await?;

    Ok(Json(reports))
}

async fn get_report(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError> {
    let report = sqlx::query_as::<_, Report>(
        "SELECT id, charity_number, period, status, created_by, submitted_at, created_at \
         FROM reports WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(state.db.pool())
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(report))
}

async fn create_report(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateReport>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = sqlx::query_as::<_, Report>(
        "INSERT INTO reports (id, charity_number, period, status, created_by, created_at) \
         VALUES ($1, $2, $3, 'draft', $4, NOW()) \
         RETURNING id, charity_number, period, status, created_by, submitted_at, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&body.charity_number)
    .bind(&body.period)
    .bind(user.id)
    .fetch_one(state.db.pool())
    .await?;

    Ok((StatusCode::CREATED, Json(report)))
}
