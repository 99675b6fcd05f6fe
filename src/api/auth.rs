//! Authentication route group.
//!
//! Issues short-lived HS256 access tokens and rotating opaque refresh
//! tokens. Lifetimes come from `JwtConfig`: `access_expiry` is a duration
//! string ("15m"), refresh tokens live `refresh_expiry_days` whole days
//! and are persisted server-side so they can be revoked.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiError, MountError, RouteGroup};
use crate::config::JwtConfig;
use crate::http::AppState;

/// Production auth group, mounted at `/api/auth`.
pub struct AuthRoutes;

impl RouteGroup for AuthRoutes {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn register(&self, router: Router<AppState>) -> Result<Router<AppState>, MountError> {
        Ok(router
            .route("/auth/login", post(login))
            .route("/auth/refresh", post(refresh)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller, extracted from the `Authorization` header.
///
/// Usable by any route group; rejection is a 401 before the handler runs.
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::MissingToken)?;

        let claims = verify_access_token(&state.config.jwt, token)?;
        Ok(CurrentUser { id: claims.sub })
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RefreshRequest {
    refresh_token: Uuid,
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Uuid,
    token_type: &'static str,
    /// Access token lifetime in seconds.
    expires_in: i64,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct RefreshRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(&body.email)
    .fetch_optional(state.db.pool())
    .await?
    .ok_or(ApiError::InvalidCredentials)?;

    let hash = PasswordHash::new(&user.password_hash).map_err(|_| ApiError::Internal)?;
    Argon2::default()
        .verify_password(body.password.as_bytes(), &hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    issue_tokens(&state, user.id).await.map(Json)
}

/// Exchange a refresh token for a fresh pair. The presented token is
/// consumed whether or not it is still valid (rotation).
async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let row = sqlx::query_as::<_, RefreshRow>(
        "DELETE FROM refresh_tokens WHERE token = $1 RETURNING user_id, expires_at",
    )
    .bind(body.refresh_token)
    .fetch_optional(state.db.pool())
    .await?
    .ok_or(ApiError::InvalidToken)?;

    if row.expires_at < Utc::now() {
        return Err(ApiError::InvalidToken);
    }

    issue_tokens(&state, row.user_id).await.map(Json)
}

async fn issue_tokens(state: &AppState, user_id: Uuid) -> Result<TokenResponse, ApiError> {
    let jwt = &state.config.jwt;
    let lifetime = access_token_lifetime(jwt);
    let access_token = issue_access_token(jwt, user_id, lifetime)?;

    let refresh_token = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::days(i64::from(jwt.refresh_expiry_days));
    sqlx::query("INSERT INTO refresh_tokens (token, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(refresh_token)
        .bind(user_id)
        .bind(expires_at)
        .execute(state.db.pool())
        .await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: lifetime.num_seconds(),
    })
}

fn issue_access_token(
    jwt: &JwtConfig,
    user_id: Uuid,
    lifetime: Duration,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.access_secret.as_bytes()),
    )
    .map_err(|_| ApiError::Internal)
}

fn verify_access_token(jwt: &JwtConfig, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.access_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::InvalidToken)
}

fn access_token_lifetime(jwt: &JwtConfig) -> Duration {
    parse_expiry(&jwt.access_expiry).unwrap_or_else(|| Duration::minutes(15))
}

/// Parse a duration string of the form `<n><unit>` with unit one of
/// s/m/h/d. Anything else yields `None` and the caller falls back.
fn parse_expiry(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if !raw.is_ascii() || raw.len() < 2 {
        return None;
    }

    let (value, unit) = raw.split_at(raw.len() - 1);
    let value: i64 = value.parse().ok()?;
    if value <= 0 {
        return None;
    }

    match unit {
        "s" => Some(Duration::seconds(value)),
        "m" => Some(Duration::minutes(value)),
        "h" => Some(Duration::hours(value)),
        "d" => Some(Duration::days(value)),
        _ => None,
    }
}
