//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! server. All types derive Serde traits so the effective config can be
//! logged or dumped; the only production source is the environment.

use serde::{Deserialize, Serialize};

/// Root configuration for the compliance server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings (bind address, timeouts).
    pub server: ServerConfig,

    /// Postgres connection parameters.
    pub database: DatabaseConfig,

    /// Cross-origin policy for the browser frontend.
    pub cors: CorsConfig,

    /// Token issuance knobs consumed by the auth route group.
    pub jwt: JwtConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Deadline for draining in-flight requests during shutdown.
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        }
    }
}

/// Postgres connection parameters.
///
/// The pool itself is constructed lazily; these values are only turned
/// into a connection when the first acquire happens (the startup probe).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "charity_compliance".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
        }
    }
}

/// Cross-origin policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origin allowed to call the API with credentials.
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_string(),
        }
    }
}

/// Token issuance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret for access tokens.
    pub access_secret: String,

    /// Access token lifetime as a duration string (e.g., "15m").
    pub access_expiry: String,

    /// Refresh token lifetime in whole days.
    pub refresh_expiry_days: u32,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: "change-me-in-production-access".to_string(),
            access_expiry: "15m".to_string(),
            refresh_expiry_days: 7,
        }
    }
}
