//! Configuration loading from the process environment.
//!
//! Every variable is optional; absence substitutes the documented
//! default, so loading is infallible and runs exactly once per process.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3001` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `SHUTDOWN_TIMEOUT_SECS` | `30` |
//! | `DB_HOST` | `localhost` |
//! | `DB_PORT` | `5432` |
//! | `DB_NAME` | `charity_compliance` |
//! | `DB_USER` | `postgres` |
//! | `DB_PASSWORD` | `postgres` |
//! | `CORS_ORIGIN` | `http://localhost:5173` |
//! | `JWT_ACCESS_SECRET` | `change-me-in-production-access` |
//! | `JWT_ACCESS_EXPIRY` | `15m` |
//! | `JWT_REFRESH_EXPIRY_DAYS` | `7` |

use std::str::FromStr;

use crate::config::schema::{AppConfig, CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Pure read of the environment; never fails. The returned value is
    /// immutable for the rest of the process lifetime.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env_string("HOST", "0.0.0.0"),
                port: env_parse("PORT", 3001),
                request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
                shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", 30),
            },
            database: DatabaseConfig {
                host: env_string("DB_HOST", "localhost"),
                port: env_parse("DB_PORT", 5432),
                name: env_string("DB_NAME", "charity_compliance"),
                user: env_string("DB_USER", "postgres"),
                password: env_string("DB_PASSWORD", "postgres"),
            },
            cors: CorsConfig {
                origin: env_string("CORS_ORIGIN", "http://localhost:5173"),
            },
            jwt: JwtConfig {
                access_secret: env_string("JWT_ACCESS_SECRET", "change-me-in-production-access"),
                access_expiry: env_string("JWT_ACCESS_EXPIRY", "15m"),
                refresh_expiry_days: env_parse("JWT_REFRESH_EXPIRY_DAYS", 7),
            },
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a numeric variable, falling back to the default when the value is
/// absent or malformed. Malformed values are logged so a typo'd `PORT`
/// does not silently bind somewhere unexpected.
fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    variable = key,
                    value = %raw,
                    "Malformed numeric environment value, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The environment is process-global; tests that touch it must not
    // interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "HOST",
        "PORT",
        "REQUEST_TIMEOUT_SECS",
        "SHUTDOWN_TIMEOUT_SECS",
        "DB_HOST",
        "DB_PORT",
        "DB_NAME",
        "DB_USER",
        "DB_PASSWORD",
        "CORS_ORIGIN",
        "JWT_ACCESS_SECRET",
        "JWT_ACCESS_EXPIRY",
        "JWT_REFRESH_EXPIRY_DAYS",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn absent_variables_yield_documented_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = AppConfig::from_env();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.server.shutdown_timeout_secs, 30);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "charity_compliance");
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password, "postgres");
        assert_eq!(config.cors.origin, "http://localhost:5173");
        assert_eq!(config.jwt.access_secret, "change-me-in-production-access");
        assert_eq!(config.jwt.access_expiry, "15m");
        assert_eq!(config.jwt.refresh_expiry_days, 7);
    }

    #[test]
    fn set_variables_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("PORT", "8080");
        std::env::set_var("DB_NAME", "compliance_test");
        std::env::set_var("CORS_ORIGIN", "https://app.example.org");
        std::env::set_var("JWT_REFRESH_EXPIRY_DAYS", "30");

        let config = AppConfig::from_env();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.name, "compliance_test");
        assert_eq!(config.cors.origin, "https://app.example.org");
        assert_eq!(config.jwt.refresh_expiry_days, 30);

        clear_env();
    }

    #[test]
    fn malformed_numeric_values_fall_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("DB_PORT", "54_32");
        std::env::set_var("JWT_REFRESH_EXPIRY_DAYS", "-1");

        let config = AppConfig::from_env();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.jwt.refresh_expiry_days, 7);

        clear_env();
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let mut server = ServerConfig::default();
        server.host = "127.0.0.1".to_string();
        server.port = 9000;
        assert_eq!(server.bind_address(), "127.0.0.1:9000");
    }
}
