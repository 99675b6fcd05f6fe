//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env)
//!     → loader.rs (per-variable read with documented default)
//!     → AppConfig (typed, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at boot; there is no reload path
//! - Every field has a default, so loading can never fail
//! - Malformed numeric values fall back to the default with a warning
//!   instead of aborting the boot

pub mod loader;
pub mod schema;

pub use schema::AppConfig;
pub use schema::CorsConfig;
pub use schema::DatabaseConfig;
pub use schema::JwtConfig;
pub use schema::ServerConfig;
