//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, graceful serve)
//!     → /health (owned here, no dependencies)
//!     → /api/*  (delegated to mounted route groups)
//! ```
//!
//! # Design Decisions
//! - The router is fully assembled before the listener binds; a request
//!   can never observe a half-mounted API
//! - CORS allows exactly the configured origin, with credentials
//! - Request IDs are attached as early as possible for tracing

pub mod health;
pub mod server;

pub use server::{build_app, serve, AppState};
