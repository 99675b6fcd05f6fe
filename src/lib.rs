//! Charity Compliance Reporting API
//!
//! A small HTTP API backend built with Tokio and Axum. This crate owns the
//! process bootstrap and lifecycle: everything between cold start and
//! accepting traffic, and everything between a termination signal and a
//! clean exit.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌─────────────────────────────────────────────────┐
//!                 │               COMPLIANCE SERVER                 │
//!                 │                                                 │
//!  environment ───┼─▶ config ───▶ lifecycle ───▶ http ───▶ api     │
//!                 │   (env →       (ordered       (Axum     (auth, │
//!                 │    AppConfig)   startup/       server,  reports│
//!                 │                 shutdown)      /health) groups)│
//!                 │                     │                          │
//!                 │                     ▼                          │
//!                 │                    db (Postgres pool:          │
//!                 │                        probe / close)          │
//!                 └─────────────────────────────────────────────────┘
//! ```
//!
//! # Startup order
//!
//! Config → pool (lazy, no I/O) → router + route groups + CORS →
//! connectivity probe → bind → signal handlers → serve. Every step gates
//! the next; any failure is fatal and the process exits non-zero without
//! ever listening.
//!
//! # Shutdown order
//!
//! First SIGTERM/SIGINT → stop accepting → drain in-flight requests
//! (bounded deadline) → close the pool → exit 0. Later signals are no-ops.

pub mod api;
pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;

pub use config::AppConfig;
pub use db::Database;
pub use http::AppState;
pub use lifecycle::{Lifecycle, ShutdownController, StartupError};
