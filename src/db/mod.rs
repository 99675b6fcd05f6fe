//! Database subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → pool.rs (lazy PgPool, no I/O at construction)
//!     → startup probe (SELECT 1 round trip)
//!     → request handlers (shared pool via AppState)
//!     → shutdown (close_pool releases every connection)
//! ```
//!
//! # Design Decisions
//! - Pool construction is lazy, so it cannot fail; reachability is
//!   established only by the explicit startup probe
//! - The lifecycle coordinator consumes exactly two operations:
//!   `test_connection` at boot and `close_pool` at teardown
//! - Schema and queries live with the route groups that own them

pub mod pool;

pub use pool::Database;
