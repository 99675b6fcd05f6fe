//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → lazy pool → router + route groups → probe → bind → serve
//!
//! Shutdown (shutdown.rs):
//!     Running → Draining → Closed
//!     Trigger outside Running is a no-op
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → ShutdownController::trigger
//! ```
//!
//! # Design Decisions
//! - Ordered startup: each step gates the next; any failure is fatal and
//!   the process never binds a socket after a failed step
//! - Shutdown is a state machine, not a boolean flag; it runs at most
//!   once per process regardless of how many signals arrive
//! - Drain has a deadline: forced close after `SHUTDOWN_TIMEOUT_SECS`
//! - The lifecycle object is owned by `main` and passed explicitly; no
//!   ambient globals

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Phase, ShutdownController};
pub use startup::{Lifecycle, StartupError};
