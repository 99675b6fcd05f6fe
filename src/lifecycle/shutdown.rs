//! Shutdown coordination.
//!
//! A small state machine replaces the usual "shutting down" boolean:
//! `Running → Draining → Closed`, with transitions driven by
//! `ShutdownController::trigger`. Only the transition out of `Running`
//! has any effect, which makes teardown idempotent no matter how many
//! termination signals (or internal fatal triggers) arrive.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

const RUNNING: u8 = 0;
const DRAINING: u8 = 1;
const CLOSED: u8 = 2;

/// Lifecycle phase of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting and serving requests.
    Running,
    /// No longer accepting; in-flight requests finishing.
    Draining,
    /// All resources released. Terminal.
    Closed,
}

/// Coordinator for graceful shutdown.
///
/// Cloning is cheap; all clones observe and drive the same state. Any
/// component holding a clone can trigger teardown (signal listener,
/// fatal internal error), but only the first trigger wins.
#[derive(Clone)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

struct Inner {
    phase: AtomicU8,
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(Inner {
                phase: AtomicU8::new(RUNNING),
                tx,
            }),
        }
    }

    /// Request shutdown. Returns whether this call won the
    /// `Running → Draining` transition; callers seeing `false` must
    /// treat the trigger as a no-op.
    pub fn trigger(&self) -> bool {
        let won = self
            .inner
            .phase
            .compare_exchange(RUNNING, DRAINING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if won {
            // Receivers subscribed before this send see the message;
            // anyone subscribing later observes the phase directly.
            let _ = self.inner.tx.send(());
        }

        won
    }

    /// Resolve once the controller has left `Running`.
    ///
    /// Safe to call at any point: if the drain already started (or
    /// finished) this returns immediately.
    pub async fn draining(&self) {
        // Subscribe before checking the phase so a trigger between the
        // check and the await cannot be missed.
        let mut rx = self.inner.tx.subscribe();
        if self.phase() != Phase::Running {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Record that drain and resource release finished. Terminal.
    pub fn mark_closed(&self) {
        self.inner.phase.store(CLOSED, Ordering::Release);
    }

    pub fn phase(&self) -> Phase {
        match self.inner.phase.load(Ordering::Acquire) {
            RUNNING => Phase::Running,
            DRAINING => Phase::Draining,
            _ => Phase::Closed,
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
