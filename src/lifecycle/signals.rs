//! OS signal handling.
//!
//! Translates SIGTERM and SIGINT into shutdown triggers. The listener
//! keeps running after the first signal so repeated deliveries are
//! observed and logged, but the controller's state machine makes them
//! no-ops; signal delivery itself is never disabled.

use crate::lifecycle::ShutdownController;

/// Install the signal listener as a background task.
///
/// Installation failure is logged and leaves the process running without
/// signal-driven shutdown; the orchestrator can still stop it by other
/// means.
pub fn spawn_listener(shutdown: ShutdownController) {
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut sigterm = {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to install SIGTERM handler");
                    return;
                }
            }
        };

        loop {
            #[cfg(unix)]
            let source = tokio::select! {
                _ = tokio::signal::ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            };

            #[cfg(not(unix))]
            let source = match tokio::signal::ctrl_c().await {
                Ok(()) => "SIGINT",
                Err(err) => {
                    tracing::error!(error = %err, "Failed to wait for Ctrl+C");
                    return;
                }
            };

            if shutdown.trigger() {
                tracing::info!(signal = source, "Shutdown signal received, draining");
            } else {
                tracing::debug!(signal = source, "Shutdown already in progress, ignoring signal");
            }
        }
    });
}
