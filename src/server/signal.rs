// Signal handling.
// SIGTERM and SIGINT stop the accept loop so the process exits with code 0.
// In-flight connections are dropped on exit, matching the reference
// behavior of a development server.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::logger;

#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            logger::log_error("Failed to register SIGTERM handler");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            logger::log_error("Failed to register SIGINT handler");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => logger::log_shutdown("SIGTERM"),
            _ = sigint.recv() => logger::log_shutdown("SIGINT"),
        }
        shutdown.notify_waiters();
    });
}

/// Windows fallback: only Ctrl-C is supported.
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::log_shutdown("Ctrl-C");
            shutdown.notify_waiters();
        }
    });
}
