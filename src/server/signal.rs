// Signal handling module
//
// Resolves when the operator asks the server to stop:
// - SIGINT  (Ctrl+C)
// - SIGTERM (kill <pid>, Unix only)
//
// Handlers are installed when `shutdown_signal` is called, not when the
// returned future is first polled. Until then the default disposition
// applies and a Ctrl+C kills the process outright.

use std::future::Future;

use crate::logger::{self, LogWriter};

/// Install the Ctrl+C (and SIGTERM on Unix) handlers and return a future that
/// resolves on the first of them.
///
/// Must be called from within a tokio runtime. A handler that cannot be
/// registered is logged and skipped; if none can be, the future never
/// resolves.
#[cfg(unix)]
pub fn shutdown_signal(log: &LogWriter) -> impl Future<Output = ()> {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    fn register(log: &LogWriter, kind: SignalKind, name: &str) -> Option<Signal> {
        signal(kind)
            .map_err(|e| logger::log_error(log, &format!("Failed to register {name} handler: {e}")))
            .ok()
    }

    async fn recv(signal: Option<Signal>) {
        match signal {
            Some(mut signal) => {
                signal.recv().await;
            }
            None => std::future::pending().await,
        }
    }

    let interrupt = register(log, SignalKind::interrupt(), "SIGINT");
    let terminate = register(log, SignalKind::terminate(), "SIGTERM");

    async move {
        tokio::select! {
            () = recv(interrupt) => {}
            () = recv(terminate) => {}
        }
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn shutdown_signal(log: &LogWriter) -> impl Future<Output = ()> {
    let ctrl_c = tokio::signal::windows::ctrl_c()
        .map_err(|e| logger::log_error(log, &format!("Failed to listen for Ctrl+C: {e}")))
        .ok();

    async move {
        match ctrl_c {
            Some(mut ctrl_c) => {
                ctrl_c.recv().await;
            }
            None => std::future::pending().await,
        }
    }
}
