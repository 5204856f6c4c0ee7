// Signal handling module
//
// Supported signals:
// - SIGINT:  Stop the server (Ctrl+C)
// - SIGTERM: Stop the server

use crate::logger;

/// Resolve when the operator asks the server to stop (Unix)
///
/// If a handler cannot be registered the failure is logged and that signal
/// is simply never observed; the other one still works.
#[cfg(unix)]
#[allow(clippy::ignored_unit_patterns)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => Some(s),
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGINT handler: {e}"));
            None
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            None
        }
    };

    tokio::select! {
        _ = recv_or_pending(sigint.as_mut()) => logger::log_shutdown("SIGINT received (Ctrl+C)"),
        _ = recv_or_pending(sigterm.as_mut()) => logger::log_shutdown("SIGTERM received"),
    }
}

#[cfg(unix)]
async fn recv_or_pending(signal: Option<&mut tokio::signal::unix::Signal>) {
    match signal {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_shutdown("Ctrl+C received"),
        Err(e) => {
            logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
