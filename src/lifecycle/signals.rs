//! OS signal handling.
//!
//! SIGTERM and SIGINT both mean "stop". Uses Tokio's async-safe signal
//! streams.

use std::io;

/// Resolves once the process is asked to shut down.
#[cfg(unix)]
pub async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

/// Resolves once the process is asked to shut down.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
