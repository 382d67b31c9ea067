//! Graceful shutdown signal handling

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;

#[derive(Debug, Error)]
pub(crate) enum SignalHandlerError {
    #[error("failed to install interrupt handler: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Block until an interrupt or terminate signal arrives, then ask the
/// server to drain in-flight requests and stop.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), SignalHandlerError> {
    let signal = wait_for_signal().await?;

    tracing::info!("{signal} received, draining connections");
    handle.stop_graceful(None);

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, SignalHandlerError> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(SignalHandlerError::Terminate)?;

    tokio::select! {
        result = signal::ctrl_c() => result
            .map(|()| "SIGINT")
            .map_err(SignalHandlerError::Interrupt),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, SignalHandlerError> {
    signal::ctrl_c()
        .await
        .map(|()| "Ctrl+C")
        .map_err(SignalHandlerError::Interrupt)
}
