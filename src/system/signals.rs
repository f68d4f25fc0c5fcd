use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal as unix_signal};

#[cfg(unix)]
pub async fn handle_stop_signals() -> Option<()> {
    let mut sigterm_stream = unix_signal(SignalKind::terminate()).ok()?;
    let mut sigint_stream = unix_signal(SignalKind::interrupt()).ok()?;
    tokio::select! {
        _ = sigterm_stream.recv() => {
            info!("SIGTERM received, stopping version fetcher");
        }
        _ = sigint_stream.recv() => {
            info!("SIGINT received, stopping version fetcher");
        }
    }
    Some(())
}

#[cfg(not(unix))]
pub async fn handle_stop_signals() -> Option<()> {
    tokio::signal::ctrl_c().await.ok()?;
    info!("Ctrl+C received, stopping version fetcher");
    Some(())
}
