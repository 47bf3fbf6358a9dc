//! Shutdown Handling
//!
//! Lets the CLI host keep a watching store alive until SIGINT/SIGTERM.

use crate::Result;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Broadcasts a single shutdown notification to every subscriber
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { shutdown_tx }
    }

    /// Receiver that resolves once shutdown has been requested
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Request shutdown without waiting for an OS signal
    pub fn trigger(&self) {
        if self.shutdown_tx.send(()).is_err() {
            debug!("Shutdown requested with no listeners");
        }
    }

    /// Wait for SIGTERM, SIGINT or Ctrl+C, then notify subscribers
    pub async fn listen_for_signals(&self) -> Result<()> {
        info!("Waiting for shutdown signal");

        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;

            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                _ = sigint.recv() => info!("Received SIGINT, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await?;
            info!("Received Ctrl+C, shutting down");
        }

        self.trigger();
        Ok(())
    }
}
