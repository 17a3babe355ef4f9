use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

#[cfg(unix)]
use signal::unix::{signal, SignalKind};

/// What ended the producer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM, sent by container runtimes
    Terminate,
    /// SIGINT, Ctrl+C
    Interrupt,
    /// SIGQUIT
    Quit,
    /// Requested by the producer itself after a fatal scan error
    Internal,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Quit => write!(f, "SIGQUIT"),
            ShutdownSignal::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Waits for an OS signal or an internal shutdown request, then drives the graceful shutdown
pub struct SignalHandler {
    shutdown_signal: Option<ShutdownSignal>,
    internal_shutdown_notify: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self { shutdown_signal: None, internal_shutdown_notify: Arc::new(Notify::new()) }
    }

    /// Handle the trigger loop uses to request a shutdown on a fatal error
    pub fn get_shutdown_trigger(&self) -> Arc<Notify> {
        self.internal_shutdown_notify.clone()
    }

    /// Wait for any shutdown signal and return which one was received
    pub async fn wait_for_shutdown(&mut self) -> Result<ShutdownSignal> {
        let signal = self.wait_for_signal().await?;
        self.shutdown_signal = Some(signal);
        info!(signal = %signal, "Received shutdown signal");
        Ok(signal)
    }

    pub fn shutdown_signal(&self) -> Option<ShutdownSignal> {
        self.shutdown_signal
    }

    #[cfg(unix)]
    async fn wait_for_signal(&self) -> Result<ShutdownSignal> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigquit = signal(SignalKind::quit())?;

        info!("Signal handler listening for SIGTERM, SIGINT, SIGQUIT and internal shutdown requests");

        let received = tokio::select! {
            _ = sigterm.recv() => ShutdownSignal::Terminate,
            _ = sigint.recv() => ShutdownSignal::Interrupt,
            _ = sigquit.recv() => {
                warn!("Force quit signal received");
                ShutdownSignal::Quit
            }
            _ = self.internal_shutdown_notify.notified() => {
                warn!("Internal shutdown requested after a fatal scan error");
                ShutdownSignal::Internal
            }
        };
        Ok(received)
    }

    #[cfg(not(unix))]
    async fn wait_for_signal(&self) -> Result<ShutdownSignal> {
        info!("Signal handler listening for Ctrl+C and internal shutdown requests");

        let received = tokio::select! {
            result = signal::ctrl_c() => {
                result?;
                ShutdownSignal::Interrupt
            }
            _ = self.internal_shutdown_notify.notified() => {
                warn!("Internal shutdown requested after a fatal scan error");
                ShutdownSignal::Internal
            }
        };
        Ok(received)
    }

    /// Run `shutdown_fn` bounded by `timeout`. A SIGQUIT that outlives the timeout exits the process.
    pub async fn handle_graceful_shutdown<F, Fut>(&self, shutdown_fn: F, timeout: Duration) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let signal = self.shutdown_signal.unwrap_or(ShutdownSignal::Interrupt);
        info!(signal = %signal, timeout_secs = timeout.as_secs(), "Starting graceful shutdown");

        match tokio::time::timeout(timeout, shutdown_fn()).await {
            Ok(Ok(())) => {
                info!("Graceful shutdown completed");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "Graceful shutdown failed");
                Err(e)
            }
            Err(_) => {
                error!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out");
                if signal == ShutdownSignal::Quit {
                    warn!("SIGQUIT received, forcing immediate exit");
                    std::process::exit(1);
                }
                Err(anyhow!("Shutdown timeout exceeded"))
            }
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}
