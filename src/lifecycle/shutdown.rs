//! Shutdown coordination for bridge tasks.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Coordinator for graceful shutdown.
///
/// Long-running tasks (the request correlator, the stdio pumps) hold a
/// [`ShutdownListener`] and exit once [`Shutdown::trigger`] is called. A
/// listener created after the trigger observes it immediately.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Signal every listener. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`Shutdown`].
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Resolves once shutdown has been triggered or the coordinator is gone.
    pub async fn wait(&mut self) {
        // Err means every Shutdown handle was dropped; treat as shutdown.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

/// Wait for Ctrl+C, then trigger `shutdown`.
pub async fn trigger_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
    }
    shutdown.trigger();
}

/// Await a task during shutdown. A panic or cancellation is logged and
/// yields `None`.
pub async fn join_logged<T>(task: &'static str, handle: JoinHandle<T>) -> Option<T> {
    match handle.await {
        Ok(output) => Some(output),
        Err(e) => {
            tracing::error!(task, error = %e, "Task failed before shutdown");
            None
        }
    }
}
