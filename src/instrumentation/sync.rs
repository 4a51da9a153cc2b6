//! Registry sync worker.
//!
//! # Responsibilities
//! - Accept path snapshots from overlay mutations without blocking
//! - Deliver them to the interceptor one at a time, in mutation order
//! - Log the acknowledgement or the failure
//!
//! # Design Decisions
//! - At-most-once delivery, no retry: each snapshot is a complete
//!   replacement, so the next mutation repairs a failed push
//! - One worker per server keeps pushes ordered; a late stale snapshot can
//!   never overwrite a newer one

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::instrumentation::registry::{InstrumentationRegistry, InstrumentedUrls};
use crate::observability::metrics;

/// Handle used to queue registry updates.
#[derive(Clone, Debug)]
pub struct RegistrySync {
    tx: mpsc::UnboundedSender<InstrumentedUrls>,
}

impl RegistrySync {
    /// Start the delivery worker.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn spawn(registry: Arc<dyn InstrumentationRegistry>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(deliver(registry, rx));
        Self { tx }
    }

    /// Queue a snapshot. Never waits for delivery.
    pub fn push(&self, update: InstrumentedUrls) {
        tracing::debug!(
            root = %update.root,
            paths = ?update.paths,
            "Queueing instrumented URL update"
        );
        if self.tx.send(update).is_err() {
            tracing::warn!("Registry sync worker stopped, update dropped");
        }
    }
}

async fn deliver(
    registry: Arc<dyn InstrumentationRegistry>,
    mut rx: mpsc::UnboundedReceiver<InstrumentedUrls>,
) {
    while let Some(update) = rx.recv().await {
        let root = update.root.clone();
        let count = update.paths.len();

        match registry.set_instrumented_urls(update).await {
            Ok(status) => {
                tracing::debug!(root = %root, paths = count, status = %status, "setInstrumentedURLs acknowledged");
                metrics::record_registry_sync(true);
            }
            Err(e) => {
                tracing::error!(root = %root, paths = count, error = %e, "setInstrumentedURLs failed");
                metrics::record_registry_sync(false);
            }
        }
    }
    tracing::debug!("Registry sync worker exiting");
}
