//! Interceptor administrative API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full replacement of the interceptor's routing table for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentedUrls {
    /// Project root the paths are relative to.
    pub root: String,
    /// Every overlay-backed document key.
    pub paths: Vec<String>,
}

/// Errors reported by an [`InstrumentationRegistry`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("interceptor rejected instrumented URLs: {0}")]
    Rejected(String),

    #[error("interceptor unavailable: {0}")]
    Unavailable(String),
}

/// Where the interceptor learns which paths must be redirected to the bridge.
#[async_trait]
pub trait InstrumentationRegistry: Send + Sync {
    /// Replace the instrumented path set. Returns the interceptor's acknowledgement.
    async fn set_instrumented_urls(&self, update: InstrumentedUrls) -> Result<String, SyncError>;
}
