//! Document source subsystem.
//!
//! # Data Flow
//! ```text
//! Request Correlator / Markdown pipeline
//!     → DocumentSource::document_text(native path)
//!         → memory.rs (open documents, including unsaved edits)
//!         → fs.rs (file contents on disk)
//!     → Ok(text) | Err(DocumentError)
//! ```
//!
//! # Design Decisions
//! - The editor's document model is external; this crate only reads text
//! - Lookups are async and may complete in any order
//! - A miss is an error value, never a panic

pub mod fs;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsDocumentSource;
pub use memory::MemoryDocumentSource;

/// Errors returned by a [`DocumentSource`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document outside project: {0}")]
    OutsideProject(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Key-value source of current document text, keyed by native path.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn document_text(&self, path: &str) -> Result<String, DocumentError>;
}
