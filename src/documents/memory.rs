//! In-memory document source for open documents.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::documents::{DocumentError, DocumentSource};

/// Holds the text of open documents, unsaved edits included.
///
/// Paths that are not open fall through to an optional backing source
/// (typically [`FsDocumentSource`](crate::documents::FsDocumentSource)).
#[derive(Clone, Default)]
pub struct MemoryDocumentSource {
    open: Arc<RwLock<HashMap<String, String>>>,
    fallback: Option<Arc<dyn DocumentSource>>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: Arc<dyn DocumentSource>) -> Self {
        Self {
            open: Arc::default(),
            fallback: Some(fallback),
        }
    }

    /// Record the current text of an open document.
    pub fn set_text(&self, path: impl Into<String>, text: impl Into<String>) {
        let mut open = self.open.write().unwrap_or_else(|e| e.into_inner());
        open.insert(path.into(), text.into());
    }

    /// Forget an open document; later reads go to the fallback.
    pub fn close(&self, path: &str) -> bool {
        let mut open = self.open.write().unwrap_or_else(|e| e.into_inner());
        open.remove(path).is_some()
    }

    fn lookup(&self, path: &str) -> Option<String> {
        let open = self.open.read().unwrap_or_else(|e| e.into_inner());
        open.get(path).cloned()
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn document_text(&self, path: &str) -> Result<String, DocumentError> {
        if let Some(text) = self.lookup(path) {
            return Ok(text);
        }
        match &self.fallback {
            Some(fallback) => fallback.document_text(path).await,
            None => Err(DocumentError::NotFound(path.to_string())),
        }
    }
}
