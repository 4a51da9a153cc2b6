//! Disk-backed document source.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::documents::{DocumentError, DocumentSource};

/// Reads document text straight from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentSource {
    root: Option<PathBuf>,
}

impl FsDocumentSource {
    /// Source that reads any path.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Source that only reads paths under `root`.
    pub fn scoped(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn permits(&self, path: &str) -> bool {
        let Some(root) = &self.root else {
            return true;
        };
        let path = Path::new(path);
        path.starts_with(root) && !path.components().any(|c| c == Component::ParentDir)
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn document_text(&self, path: &str) -> Result<String, DocumentError> {
        if !self.permits(path) {
            return Err(DocumentError::OutsideProject(path.to_string()));
        }
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DocumentError::NotFound(path.to_string()))
            }
            Err(source) => Err(DocumentError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}
