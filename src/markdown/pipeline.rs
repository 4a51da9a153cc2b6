//! Markdown render pipeline.

use std::sync::Arc;

use crate::documents::{DocumentError, DocumentSource};
use crate::markdown::render::render_markdown;
use crate::markdown::template::MarkdownPage;
use crate::overlay::ResponseData;

/// Fetches a document's current text and renders it as a full HTML page.
#[derive(Clone)]
pub struct MarkdownPipeline {
    documents: Arc<dyn DocumentSource>,
    page: MarkdownPage,
}

impl MarkdownPipeline {
    pub fn new(documents: Arc<dyn DocumentSource>, page: MarkdownPage) -> Self {
        Self { documents, page }
    }

    /// Render the document at `path`. Overlays are never consulted.
    pub async fn render(&self, path: &str) -> Result<ResponseData, DocumentError> {
        let text = self.documents.document_text(path).await?;
        let body = self.page.render(&render_markdown(&text));
        Ok(ResponseData::new(body).with_header("Content-Type", "text/html"))
    }
}
