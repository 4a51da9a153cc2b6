//! Live preview server interface.

use std::sync::Arc;

use thiserror::Error;

use crate::channel::protocol::InstanceId;
use crate::overlay::LiveDocument;

/// Errors raised by server lifecycle operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("another server is already active for instance {0}")]
    InstanceAlreadyActive(InstanceId),
}

/// Capabilities every live preview server offers the editor.
///
/// Path arguments are native paths with `/` separators.
pub trait LiveServer: Send + Sync {
    /// URL prefix all served URLs share. Already encoded.
    fn base_url(&self) -> &str;

    /// URL for a path inside the project, `None` outside it.
    fn path_to_url(&self, path: &str) -> Option<String>;

    /// Native path for a URL under [`base_url`](Self::base_url).
    fn url_to_path(&self, url: &str) -> Option<String>;

    /// Whether this server may serve the path.
    fn can_serve(&self, path: &str) -> bool;

    /// Register an open document whose edits should be served live.
    fn add(&self, document: Arc<dyn LiveDocument>);

    /// Stop serving a previously added document.
    fn remove(&self, document: &dyn LiveDocument);

    /// Live document registered for the path, if any.
    fn get(&self, path: &str) -> Option<Arc<dyn LiveDocument>>;

    /// Serve `text` at `path`, whether or not a file exists there.
    fn add_virtual_content_at_path(&self, path: &str, text: String);

    /// Undo [`add_virtual_content_at_path`](Self::add_virtual_content_at_path).
    fn remove_virtual_content_at_path(&self, path: &str);

    /// Drop every live and virtual document.
    fn clear(&self);

    /// Begin answering content requests for this server's instance.
    fn start(&self) -> Result<(), ServerError>;

    /// Stop answering content requests. A no-op when not active.
    fn stop(&self);

    /// Whether this server is the active one for its instance.
    fn is_active(&self) -> bool;
}
