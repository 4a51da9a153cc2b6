//! Live document handles.

use serde::{Deserialize, Serialize};

use crate::channel::protocol::Headers;

/// What a live document serves in place of its file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseData {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

impl ResponseData {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            headers: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Switch for a document's live-editing instrumentation.
pub trait InstrumentationToggle {
    fn set_instrumentation_enabled(&self, enabled: bool);
}

/// An open, actively edited project file.
pub trait LiveDocument: Send + Sync + std::fmt::Debug {
    /// Native path of the file this document edits.
    fn path(&self) -> &str;

    /// Current content to serve, unsaved edits included.
    fn response_data(&self) -> ResponseData;

    /// Instrumentation switch, for documents that support one.
    fn instrumentation(&self) -> Option<&dyn InstrumentationToggle> {
        None
    }
}
