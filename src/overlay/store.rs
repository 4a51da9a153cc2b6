//! Document overlay storage.
//!
//! # Responsibilities
//! - Hold live documents and virtual documents keyed by document key
//! - Resolve a key by precedence: virtual, then live
//! - Report the union of overlay keys for registry sync
//!
//! # Design Decisions
//! - A key may be present in both maps; the virtual entry wins
//! - Pure data structure: no locking, no notification (the server does both)
//! - Ordered maps so snapshots are deterministic

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::overlay::document::{LiveDocument, ResponseData};

/// Content an overlay supplies for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Ad hoc content registered for the path.
    Virtual(String),
    /// Response data of the live document open at the path.
    Live(ResponseData),
}

impl Overlay {
    /// Label used in logs and metrics.
    pub fn source(&self) -> &'static str {
        match self {
            Overlay::Virtual(_) => "virtual",
            Overlay::Live(_) => "live",
        }
    }
}

/// What a key resolves to, before any live document is read.
#[derive(Debug, Clone)]
pub enum OverlayEntry {
    Virtual(String),
    Live(Arc<dyn LiveDocument>),
}

impl OverlayEntry {
    /// Read the entry's content. Calls into the live document, so callers
    /// must not hold the store's lock.
    pub fn into_overlay(self) -> Overlay {
        match self {
            OverlayEntry::Virtual(text) => Overlay::Virtual(text),
            OverlayEntry::Live(document) => Overlay::Live(document.response_data()),
        }
    }
}

/// Live and virtual documents that shadow files on disk.
#[derive(Debug, Default)]
pub struct OverlayStore {
    live: BTreeMap<String, Arc<dyn LiveDocument>>,
    virtuals: BTreeMap<String, String>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_live(
        &mut self,
        key: String,
        document: Arc<dyn LiveDocument>,
    ) -> Option<Arc<dyn LiveDocument>> {
        self.live.insert(key, document)
    }

    pub fn remove_live(&mut self, key: &str) -> Option<Arc<dyn LiveDocument>> {
        self.live.remove(key)
    }

    pub fn live(&self, key: &str) -> Option<Arc<dyn LiveDocument>> {
        self.live.get(key).cloned()
    }

    pub fn insert_virtual(&mut self, key: String, text: String) -> Option<String> {
        self.virtuals.insert(key, text)
    }

    pub fn remove_virtual(&mut self, key: &str) -> Option<String> {
        self.virtuals.remove(key)
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.virtuals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.virtuals.is_empty()
    }

    /// Entry for a key by precedence. Virtual content shadows a live document.
    pub fn lookup(&self, key: &str) -> Option<OverlayEntry> {
        if let Some(text) = self.virtuals.get(key) {
            return Some(OverlayEntry::Virtual(text.clone()));
        }
        self.live.get(key).cloned().map(OverlayEntry::Live)
    }

    /// Resolve a key by precedence and read its content.
    pub fn resolve(&self, key: &str) -> Option<Overlay> {
        self.lookup(key).map(OverlayEntry::into_overlay)
    }

    /// Union of live and virtual keys, each listed once.
    pub fn paths(&self) -> Vec<String> {
        self.live
            .keys()
            .chain(self.virtuals.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
