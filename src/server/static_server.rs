//! Static live preview server.
//!
//! # Responsibilities
//! - Translate between project paths and instance URLs
//! - Own the document overlay store
//! - Push a fresh instrumented-path snapshot after every overlay mutation
//! - Register / deregister itself as the active server for its instance
//!
//! # Design Decisions
//! - Mutations are synchronous and hold the store lock while the snapshot is
//!   queued, so snapshots leave in mutation order
//! - Resolution reads the store and never mutates it; live documents are
//!   read after the lock is released

use std::sync::{Arc, Mutex, MutexGuard};

use crate::channel::protocol::InstanceId;
use crate::config::ServerConfig;
use crate::instrumentation::{InstrumentationRegistry, InstrumentedUrls, RegistrySync};
use crate::overlay::{LiveDocument, Overlay, OverlayEntry, OverlayStore};
use crate::routing::{PathResolver, PathTranslator, ProjectRootResolver};
use crate::server::active::ActiveServers;
use crate::server::base::{LiveServer, ServerError};

/// State shared between a [`StaticServer`] and the request correlator.
#[derive(Debug)]
pub struct ServerState {
    instance_id: InstanceId,
    root: String,
    translator: PathTranslator,
    overlays: Mutex<OverlayStore>,
    sync: RegistrySync,
}

impl ServerState {
    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn translator(&self) -> &PathTranslator {
        &self.translator
    }

    /// Overlay content for a native (or already relative) path, by precedence.
    pub fn resolve(&self, path: &str) -> Option<Overlay> {
        let key = self.translator.document_key(path);
        // Release the lock before reading: live documents may call back in.
        let entry = self.store().lookup(&key);
        entry.map(OverlayEntry::into_overlay)
    }

    /// Current union of overlay keys.
    pub fn instrumented_paths(&self) -> Vec<String> {
        self.store().paths()
    }

    fn store(&self) -> MutexGuard<'_, OverlayStore> {
        // The store holds plain maps; a panic mid-mutation leaves it usable.
        self.overlays.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mutate<F>(&self, op: &'static str, f: F)
    where
        F: FnOnce(&mut OverlayStore),
    {
        let mut store = self.store();
        f(&mut store);
        let paths = store.paths();
        tracing::debug!(
            instance_id = %self.instance_id,
            op,
            paths = paths.len(),
            "Overlay store updated"
        );
        self.sync.push(InstrumentedUrls {
            root: self.root.clone(),
            paths,
        });
    }
}

/// Live preview server backed by in-memory overlays and an external interceptor.
pub struct StaticServer {
    state: Arc<ServerState>,
    active: ActiveServers,
}

impl StaticServer {
    /// Create a server for the project in `config`, anchored at its root.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(
        config: &ServerConfig,
        instance_id: InstanceId,
        registry: Arc<dyn InstrumentationRegistry>,
        active: ActiveServers,
    ) -> Self {
        let resolver = Arc::new(ProjectRootResolver::new(config.normalized_root()));
        Self::with_resolver(config, instance_id, resolver, registry, active)
    }

    /// Create a server using a caller-supplied project path resolver.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn with_resolver(
        config: &ServerConfig,
        instance_id: InstanceId,
        resolver: Arc<dyn PathResolver>,
        registry: Arc<dyn InstrumentationRegistry>,
        active: ActiveServers,
    ) -> Self {
        let base_url = format!("{}live_preview_{}", config.server_url, instance_id);
        let translator =
            PathTranslator::new(base_url, resolver, &config.static_html_extensions);

        tracing::info!(
            instance_id = %instance_id,
            root = %config.normalized_root(),
            base_url = %translator.base_url(),
            "Static server created"
        );

        let state = ServerState {
            instance_id,
            root: config.normalized_root(),
            translator,
            overlays: Mutex::new(OverlayStore::new()),
            sync: RegistrySync::spawn(registry),
        };

        Self {
            state: Arc::new(state),
            active,
        }
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    pub fn instance_id(&self) -> &InstanceId {
        self.state.instance_id()
    }

    /// Overlay content that would answer a request for `path`.
    pub fn resolve(&self, path: &str) -> Option<Overlay> {
        self.state.resolve(path)
    }
}

impl LiveServer for StaticServer {
    fn base_url(&self) -> &str {
        self.state.translator.base_url()
    }

    fn path_to_url(&self, path: &str) -> Option<String> {
        self.state.translator.path_to_url(path)
    }

    fn url_to_path(&self, url: &str) -> Option<String> {
        self.state.translator.url_to_path(url)
    }

    fn can_serve(&self, path: &str) -> bool {
        self.state.translator.can_serve(path)
    }

    fn add(&self, document: Arc<dyn LiveDocument>) {
        if let Some(toggle) = document.instrumentation() {
            toggle.set_instrumentation_enabled(true);
        }
        let key = self.state.translator.document_key(document.path());
        self.state.mutate("add", |store| {
            store.insert_live(key, document);
        });
    }

    fn remove(&self, document: &dyn LiveDocument) {
        let key = self.state.translator.document_key(document.path());
        self.state.mutate("remove", |store| {
            store.remove_live(&key);
        });
    }

    fn get(&self, path: &str) -> Option<Arc<dyn LiveDocument>> {
        let key = self.state.translator.document_key(path);
        self.state.store().live(&key)
    }

    fn add_virtual_content_at_path(&self, path: &str, text: String) {
        let key = self.state.translator.document_key(path);
        self.state.mutate("add_virtual", |store| {
            store.insert_virtual(key, text);
        });
    }

    fn remove_virtual_content_at_path(&self, path: &str) {
        let key = self.state.translator.document_key(path);
        self.state.mutate("remove_virtual", |store| {
            store.remove_virtual(&key);
        });
    }

    fn clear(&self) {
        self.state.mutate("clear", OverlayStore::clear);
    }

    fn start(&self) -> Result<(), ServerError> {
        self.active.register(self.state.clone())?;
        tracing::info!(instance_id = %self.state.instance_id, "Static server started");
        Ok(())
    }

    fn stop(&self) {
        if self.active.deregister(&self.state) {
            tracing::info!(instance_id = %self.state.instance_id, "Static server stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.active
            .get(&self.state.instance_id)
            .map(|current| Arc::ptr_eq(&current, &self.state))
            .unwrap_or(false)
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        self.active.deregister(&self.state);
    }
}
