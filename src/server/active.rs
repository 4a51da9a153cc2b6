//! Active server registry.
//!
//! Maps each editor instance to the server currently answering its content
//! requests. `start()` registers, `stop()` deregisters; nothing is replaced
//! implicitly.

use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::channel::protocol::InstanceId;
use crate::server::base::ServerError;
use crate::server::static_server::ServerState;

/// Shared instance → active server table.
#[derive(Clone, Default)]
pub struct ActiveServers {
    inner: Arc<DashMap<InstanceId, Arc<ServerState>>>,
}

impl ActiveServers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ActiveServers {
        static GLOBAL: OnceLock<ActiveServers> = OnceLock::new();
        GLOBAL.get_or_init(ActiveServers::new)
    }

    /// Make `state` the active server for its instance.
    ///
    /// Registering the same server twice is a no-op; registering a different
    /// server while one is active fails.
    pub fn register(&self, state: Arc<ServerState>) -> Result<(), ServerError> {
        match self.inner.entry(state.instance_id().clone()) {
            Entry::Occupied(current) if Arc::ptr_eq(current.get(), &state) => Ok(()),
            Entry::Occupied(current) => {
                tracing::warn!(instance_id = %current.key(), "Server already active for instance");
                Err(ServerError::InstanceAlreadyActive(current.key().clone()))
            }
            Entry::Vacant(slot) => {
                slot.insert(state);
                Ok(())
            }
        }
    }

    /// Remove `state` if it is the active server. Returns whether it was.
    pub fn deregister(&self, state: &Arc<ServerState>) -> bool {
        self.inner
            .remove_if(state.instance_id(), |_, current| Arc::ptr_eq(current, state))
            .is_some()
    }

    pub fn get(&self, instance_id: &InstanceId) -> Option<Arc<ServerState>> {
        self.inner.get(instance_id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ActiveServers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.inner.iter().map(|r| r.key().to_string()).collect();
        f.debug_struct("ActiveServers").field("instances", &ids).finish()
    }
}
