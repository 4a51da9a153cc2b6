//! Live preview bridge library.
//!
//! Serves editor-side content (unsaved buffers, virtual overlays, rendered
//! Markdown) to a network interceptor over a shared message channel.

pub mod channel;
pub mod config;
pub mod documents;
pub mod instrumentation;
pub mod lifecycle;
pub mod markdown;
pub mod observability;
pub mod overlay;
pub mod routing;
pub mod server;

pub use channel::BroadcastChannel;
pub use config::BridgeConfig;
pub use lifecycle::Shutdown;
pub use server::{LiveServer, RequestCorrelator, StaticServer};
