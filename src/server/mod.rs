//! Live preview server subsystem.
//!
//! # Data Flow
//! ```text
//! Interceptor sees a request for an instrumented path
//!     → channel: getInstrumentedContent { path, requestID, requesterInstanceID }
//!     → correlator.rs (instance filter, dispatch)
//!         → *.md: markdown pipeline (document text → page)
//!         → otherwise: active.rs (active server for instance)
//!             → static_server.rs resolve: virtual → live → document text
//!     → channel: REQUEST_RESPONSE { requestID, path, contents, headers? }
//!
//! Editor mutates overlays
//!     → static_server.rs (add / remove / virtual / clear)
//!     → instrumentation registry sync
//! ```
//!
//! # Design Decisions
//! - One correlator per instance consumes the channel; each request yields
//!   at most one reply
//! - The request ID round-trip is the only correlation mechanism
//! - No timeouts or retries on this side

pub mod active;
pub mod base;
pub mod correlator;
pub mod static_server;

pub use active::ActiveServers;
pub use base::{LiveServer, ServerError};
pub use correlator::{RequestCorrelator, NOT_FOUND_BODY};
pub use static_server::{ServerState, StaticServer};
