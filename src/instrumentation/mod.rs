//! Instrumentation registry sync subsystem.
//!
//! # Data Flow
//! ```text
//! Overlay mutation (add / remove / virtual / clear)
//!     → union of live + virtual keys
//!     → sync.rs (queue snapshot, return immediately)
//!     → worker → registry.rs InstrumentationRegistry::set_instrumented_urls
//!     → log acknowledgement or failure
//! ```
//!
//! # Design Decisions
//! - Uses the interceptor's administrative API, never the broadcast channel
//! - Best-effort notification; callers never depend on completion

pub mod registry;
pub mod sync;

pub use registry::{InstrumentationRegistry, InstrumentedUrls, SyncError};
pub use sync::RegistrySync;
