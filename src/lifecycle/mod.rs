//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging → Create server → start() → Spawn correlator + transport
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or stdin EOF → trigger → correlator and pumps exit → stop()
//! ```
//!
//! # Design Decisions
//! - Ordered startup: the correlator subscribes before the transport feeds it
//! - No request draining: unanswered requests time out on the interceptor side

pub mod shutdown;

pub use shutdown::{Shutdown, ShutdownListener};
