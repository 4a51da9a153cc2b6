//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr log stream
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Request ID and instance ID appear as fields on every request log line
//! - Metrics are cheap (facade counters)

pub mod logging;
pub mod metrics;
