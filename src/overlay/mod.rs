//! Document overlay subsystem.
//!
//! # Data Flow
//! ```text
//! Editor opens / edits / injects a document
//!     → StaticServer::{add, remove, add_virtual_content_at_path, ...}
//!     → store.rs (mutate live / virtual maps)
//!     → instrumentation registry sync (full snapshot of keys)
//!
//! Content request for a key
//!     → store.rs resolve: virtual → live → None
//! ```
//!
//! # Design Decisions
//! - Overlays are in-memory only; nothing here touches disk
//! - Virtual content is an explicit override and always wins

pub mod document;
pub mod store;

pub use document::{InstrumentationToggle, LiveDocument, ResponseData};
pub use store::{Overlay, OverlayEntry, OverlayStore};
