//! Channel subsystem.
//!
//! # Data Flow
//! ```text
//! Interceptor (other process)
//!     → stdio.rs pump_inbound (JSON line → ChannelMessage)
//!     → bus.rs BroadcastChannel (every instance's correlator sees it)
//!     → correlator posts REQUEST_RESPONSE on the same bus
//!     → stdio.rs outbound pump (ChannelMessage → JSON line)
//! ```
//!
//! # Design Decisions
//! - Broadcast semantics: no subscriber may assume it is the only listener
//! - Wire format is the interceptor's: `type`-tagged JSON objects
//! - Malformed inbound lines are logged and skipped, never fatal

pub mod bus;
pub mod protocol;
pub mod stdio;

pub use bus::BroadcastChannel;
pub use protocol::{
    ChannelError, ChannelMessage, ContentRequest, ContentResponse, Headers, InstanceId, RequestId,
};
