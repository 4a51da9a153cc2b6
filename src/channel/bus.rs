//! Shared broadcast channel.
//!
//! Every editor instance in the process (and the interceptor adapter) holds a
//! clone of the same [`BroadcastChannel`]. Each subscriber sees every message,
//! including the ones it posted itself, and filters for what concerns it.

use tokio::sync::broadcast;

use crate::channel::protocol::ChannelMessage;

/// Default number of buffered messages per subscriber.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Many-to-many message bus.
#[derive(Clone, Debug)]
pub struct BroadcastChannel {
    tx: broadcast::Sender<ChannelMessage>,
}

impl BroadcastChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Post a message to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it. Posting with no
    /// subscribers is not an error; the message is simply dropped.
    pub fn post(&self, message: ChannelMessage) -> usize {
        self.tx.send(message).unwrap_or(0)
    }

    /// Subscribe to all messages posted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelMessage> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new()
    }
}
