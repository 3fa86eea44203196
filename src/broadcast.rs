//! Broadcaster abstraction for pushing messages to connected clients
//!
//! Backed by an in-memory tokio broadcast channel. The trait keeps the game
//! glue independent of the transport.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::ServerMessage;

/// Receiver type for broadcast messages
pub type BroadcastReceiver = broadcast::Receiver<Arc<ServerMessage>>;

/// Trait for broadcasting messages to all connected clients
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Subscribe to receive broadcast messages
    fn subscribe(&self) -> BroadcastReceiver;

    /// Send a message to all subscribers
    async fn send(&self, msg: ServerMessage);

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}

/// In-memory broadcaster using tokio broadcast channel
pub struct InMemoryBroadcaster {
    tx: broadcast::Sender<Arc<ServerMessage>>,
}

impl InMemoryBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    fn subscribe(&self) -> BroadcastReceiver {
        self.tx.subscribe()
    }

    async fn send(&self, msg: ServerMessage) {
        // send() errors when there are no receivers, which is fine: the
        // game keeps running with no spectators
        if let Err(e) = self.tx.send(Arc::new(msg)) {
            debug!("Broadcast send (no receivers): {}", e);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
