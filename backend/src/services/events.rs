//! Transfer completion broadcast
//!
//! Fire-and-forget fan-out consumed by dashboard views to trigger their own
//! re-fetch of inventory after stock has moved.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default buffer capacity for the broadcast channel
const DEFAULT_CAPACITY: usize = 256;

/// Emitted once per successful quick or batch transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferCompleted {
    pub store_id: Uuid,
    /// How many queue items the run committed
    pub items_transferred: usize,
    pub completed_at: DateTime<Utc>,
}

impl TransferCompleted {
    pub fn new(store_id: Uuid, items_transferred: usize) -> Self {
        Self {
            store_id,
            items_transferred,
            completed_at: Utc::now(),
        }
    }
}

/// In-process fan-out for transfer completions
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently observe every completion.
#[derive(Clone)]
pub struct TransferEvents {
    sender: broadcast::Sender<TransferCompleted>,
}

impl TransferEvents {
    /// Create a bus with a specific channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a completion to all current subscribers
    ///
    /// With zero receivers the event is silently dropped; completion is a
    /// broadcast, not a request/response.
    pub fn publish(&self, event: TransferCompleted) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all completions published on this bus
    pub fn subscribe(&self) -> broadcast::Receiver<TransferCompleted> {
        self.sender.subscribe()
    }
}

impl Default for TransferEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let events = TransferEvents::default();
        let mut rx = events.subscribe();

        let store_id = Uuid::new_v4();
        events.publish(TransferCompleted::new(store_id, 3));

        let received = rx.recv().await.expect("should receive the completion");
        assert_eq!(received.store_id, store_id);
        assert_eq!(received.items_transferred, 3);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let events = TransferEvents::default();
        events.publish(TransferCompleted::new(Uuid::new_v4(), 1));
    }
}
