//! Best-effort event publication after committed mutations.
//!
//! Mutation handlers call `publish` once their unit of work has
//! committed. Delivery is advisory: a client that misses an event
//! reconciles when it next loads the board, so nothing here is allowed
//! to fail the mutation that already happened.

use tracing::warn;

use crate::domain::board::BoardEvent;

use super::hub::Hub;

/// Publishes board events to the hub without surfacing failures.
#[derive(Clone)]
pub struct EventBroadcaster {
    hub: Hub,
}

impl EventBroadcaster {
    /// Creates a broadcaster over a running hub.
    pub fn new(hub: Hub) -> Self {
        Self { hub }
    }

    /// Hands an event to the hub for fan-out.
    ///
    /// Never fails from the caller's perspective. A stopped hub is
    /// logged and the event is dropped; the mutation it describes has
    /// already committed.
    pub fn publish(&self, event: BoardEvent) {
        let kind = event.kind();
        if self.hub.submit(event).is_err() {
            warn!(kind = %kind, "Hub is not running, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BoardId, ListId};

    #[tokio::test]
    async fn publish_succeeds_with_a_live_hub() {
        let hub = Hub::spawn();
        let broadcaster = EventBroadcaster::new(hub.clone());
        let board_id = BoardId::new();

        broadcaster.publish(BoardEvent::list_created(board_id, ListId::new(), None));

        // The hub processed the submit; no connections were registered
        // so it had nowhere to deliver, which is fine.
        assert_eq!(hub.connection_count(board_id).await.unwrap(), 0);
    }
}
