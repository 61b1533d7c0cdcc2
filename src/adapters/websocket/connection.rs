//! Per-connection handle for hub fan-out.
//!
//! A `ConnectionHandle` is the hub's view of one WebSocket connection:
//! routing identity plus the sending half of a bounded outbound queue.
//! The session's send loop owns the receiving half and drains it onto
//! the socket.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::foundation::{BoardId, ConnectionId, UserId};

/// The hub-side handle for one registered WebSocket connection.
///
/// Each browser tab gets its own handle with a fresh `ConnectionId`,
/// so one user viewing a board from three tabs holds three entries in
/// the hub registry. The `user_id` is what the hub compares against an
/// event's origin when deciding whether to skip the recipient.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    connection_id: ConnectionId,
    board_id: BoardId,
    user_id: UserId,
    outbound: mpsc::Sender<Arc<str>>,
}

impl ConnectionHandle {
    /// Creates a handle and the paired receiver for the send loop.
    ///
    /// # Arguments
    ///
    /// * `board_id` - Board this connection is subscribed to
    /// * `user_id` - Authenticated user behind the connection
    /// * `queue_capacity` - Outbound queue depth; when the queue is full
    ///   the hub drops events for this connection rather than blocking
    pub fn new(
        board_id: BoardId,
        user_id: UserId,
        queue_capacity: usize,
    ) -> (Self, mpsc::Receiver<Arc<str>>) {
        let (outbound, rx) = mpsc::channel(queue_capacity);
        let handle = Self {
            connection_id: ConnectionId::new(),
            board_id,
            user_id,
            outbound,
        };
        (handle, rx)
    }

    /// Identifier for this connection.
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Board this connection receives events for.
    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// User behind this connection.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Queues a serialized frame without blocking.
    ///
    /// # Errors
    ///
    /// Returns the frame back if the queue is full or the session's
    /// receiving half has been dropped.
    pub fn try_send(&self, frame: Arc<str>) -> Result<(), TrySendError<Arc<str>>> {
        self.outbound.try_send(frame)
    }
}
