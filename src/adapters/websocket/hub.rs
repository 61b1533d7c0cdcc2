//! Board event hub: single-task fan-out over WebSocket connections.
//!
//! One dedicated task owns the entire connection registry and drains a
//! command queue. Registrations, unregistrations, and event submissions
//! all flow through that queue, so the registry needs no locks and all
//! events for a board reach its connections in submission order.
//!
//! # Architecture
//!
//! ```text
//! mutation handlers ──┐
//! session (register) ─┼─> command queue ─> hub task ─> per-connection queues
//! session (teardown) ─┘
//! ```
//!
//! The hub never blocks: events are pushed to each connection with
//! `try_send`, and a connection whose queue is full simply misses that
//! event. Slow consumers degrade alone instead of stalling the board.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::domain::board::BoardEvent;
use crate::domain::foundation::{BoardId, ConnectionId};

use super::connection::ConnectionHandle;

/// Error returned when the hub task has stopped accepting commands.
#[derive(Debug, thiserror::Error)]
#[error("hub task is not running")]
pub struct HubClosed;

/// Commands processed by the hub task.
enum HubCommand {
    Register(ConnectionHandle),
    Unregister {
        board_id: BoardId,
        connection_id: ConnectionId,
    },
    Submit(BoardEvent),
    ConnectionCount {
        board_id: BoardId,
        reply: oneshot::Sender<usize>,
    },
}

/// Cheap clonable handle to the hub task.
///
/// Every method is a message send; the registry itself lives inside the
/// spawned task and is never touched from outside it.
#[derive(Clone)]
pub struct Hub {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl Hub {
    /// Spawns the hub task and returns a handle to it.
    ///
    /// The task runs until every `Hub` clone has been dropped.
    pub fn spawn() -> Self {
        let (commands, queue) = mpsc::unbounded_channel();
        tokio::spawn(
            HubTask {
                queue,
                boards: HashMap::new(),
            }
            .run(),
        );
        Self { commands }
    }

    /// Registers a connection for its board.
    ///
    /// # Errors
    ///
    /// Returns `HubClosed` if the hub task has stopped.
    pub fn register(&self, handle: ConnectionHandle) -> Result<(), HubClosed> {
        self.commands
            .send(HubCommand::Register(handle))
            .map_err(|_| HubClosed)
    }

    /// Removes a connection from its board's registry entry.
    ///
    /// Safe to call more than once for the same connection; a second
    /// call finds nothing to remove and does nothing.
    ///
    /// # Errors
    ///
    /// Returns `HubClosed` if the hub task has stopped.
    pub fn unregister(
        &self,
        board_id: BoardId,
        connection_id: ConnectionId,
    ) -> Result<(), HubClosed> {
        self.commands
            .send(HubCommand::Unregister {
                board_id,
                connection_id,
            })
            .map_err(|_| HubClosed)
    }

    /// Submits an event for fan-out to its board's connections.
    ///
    /// Queuing succeeds even when the board has no connections; the hub
    /// task resolves recipients when it processes the command.
    ///
    /// # Errors
    ///
    /// Returns `HubClosed` if the hub task has stopped.
    pub fn submit(&self, event: BoardEvent) -> Result<(), HubClosed> {
        self.commands
            .send(HubCommand::Submit(event))
            .map_err(|_| HubClosed)
    }

    /// Number of connections currently registered for a board.
    ///
    /// Processed in queue order, so after this resolves every earlier
    /// register and unregister has been applied. Tests lean on that to
    /// synchronize with the hub task.
    ///
    /// # Errors
    ///
    /// Returns `HubClosed` if the hub task has stopped.
    pub async fn connection_count(&self, board_id: BoardId) -> Result<usize, HubClosed> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(HubCommand::ConnectionCount { board_id, reply })
            .map_err(|_| HubClosed)?;
        rx.await.map_err(|_| HubClosed)
    }
}

/// The task that owns the registry.
struct HubTask {
    queue: mpsc::UnboundedReceiver<HubCommand>,
    boards: HashMap<BoardId, HashMap<ConnectionId, ConnectionHandle>>,
}

impl HubTask {
    async fn run(mut self) {
        info!("Hub task starting");

        while let Some(command) = self.queue.recv().await {
            self.handle_command(command);
        }

        info!("Hub task stopped");
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(handle) => self.register(handle),
            HubCommand::Unregister {
                board_id,
                connection_id,
            } => self.unregister(board_id, connection_id),
            HubCommand::Submit(event) => self.fan_out(&event),
            HubCommand::ConnectionCount { board_id, reply } => {
                let count = self
                    .boards
                    .get(&board_id)
                    .map(|connections| connections.len())
                    .unwrap_or(0);
                let _ = reply.send(count);
            }
        }
    }

    fn register(&mut self, handle: ConnectionHandle) {
        debug!(
            board_id = %handle.board_id(),
            connection_id = %handle.connection_id(),
            user_id = %handle.user_id(),
            "Connection registered"
        );

        // Board entries are created on first registration.
        self.boards
            .entry(handle.board_id())
            .or_default()
            .insert(handle.connection_id(), handle);
    }

    fn unregister(&mut self, board_id: BoardId, connection_id: ConnectionId) {
        let Some(connections) = self.boards.get_mut(&board_id) else {
            return;
        };

        if connections.remove(&connection_id).is_some() {
            debug!(
                board_id = %board_id,
                connection_id = %connection_id,
                "Connection unregistered"
            );
        }

        // The last connection leaving takes the board entry with it.
        if connections.is_empty() {
            self.boards.remove(&board_id);
        }
    }

    fn fan_out(&self, event: &BoardEvent) {
        let Some(connections) = self.boards.get(event.board_id()) else {
            debug!(
                board_id = %event.board_id(),
                kind = %event.kind(),
                "No recipients for event"
            );
            return;
        };

        // Serialize once; every recipient shares the same frame.
        let frame: Arc<str> = match event.serialize_wire() {
            Ok(json) => Arc::from(json.as_str()),
            Err(e) => {
                error!(kind = %event.kind(), "Failed to serialize event: {}", e);
                return;
            }
        };

        for handle in connections.values() {
            // The originating user already sees the change locally in
            // every tab, so all of their connections are skipped.
            if event.origin() == Some(handle.user_id()) {
                continue;
            }

            match handle.try_send(Arc::clone(&frame)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(
                        connection_id = %handle.connection_id(),
                        kind = %event.kind(),
                        "Outbound queue full, dropping event for this connection"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    // The session is tearing down; its unregister
                    // command is already behind us in the queue.
                    debug!(
                        connection_id = %handle.connection_id(),
                        "Outbound queue closed, connection is shutting down"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ListId, UserId};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn register_then_unregister_empties_the_board_entry() {
        let hub = Hub::spawn();
        let board_id = BoardId::new();

        let (handle, _rx) = ConnectionHandle::new(board_id, user("u-1"), 4);
        let connection_id = handle.connection_id();
        hub.register(handle).unwrap();
        assert_eq!(hub.connection_count(board_id).await.unwrap(), 1);

        hub.unregister(board_id, connection_id).unwrap();
        assert_eq!(hub.connection_count(board_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn submit_reaches_other_users_but_not_the_origin() {
        let hub = Hub::spawn();
        let board_id = BoardId::new();

        let (origin_handle, mut origin_rx) = ConnectionHandle::new(board_id, user("alice"), 4);
        let (other_handle, mut other_rx) = ConnectionHandle::new(board_id, user("bob"), 4);
        hub.register(origin_handle).unwrap();
        hub.register(other_handle).unwrap();

        let event = BoardEvent::list_created(board_id, ListId::new(), Some(user("alice")));
        hub.submit(event).unwrap();

        // Queue-order barrier: once this resolves, the submit has been
        // fully processed.
        hub.connection_count(board_id).await.unwrap();

        let frame = other_rx.try_recv().unwrap();
        assert!(frame.contains("LIST_CREATED"));
        assert!(origin_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn submit_to_board_without_connections_is_a_noop() {
        let hub = Hub::spawn();
        let board_id = BoardId::new();

        let event = BoardEvent::list_created(board_id, ListId::new(), None);
        hub.submit(event).unwrap();

        assert_eq!(hub.connection_count(board_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unregister_for_unknown_connection_is_a_noop() {
        let hub = Hub::spawn();
        let board_id = BoardId::new();

        hub.unregister(board_id, ConnectionId::new()).unwrap();

        assert_eq!(hub.connection_count(board_id).await.unwrap(), 0);
    }
}
