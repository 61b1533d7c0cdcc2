//! CreateListHandler - Command handler for adding a list to a board.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, List};
use crate::domain::foundation::{BoardId, ListId, UserId};
use crate::domain::ordering::PositionEngine;
use crate::ports::{ListStore, PositionStore};

use super::super::MutationError;

/// Command to create a new list at the end of a board.
#[derive(Debug, Clone)]
pub struct CreateListCommand {
    pub board_id: BoardId,
    pub title: String,
    /// User performing the mutation; their own connections are skipped
    /// during fan-out.
    pub origin: Option<UserId>,
}

/// Result of successful list creation.
#[derive(Debug, Clone)]
pub struct CreateListResult {
    pub list: List,
}

/// Handler for creating lists.
pub struct CreateListHandler<S: ListStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: ListStore> CreateListHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: CreateListCommand) -> Result<CreateListResult, MutationError> {
        // 1. Validate and build the entity
        let mut list = List::new(ListId::new(), cmd.board_id, cmd.title)?;

        // 2. Append at the end of the board inside one unit of work
        let mut uow = self.store.begin().await?;
        self.engine.append(&mut uow, &mut list).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::list_created(
            cmd.board_id,
            *list.id(),
            cmd.origin,
        ));

        Ok(CreateListResult { list })
    }
}
