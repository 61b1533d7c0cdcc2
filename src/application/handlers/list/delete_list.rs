//! DeleteListHandler - Command handler for removing a list from its board.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, List};
use crate::domain::foundation::{ListId, UserId};
use crate::domain::ordering::PositionEngine;
use crate::ports::{ListStore, PositionStore};

use super::super::MutationError;

/// Command to delete a list.
#[derive(Debug, Clone)]
pub struct DeleteListCommand {
    pub list_id: ListId,
    pub origin: Option<UserId>,
}

/// Result of a successful deletion.
///
/// Carries the deleted list so callers can report what was removed.
#[derive(Debug, Clone)]
pub struct DeleteListResult {
    pub list: List,
}

/// Handler for deleting lists.
pub struct DeleteListHandler<S: ListStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: ListStore> DeleteListHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: DeleteListCommand) -> Result<DeleteListResult, MutationError> {
        // 1. Load the list
        let mut uow = self.store.begin().await?;
        let list = self
            .store
            .find(&mut uow, &cmd.list_id)
            .await?
            .ok_or(MutationError::ListNotFound(cmd.list_id))?;

        // 2. Remove it and close the gap it leaves
        self.engine.remove(&mut uow, &list).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::list_deleted(
            *list.board_id(),
            *list.id(),
            cmd.origin,
        ));

        Ok(DeleteListResult { list })
    }
}
