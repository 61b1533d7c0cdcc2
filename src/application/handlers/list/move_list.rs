//! MoveListHandler - Command handler for reordering a list on its board.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, List};
use crate::domain::foundation::{ListId, Position, UserId};
use crate::domain::ordering::{MoveOutcome, PositionEngine};
use crate::ports::{ListStore, PositionStore};

use super::super::MutationError;

/// Command to move a list to a new position on its board.
///
/// Lists never change boards, so the only degree of freedom is the
/// target slot within the current board's sequence.
#[derive(Debug, Clone)]
pub struct MoveListCommand {
    pub list_id: ListId,
    /// Desired slot, 1-based. Must be within `1..=N` for a board with
    /// N lists.
    pub target_position: u32,
    pub origin: Option<UserId>,
}

/// Result of a move request.
#[derive(Debug, Clone)]
pub struct MoveListResult {
    pub list: List,
    pub outcome: MoveOutcome,
}

/// Handler for moving lists.
pub struct MoveListHandler<S: ListStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: ListStore> MoveListHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: MoveListCommand) -> Result<MoveListResult, MutationError> {
        // 1. Validate the target before touching storage
        let target = Position::try_new(cmd.target_position)?;

        // 2. Load and relocate inside one unit of work
        let mut uow = self.store.begin().await?;
        let mut list = self
            .store
            .find(&mut uow, &cmd.list_id)
            .await?
            .ok_or(MutationError::ListNotFound(cmd.list_id))?;

        let board_id = *list.board_id();
        let outcome = self
            .engine
            .relocate(&mut uow, &mut list, board_id, target)
            .await?;
        self.store.commit(uow).await?;

        // 3. Broadcast after commit; a no-op move stays silent
        if outcome == MoveOutcome::Moved {
            self.broadcaster.publish(BoardEvent::list_updated(
                board_id,
                *list.id(),
                cmd.origin,
            ));
        }

        Ok(MoveListResult { list, outcome })
    }
}
