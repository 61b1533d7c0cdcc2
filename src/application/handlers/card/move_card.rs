//! MoveCardHandler - Command handler for moving a card within or across lists.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, Card};
use crate::domain::foundation::{BoardId, CardId, ListId, Position, UserId};
use crate::domain::ordering::{MoveOutcome, PositionEngine};
use crate::ports::{CardStore, PositionStore};

use super::super::MutationError;

/// Command to move a card to a target slot in a destination list.
///
/// The destination may be the card's current list (a reorder) or a
/// different list on the same board (a cross-list move). Cross-board
/// moves are not a thing; the caller guarantees both lists belong to
/// `board_id`.
#[derive(Debug, Clone)]
pub struct MoveCardCommand {
    pub board_id: BoardId,
    pub card_id: CardId,
    pub to_list_id: ListId,
    /// Desired slot, 1-based. Within the current list the valid range
    /// is `1..=N`; into another list it is `1..=M+1`, where the extra
    /// slot appends at the end.
    pub target_position: u32,
    pub origin: Option<UserId>,
}

/// Result of a move request.
#[derive(Debug, Clone)]
pub struct MoveCardResult {
    pub card: Card,
    pub outcome: MoveOutcome,
}

/// Handler for moving cards.
pub struct MoveCardHandler<S: CardStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: CardStore> MoveCardHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: MoveCardCommand) -> Result<MoveCardResult, MutationError> {
        // 1. Validate the target before touching storage
        let target = Position::try_new(cmd.target_position)?;

        // 2. Load and relocate inside one unit of work
        let mut uow = self.store.begin().await?;
        let mut card = self
            .store
            .find(&mut uow, &cmd.card_id)
            .await?
            .ok_or(MutationError::CardNotFound(cmd.card_id))?;

        let from_list_id = *card.list_id();
        let outcome = self
            .engine
            .relocate(&mut uow, &mut card, cmd.to_list_id, target)
            .await?;
        self.store.commit(uow).await?;

        // 3. Broadcast after commit; a no-op move stays silent
        if outcome == MoveOutcome::Moved {
            self.broadcaster.publish(BoardEvent::card_moved(
                cmd.board_id,
                *card.id(),
                from_list_id,
                cmd.to_list_id,
                card.position(),
                cmd.origin,
            ));
        }

        Ok(MoveCardResult { card, outcome })
    }
}
