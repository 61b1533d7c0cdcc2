//! DeleteCardHandler - Command handler for removing a card from its list.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, Card};
use crate::domain::foundation::{BoardId, CardId, UserId};
use crate::domain::ordering::PositionEngine;
use crate::ports::{CardStore, PositionStore};

use super::super::MutationError;

/// Command to delete a card.
#[derive(Debug, Clone)]
pub struct DeleteCardCommand {
    pub board_id: BoardId,
    pub card_id: CardId,
    pub origin: Option<UserId>,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteCardResult {
    pub card: Card,
}

/// Handler for deleting cards.
pub struct DeleteCardHandler<S: CardStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: CardStore> DeleteCardHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: DeleteCardCommand) -> Result<DeleteCardResult, MutationError> {
        // 1. Load the card
        let mut uow = self.store.begin().await?;
        let card = self
            .store
            .find(&mut uow, &cmd.card_id)
            .await?
            .ok_or(MutationError::CardNotFound(cmd.card_id))?;

        // 2. Remove it and close the gap it leaves
        self.engine.remove(&mut uow, &card).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::card_deleted(
            cmd.board_id,
            *card.list_id(),
            *card.id(),
            cmd.origin,
        ));

        Ok(DeleteCardResult { card })
    }
}
