//! UpdateCardHandler - Command handler for editing a card's content.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, Card};
use crate::domain::foundation::{BoardId, CardId, UserId};
use crate::ports::{CardStore, PositionStore};

use super::super::MutationError;

/// Command to update a card's title and/or description.
#[derive(Debug, Clone)]
pub struct UpdateCardCommand {
    pub board_id: BoardId,
    pub card_id: CardId,
    /// `None` leaves the title untouched.
    pub title: Option<String>,
    /// `None` leaves the description untouched; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    pub origin: Option<UserId>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateCardResult {
    pub card: Card,
}

/// Handler for updating cards.
pub struct UpdateCardHandler<S: CardStore> {
    store: Arc<S>,
    broadcaster: EventBroadcaster,
}

impl<S: CardStore> UpdateCardHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        Self { store, broadcaster }
    }

    pub async fn handle(&self, cmd: UpdateCardCommand) -> Result<UpdateCardResult, MutationError> {
        // 1. Load the card
        let mut uow = self.store.begin().await?;
        let mut card = self
            .store
            .find(&mut uow, &cmd.card_id)
            .await?
            .ok_or(MutationError::CardNotFound(cmd.card_id))?;

        // 2. Apply the requested changes
        if let Some(title) = cmd.title {
            card.rename(title)?;
        }
        if let Some(description) = cmd.description {
            card.update_description(description)?;
        }
        self.store.update(&mut uow, &card).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::card_updated(
            cmd.board_id,
            *card.list_id(),
            *card.id(),
            cmd.origin,
        ));

        Ok(UpdateCardResult { card })
    }
}
