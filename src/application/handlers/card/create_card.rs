//! CreateCardHandler - Command handler for adding a card to a list.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, Card};
use crate::domain::foundation::{BoardId, CardId, ListId, UserId};
use crate::domain::ordering::PositionEngine;
use crate::ports::{CardStore, PositionStore};

use super::super::MutationError;

/// Command to create a new card at the end of a list.
#[derive(Debug, Clone)]
pub struct CreateCardCommand {
    /// Board the list belongs to, used to route the broadcast. The
    /// caller has already authorized the user against this board.
    pub board_id: BoardId,
    pub list_id: ListId,
    pub title: String,
    pub description: Option<String>,
    pub origin: Option<UserId>,
}

/// Result of successful card creation.
#[derive(Debug, Clone)]
pub struct CreateCardResult {
    pub card: Card,
}

/// Handler for creating cards.
pub struct CreateCardHandler<S: CardStore> {
    store: Arc<S>,
    engine: PositionEngine<S>,
    broadcaster: EventBroadcaster,
}

impl<S: CardStore> CreateCardHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        let engine = PositionEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: CreateCardCommand) -> Result<CreateCardResult, MutationError> {
        // 1. Validate and build the entity
        let mut card = Card::new(CardId::new(), cmd.list_id, cmd.title, cmd.description)?;

        // 2. Append at the end of the list inside one unit of work
        let mut uow = self.store.begin().await?;
        self.engine.append(&mut uow, &mut card).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::card_created(
            cmd.board_id,
            cmd.list_id,
            *card.id(),
            cmd.origin,
        ));

        Ok(CreateCardResult { card })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::websocket::Hub;

    fn handler(store: Arc<InMemoryStore<Card>>) -> CreateCardHandler<InMemoryStore<Card>> {
        CreateCardHandler::new(store, EventBroadcaster::new(Hub::spawn()))
    }

    #[tokio::test]
    async fn creates_cards_in_append_order() {
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(Arc::clone(&store));
        let board_id = BoardId::new();
        let list_id = ListId::new();

        for title in ["Write spec", "Review spec"] {
            handler
                .handle(CreateCardCommand {
                    board_id,
                    list_id,
                    title: title.to_string(),
                    description: None,
                    origin: None,
                })
                .await
                .unwrap();
        }

        let cards = store.children_of(&list_id).await;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title(), "Write spec");
        assert_eq!(cards[1].position().get(), 2);
    }

    #[tokio::test]
    async fn keeps_the_provided_description() {
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(Arc::clone(&store));

        let result = handler
            .handle(CreateCardCommand {
                board_id: BoardId::new(),
                list_id: ListId::new(),
                title: "Ship it".to_string(),
                description: Some("After review".to_string()),
                origin: None,
            })
            .await
            .unwrap();

        assert_eq!(result.card.description(), Some("After review"));
    }

    #[tokio::test]
    async fn rejects_empty_title_without_persisting() {
        let store = Arc::new(InMemoryStore::new());
        let handler = handler(Arc::clone(&store));

        let result = handler
            .handle(CreateCardCommand {
                board_id: BoardId::new(),
                list_id: ListId::new(),
                title: String::new(),
                description: None,
                origin: None,
            })
            .await;

        assert!(matches!(result, Err(MutationError::Validation(_))));
        assert_eq!(store.item_count().await, 0);
    }
}
