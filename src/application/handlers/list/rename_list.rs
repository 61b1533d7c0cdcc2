//! RenameListHandler - Command handler for renaming a list.

use std::sync::Arc;

use crate::adapters::websocket::EventBroadcaster;
use crate::domain::board::{BoardEvent, List};
use crate::domain::foundation::{ListId, UserId};
use crate::ports::{ListStore, PositionStore};

use super::super::MutationError;

/// Command to rename an existing list.
#[derive(Debug, Clone)]
pub struct RenameListCommand {
    pub list_id: ListId,
    pub title: String,
    pub origin: Option<UserId>,
}

/// Result of a successful rename.
#[derive(Debug, Clone)]
pub struct RenameListResult {
    pub list: List,
    pub previous_title: String,
}

/// Handler for renaming lists.
pub struct RenameListHandler<S: ListStore> {
    store: Arc<S>,
    broadcaster: EventBroadcaster,
}

impl<S: ListStore> RenameListHandler<S> {
    pub fn new(store: Arc<S>, broadcaster: EventBroadcaster) -> Self {
        Self { store, broadcaster }
    }

    pub async fn handle(&self, cmd: RenameListCommand) -> Result<RenameListResult, MutationError> {
        // 1. Load the list
        let mut uow = self.store.begin().await?;
        let mut list = self
            .store
            .find(&mut uow, &cmd.list_id)
            .await?
            .ok_or(MutationError::ListNotFound(cmd.list_id))?;

        // 2. Apply the rename
        let previous_title = list.rename(cmd.title)?;
        self.store.update(&mut uow, &list).await?;
        self.store.commit(uow).await?;

        // 3. Broadcast only after the commit
        self.broadcaster.publish(BoardEvent::list_updated(
            *list.board_id(),
            *list.id(),
            cmd.origin,
        ));

        Ok(RenameListResult {
            list,
            previous_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::websocket::Hub;
    use crate::domain::foundation::BoardId;

    async fn seed_list(store: &Arc<InMemoryStore<List>>, title: &str) -> List {
        let list = List::new(ListId::new(), BoardId::new(), title.to_string()).unwrap();
        let mut uow = store.begin().await.unwrap();
        store.insert(&mut uow, &list).await.unwrap();
        store.commit(uow).await.unwrap();
        list
    }

    #[tokio::test]
    async fn renames_an_existing_list() {
        let store = Arc::new(InMemoryStore::new());
        let list = seed_list(&store, "Backlog").await;
        let handler = RenameListHandler::new(
            Arc::clone(&store),
            EventBroadcaster::new(Hub::spawn()),
        );

        let result = handler
            .handle(RenameListCommand {
                list_id: *list.id(),
                title: "Icebox".to_string(),
                origin: None,
            })
            .await
            .unwrap();

        assert_eq!(result.list.title(), "Icebox");
        assert_eq!(result.previous_title, "Backlog");
        let stored = store.get(list.id()).await.unwrap();
        assert_eq!(stored.title(), "Icebox");
    }

    #[tokio::test]
    async fn unknown_list_is_reported_as_not_found() {
        let store: Arc<InMemoryStore<List>> = Arc::new(InMemoryStore::new());
        let handler = RenameListHandler::new(
            Arc::clone(&store),
            EventBroadcaster::new(Hub::spawn()),
        );
        let missing = ListId::new();

        let result = handler
            .handle(RenameListCommand {
                list_id: missing,
                title: "Anything".to_string(),
                origin: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(MutationError::ListNotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn invalid_title_leaves_the_list_untouched() {
        let store = Arc::new(InMemoryStore::new());
        let list = seed_list(&store, "Backlog").await;
        let handler = RenameListHandler::new(
            Arc::clone(&store),
            EventBroadcaster::new(Hub::spawn()),
        );

        let result = handler
            .handle(RenameListCommand {
                list_id: *list.id(),
                title: String::new(),
                origin: None,
            })
            .await;

        assert!(matches!(result, Err(MutationError::Validation(_))));
        let stored = store.get(list.id()).await.unwrap();
        assert_eq!(stored.title(), "Backlog");
    }
}
