//! In-memory position store implementation for testing.
//!
//! Provides a transactional store over a plain `HashMap`, good enough
//! to exercise every ordering algorithm and the concurrency property
//! without a database.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. Production code uses the Postgres stores.
//!
//! # Transaction model
//!
//! `begin` takes an exclusive async lock on the whole map, so exactly
//! one unit of work is open at a time and `begin` waits for the
//! previous one to finish. Mutations stage into a scratch copy; `commit`
//! swaps the copy in, dropping the unit of work discards it. This is
//! the in-memory analogue of serializable isolation with rollback.

use async_trait::async_trait;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::Position;
use crate::domain::ordering::OrderedItem;
use crate::ports::{ItemId, ItemParent, PositionStore, Shift, StoreError};

/// In-memory store of one ordered collection.
///
/// Features:
/// - Real begin/commit/rollback semantics for engine tests
/// - Exclusive transactions (one open unit of work at a time)
/// - Committed-state accessors for assertions
#[derive(Clone)]
pub struct InMemoryStore<I: OrderedItem> {
    state: Arc<Mutex<HashMap<I::Id, I>>>,
}

/// Unit of work over an [`InMemoryStore`].
///
/// Holds the store lock for its whole lifetime; staged changes become
/// visible only through `commit`.
pub struct MemoryUnitOfWork<I: OrderedItem> {
    guard: OwnedMutexGuard<HashMap<I::Id, I>>,
    staged: HashMap<I::Id, I>,
}

impl<I: OrderedItem> InMemoryStore<I> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // === Test Helpers ===

    /// Returns the committed children of a parent, sorted by position.
    ///
    /// Do not call while a unit of work is open; the transaction holds
    /// the state lock and this would wait on it.
    pub async fn children_of(&self, parent: &I::ParentId) -> Vec<I> {
        let state = self.state.lock().await;
        let mut children: Vec<I> = state
            .values()
            .filter(|item| item.parent_id() == parent)
            .cloned()
            .collect();
        children.sort_by_key(|item| item.position());
        children
    }

    /// Returns a committed item by id, if present.
    pub async fn get(&self, id: &I::Id) -> Option<I> {
        self.state.lock().await.get(id).cloned()
    }

    /// Returns the number of committed items across all parents.
    pub async fn item_count(&self) -> usize {
        self.state.lock().await.len()
    }
}

impl<I: OrderedItem> Default for InMemoryStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<I: OrderedItem + 'static> PositionStore for InMemoryStore<I> {
    type Item = I;
    type Uow = MemoryUnitOfWork<I>;

    async fn begin(&self) -> Result<Self::Uow, StoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(MemoryUnitOfWork { guard, staged })
    }

    async fn commit(&self, uow: Self::Uow) -> Result<(), StoreError> {
        let MemoryUnitOfWork { mut guard, staged } = uow;
        *guard = staged;
        Ok(())
    }

    async fn find(
        &self,
        uow: &mut Self::Uow,
        id: &ItemId<Self>,
    ) -> Result<Option<Self::Item>, StoreError> {
        Ok(uow.staged.get(id).cloned())
    }

    async fn max_position(
        &self,
        uow: &mut Self::Uow,
        parent: &ItemParent<Self>,
    ) -> Result<u32, StoreError> {
        Ok(uow
            .staged
            .values()
            .filter(|item| item.parent_id() == parent)
            .map(|item| item.position().get())
            .max()
            .unwrap_or(0))
    }

    async fn shift_range(
        &self,
        uow: &mut Self::Uow,
        parent: &ItemParent<Self>,
        range: RangeInclusive<u32>,
        shift: Shift,
    ) -> Result<(), StoreError> {
        for item in uow.staged.values_mut() {
            if item.parent_id() != parent {
                continue;
            }
            let position = item.position().get();
            if !range.contains(&position) {
                continue;
            }
            let shifted = match shift {
                Shift::Up => position + 1,
                Shift::Down => position - 1,
            };
            item.relocate(parent.clone(), Position::new(shifted));
        }
        Ok(())
    }

    async fn insert(&self, uow: &mut Self::Uow, item: &Self::Item) -> Result<(), StoreError> {
        if uow.staged.contains_key(item.id()) {
            return Err(StoreError::backend(format!(
                "duplicate item id {}",
                item.id()
            )));
        }
        uow.staged.insert(item.id().clone(), item.clone());
        Ok(())
    }

    async fn update(&self, uow: &mut Self::Uow, item: &Self::Item) -> Result<(), StoreError> {
        if !uow.staged.contains_key(item.id()) {
            return Err(StoreError::backend(format!("no such item {}", item.id())));
        }
        uow.staged.insert(item.id().clone(), item.clone());
        Ok(())
    }

    async fn delete(&self, uow: &mut Self::Uow, id: &ItemId<Self>) -> Result<(), StoreError> {
        if uow.staged.remove(id).is_none() {
            return Err(StoreError::backend(format!("no such item {}", id)));
        }
        Ok(())
    }
}
