//! Position store port.
//!
//! Defines the storage contract consumed by the position engine: an
//! explicit unit of work plus the handful of set-oriented operations
//! the ordering algorithms need. One generic trait covers both ordered
//! collections (lists within a board, cards within a list).
//!
//! # Design
//!
//! - **Explicit unit of work**: callers obtain a `Uow` from `begin`,
//!   thread it through every operation, and finish with `commit`.
//!   Dropping an uncommitted unit of work rolls back.
//! - **Transaction-scoped reads**: `find` and `max_position` observe
//!   the transaction's view, never a stale snapshot.
//! - **Isolation owned by the store**: implementations must serialize
//!   ordering mutations per parent (row locks, serializable isolation,
//!   or an exclusive in-memory guard); the engine holds no locks.

use async_trait::async_trait;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::domain::board::{Card, List};
use crate::domain::ordering::OrderedItem;

/// Shorthand for the id type of a store's item.
pub type ItemId<S> = <<S as PositionStore>::Item as OrderedItem>::Id;

/// Shorthand for the parent id type of a store's item.
pub type ItemParent<S> = <<S as PositionStore>::Item as OrderedItem>::ParentId;

/// Direction of a sibling position shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Increment positions by one (make room).
    Up,
    /// Decrement positions by one (close a gap).
    Down,
}

/// Errors surfaced by position store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Storage port for one ordered collection.
///
/// Implementations must guarantee that everything performed through a
/// single `Uow` commits or rolls back atomically, and that concurrent
/// units of work touching the same parent are isolated from each other.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// The ordered item this store persists.
    type Item: OrderedItem;

    /// Transaction-scoped unit of work handle.
    type Uow: Send;

    /// Opens a new unit of work.
    ///
    /// # Errors
    ///
    /// - `Backend` if a transaction cannot be started
    async fn begin(&self) -> Result<Self::Uow, StoreError>;

    /// Commits a unit of work, making its changes visible.
    ///
    /// # Errors
    ///
    /// - `Backend` if the commit fails; all changes are discarded
    async fn commit(&self, uow: Self::Uow) -> Result<(), StoreError>;

    /// Loads an item by id within the unit of work.
    ///
    /// Returns `None` if not found.
    async fn find(
        &self,
        uow: &mut Self::Uow,
        id: &ItemId<Self>,
    ) -> Result<Option<Self::Item>, StoreError>;

    /// Returns the highest position in use under a parent, or 0 if the
    /// parent has no children.
    async fn max_position(
        &self,
        uow: &mut Self::Uow,
        parent: &ItemParent<Self>,
    ) -> Result<u32, StoreError>;

    /// Shifts every sibling whose position falls within `range` one
    /// step in the given direction.
    ///
    /// An empty range is a no-op.
    async fn shift_range(
        &self,
        uow: &mut Self::Uow,
        parent: &ItemParent<Self>,
        range: RangeInclusive<u32>,
        shift: Shift,
    ) -> Result<(), StoreError>;

    /// Inserts a new item.
    async fn insert(&self, uow: &mut Self::Uow, item: &Self::Item) -> Result<(), StoreError>;

    /// Persists an existing item's current parent and position.
    async fn update(&self, uow: &mut Self::Uow, item: &Self::Item) -> Result<(), StoreError>;

    /// Deletes an item by id.
    async fn delete(&self, uow: &mut Self::Uow, id: &ItemId<Self>) -> Result<(), StoreError>;
}

/// Store of lists ordered within their board.
pub trait ListStore: PositionStore<Item = List> {}
impl<S> ListStore for S where S: PositionStore<Item = List> {}

/// Store of cards ordered within their list.
pub trait CardStore: PositionStore<Item = Card> {}
impl<S> CardStore for S where S: PositionStore<Item = Card> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_backend_wraps_display() {
        let err = StoreError::backend("connection refused");
        assert_eq!(
            format!("{}", err),
            "Storage backend error: connection refused"
        );
    }

    #[test]
    fn shift_direction_is_copyable() {
        let up = Shift::Up;
        let copied = up;
        assert_eq!(up, copied);
        assert_ne!(Shift::Up, Shift::Down);
    }
}
