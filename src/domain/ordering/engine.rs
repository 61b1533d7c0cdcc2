//! Position engine.
//!
//! Keeps the ordering invariant for one ordered collection: for every
//! parent, the positions of its direct children are exactly
//! `{1, ..., N}` with no gaps and no duplicates, at all times between
//! transactions.
//!
//! Every operation runs inside a caller-supplied unit of work and
//! leaves either a fully reordered collection or no change at all.
//! Concurrent operations against the same parent are serialized by the
//! store's transaction isolation; the engine itself holds no locks.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::Position;
use crate::domain::ordering::OrderedItem;
use crate::ports::{ItemParent, PositionStore, Shift, StoreError};

/// Outcome of a relocate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item was repositioned and persisted.
    Moved,
    /// The target equals the item's current slot; nothing was written.
    Unchanged,
}

/// Errors surfaced by position engine operations.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The requested target lies outside the valid range for the
    /// destination parent. `max` is the largest permitted target.
    #[error("Target position {target} is out of bounds (valid range is 1..={max})")]
    OutOfBounds { target: u32, max: u32 },

    /// The underlying store failed; the whole unit of work is void.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordering service for one ordered collection.
///
/// Generic over the store so the same algorithms serve both
/// collections (lists within a board, cards within a list) and both
/// backends (Postgres, in-memory).
pub struct PositionEngine<S: PositionStore> {
    store: Arc<S>,
}

impl<S: PositionStore> PositionEngine<S> {
    /// Creates an engine over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends an item at the end of its parent's sequence.
    ///
    /// Assigns `max + 1` as the item's position and inserts it, all
    /// within the supplied unit of work.
    ///
    /// # Errors
    ///
    /// - `Store` on any storage failure
    pub async fn append(
        &self,
        uow: &mut S::Uow,
        item: &mut S::Item,
    ) -> Result<(), PositionError> {
        let parent = item.parent_id().clone();
        let max = self.store.max_position(uow, &parent).await?;

        item.relocate(parent, Position::new(max + 1));
        self.store.insert(uow, item).await?;
        Ok(())
    }

    /// Moves an item to `target` within `to_parent`, shifting siblings
    /// to keep both affected sequences contiguous.
    ///
    /// A same-parent move to the item's current position is reported as
    /// [`MoveOutcome::Unchanged`] and writes nothing.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if `target` exceeds the destination's valid
    ///   range: `1..=max` within the same parent, `1..=max + 1` when
    ///   crossing into another parent
    /// - `Store` on any storage failure
    pub async fn relocate(
        &self,
        uow: &mut S::Uow,
        item: &mut S::Item,
        to_parent: ItemParent<S>,
        target: Position,
    ) -> Result<MoveOutcome, PositionError> {
        let from_parent = item.parent_id().clone();
        let old = item.position().get();
        let target = target.get();

        if from_parent == to_parent {
            // Same-parent reorder. The item already occupies one of the
            // N slots, so the end of the valid range is max itself.
            let max = self.store.max_position(uow, &from_parent).await?;
            if target > max {
                return Err(PositionError::OutOfBounds { target, max });
            }
            if target == old {
                return Ok(MoveOutcome::Unchanged);
            }

            if target < old {
                self.store
                    .shift_range(uow, &from_parent, target..=old - 1, Shift::Up)
                    .await?;
            } else {
                self.store
                    .shift_range(uow, &from_parent, old + 1..=target, Shift::Down)
                    .await?;
            }
        } else {
            // Cross-parent move. `max + 1` appends at the end of the
            // destination sequence.
            let dest_max = self.store.max_position(uow, &to_parent).await?;
            if target > dest_max + 1 {
                return Err(PositionError::OutOfBounds {
                    target,
                    max: dest_max + 1,
                });
            }

            let source_max = self.store.max_position(uow, &from_parent).await?;
            if old < source_max {
                self.store
                    .shift_range(uow, &from_parent, old + 1..=source_max, Shift::Down)
                    .await?;
            }
            if target <= dest_max {
                self.store
                    .shift_range(uow, &to_parent, target..=dest_max, Shift::Up)
                    .await?;
            }
        }

        item.relocate(to_parent, Position::new(target));
        self.store.update(uow, item).await?;
        Ok(MoveOutcome::Moved)
    }

    /// Removes an item, closing the gap it leaves behind.
    ///
    /// # Errors
    ///
    /// - `Store` on any storage failure
    pub async fn remove(&self, uow: &mut S::Uow, item: &S::Item) -> Result<(), PositionError> {
        let parent = item.parent_id().clone();
        let old = item.position().get();

        let max = self.store.max_position(uow, &parent).await?;
        if old < max {
            self.store
                .shift_range(uow, &parent, old + 1..=max, Shift::Down)
                .await?;
        }
        self.store.delete(uow, item.id()).await?;
        Ok(())
    }
}
