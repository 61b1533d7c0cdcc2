//! Ordered item abstraction.
//!
//! Both ordered collections in the system (lists within a board, cards
//! within a list) share one contract: an item has an identity, a parent
//! and a 1-based position, and can be placed somewhere else. The engine
//! and the storage port are generic over this trait.

use std::fmt;

use crate::domain::board::{Card, List};
use crate::domain::foundation::{BoardId, CardId, ListId, Position};

/// An entity holding a contiguous 1-based position within a parent.
pub trait OrderedItem: Clone + Send + Sync {
    /// The item's identifier type.
    type Id: Clone + PartialEq + Eq + std::hash::Hash + fmt::Display + Send + Sync;

    /// The parent's identifier type.
    type ParentId: Clone + PartialEq + Eq + std::hash::Hash + fmt::Display + Send + Sync;

    /// Returns the item's identifier.
    fn id(&self) -> &Self::Id;

    /// Returns the identifier of the parent the item currently sits in.
    fn parent_id(&self) -> &Self::ParentId;

    /// Returns the item's 1-based position within its parent.
    fn position(&self) -> Position;

    /// Places the item at a position within a parent.
    fn relocate(&mut self, parent: Self::ParentId, position: Position);
}

impl OrderedItem for List {
    type Id = ListId;
    type ParentId = BoardId;

    fn id(&self) -> &ListId {
        List::id(self)
    }

    fn parent_id(&self) -> &BoardId {
        self.board_id()
    }

    fn position(&self) -> Position {
        List::position(self)
    }

    fn relocate(&mut self, parent: BoardId, position: Position) {
        List::relocate(self, parent, position);
    }
}

impl OrderedItem for Card {
    type Id = CardId;
    type ParentId = ListId;

    fn id(&self) -> &CardId {
        Card::id(self)
    }

    fn parent_id(&self) -> &ListId {
        self.list_id()
    }

    fn position(&self) -> Position {
        Card::position(self)
    }

    fn relocate(&mut self, parent: ListId, position: Position) {
        Card::relocate(self, parent, position);
    }
}
