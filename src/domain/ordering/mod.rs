//! Ordering domain module.
//!
//! The position engine and the item abstraction it operates on. The
//! engine keeps every parent's children at contiguous 1-based
//! positions through append, relocate and remove, always inside one
//! unit of work per operation.

mod engine;
mod item;

pub use engine::{MoveOutcome, PositionEngine, PositionError};
pub use item::OrderedItem;
