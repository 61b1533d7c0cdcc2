//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `board` - List and card entities plus the real-time event vocabulary
//! - `ordering` - Position engine keeping contiguous 1..N orderings

pub mod board;
pub mod foundation;
pub mod ordering;
