//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form
//! the vocabulary of the Driftboard domain.

mod errors;
mod ids;
mod position;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{BoardId, CardId, ConnectionId, ListId, UserId};
pub use position::Position;
pub use timestamp::Timestamp;
