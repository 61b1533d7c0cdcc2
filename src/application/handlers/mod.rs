//! Application handlers.
//!
//! Command handlers that orchestrate domain operations. Each handler
//! performs exactly one position-engine or entity mutation inside one
//! unit of work and broadcasts the matching event only after commit.

pub mod card;
pub mod list;

mod error;

pub use card::{
    CreateCardCommand, CreateCardHandler, CreateCardResult, DeleteCardCommand, DeleteCardHandler,
    DeleteCardResult, MoveCardCommand, MoveCardHandler, MoveCardResult, UpdateCardCommand,
    UpdateCardHandler, UpdateCardResult,
};
pub use error::MutationError;
pub use list::{
    CreateListCommand, CreateListHandler, CreateListResult, DeleteListCommand, DeleteListHandler,
    DeleteListResult, MoveListCommand, MoveListHandler, MoveListResult, RenameListCommand,
    RenameListHandler, RenameListResult,
};
