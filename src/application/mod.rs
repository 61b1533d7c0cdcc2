//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each mutation is one command handler: one unit of work, one engine or
//! entity operation, one post-commit broadcast.

pub mod handlers;

pub use handlers::{
    // Card handlers
    CreateCardCommand, CreateCardHandler, CreateCardResult,
    DeleteCardCommand, DeleteCardHandler, DeleteCardResult,
    MoveCardCommand, MoveCardHandler, MoveCardResult,
    UpdateCardCommand, UpdateCardHandler, UpdateCardResult,
    // List handlers
    CreateListCommand, CreateListHandler, CreateListResult,
    DeleteListCommand, DeleteListHandler, DeleteListResult,
    MoveListCommand, MoveListHandler, MoveListResult,
    RenameListCommand, RenameListHandler, RenameListResult,
    // Shared error surface
    MutationError,
};
