//! Card command handlers.

mod create_card;
mod delete_card;
mod move_card;
mod update_card;

pub use create_card::{CreateCardCommand, CreateCardHandler, CreateCardResult};
pub use delete_card::{DeleteCardCommand, DeleteCardHandler, DeleteCardResult};
pub use move_card::{MoveCardCommand, MoveCardHandler, MoveCardResult};
pub use update_card::{UpdateCardCommand, UpdateCardHandler, UpdateCardResult};
