//! List command handlers.

mod create_list;
mod delete_list;
mod move_list;
mod rename_list;

pub use create_list::{CreateListCommand, CreateListHandler, CreateListResult};
pub use delete_list::{DeleteListCommand, DeleteListHandler, DeleteListResult};
pub use move_list::{MoveListCommand, MoveListHandler, MoveListResult};
pub use rename_list::{RenameListCommand, RenameListHandler, RenameListResult};
