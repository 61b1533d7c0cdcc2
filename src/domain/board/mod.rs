//! Board domain module.
//!
//! Lists and cards with their ordering state, plus the closed event
//! vocabulary broadcast to connected board viewers. Boards themselves
//! are managed by an external collaborator; the core only routes by
//! board id.

mod card;
mod events;
mod list;

pub use card::{Card, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH as MAX_CARD_TITLE_LENGTH};
pub use events::{BoardEvent, EventKind, WireEvent};
pub use list::{List, MAX_TITLE_LENGTH as MAX_LIST_TITLE_LENGTH};
