//! List entity.
//!
//! Lists are the vertical columns of a board. Each list belongs to one
//! board and holds an ordered sequence of cards.
//!
//! # Ownership
//!
//! Lists reference their board by ID but do NOT own it. Boards are
//! managed by an external collaborator; this crate only orders and
//! broadcasts within them.

use crate::domain::foundation::{BoardId, ListId, Position, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for list title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// List entity - an ordered column of cards within a board.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `title` is 1-255 characters after trimming
/// - `position` is 1-based and contiguous among the board's lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Unique identifier for this list.
    id: ListId,

    /// Board this list belongs to.
    board_id: BoardId,

    /// List title.
    title: String,

    /// 1-based position among the board's lists.
    position: Position,

    /// When the list was created.
    created_at: Timestamp,

    /// When the list was last updated.
    updated_at: Timestamp,
}

impl List {
    /// Create a new list.
    ///
    /// The position starts at 1 and is reassigned when the list is
    /// appended to its board.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title is empty after trimming
    /// - `OutOfRange` if title exceeds the maximum length
    pub fn new(id: ListId, board_id: BoardId, title: String) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            board_id,
            title,
            position: Position::FIRST,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a list from persistence (no validation, no events).
    pub fn reconstitute(
        id: ListId,
        board_id: BoardId,
        title: String,
        position: Position,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            board_id,
            title,
            position,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the list ID.
    pub fn id(&self) -> &ListId {
        &self.id
    }

    /// Returns the owning board's ID.
    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// Returns the list title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the 1-based position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns when the list was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the list was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the list.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new title is empty after trimming
    /// - `OutOfRange` if the new title exceeds the maximum length
    pub fn rename(&mut self, new_title: String) -> Result<String, ValidationError> {
        let new_title = validate_title(new_title)?;

        let old_title = std::mem::replace(&mut self.title, new_title);
        self.updated_at = Timestamp::now();
        Ok(old_title)
    }

    /// Place the list at a position within a board.
    ///
    /// Lists only ever move within their own board; the engine passes
    /// the current board back unchanged.
    pub fn relocate(&mut self, board_id: BoardId, position: Position) {
        self.board_id = board_id;
        self.position = position;
        self.updated_at = Timestamp::now();
    }
}

/// Validates and normalizes a list title.
fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(ValidationError::out_of_range(
            "title",
            1,
            MAX_TITLE_LENGTH as i32,
            trimmed.len() as i32,
        ));
    }
    Ok(trimmed.to_string())
}
