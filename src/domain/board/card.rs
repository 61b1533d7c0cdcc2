//! Card entity.
//!
//! Cards are the draggable units of work on a board. Each card belongs
//! to exactly one list at a time and carries a position within it.

use crate::domain::foundation::{CardId, ListId, Position, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for card title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum length for card description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Card entity - a unit of work within a list.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `title` is 1-500 characters after trimming
/// - `position` is 1-based and contiguous among the list's cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    id: CardId,

    /// List this card currently belongs to.
    list_id: ListId,

    /// Card title.
    title: String,

    /// Optional free-form description.
    description: Option<String>,

    /// 1-based position among the list's cards.
    position: Position,

    /// When the card was created.
    created_at: Timestamp,

    /// When the card was last updated.
    updated_at: Timestamp,
}

impl Card {
    /// Create a new card.
    ///
    /// The position starts at 1 and is reassigned when the card is
    /// appended to its list.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title is empty after trimming
    /// - `OutOfRange` if title or description exceed their maximum lengths
    pub fn new(
        id: CardId,
        list_id: ListId,
        title: String,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = validate_title(title)?;
        let description = validate_description(description)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            list_id,
            title,
            description,
            position: Position::FIRST,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a card from persistence (no validation, no events).
    pub fn reconstitute(
        id: CardId,
        list_id: ListId,
        title: String,
        description: Option<String>,
        position: Position,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            list_id,
            title,
            description,
            position,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the card ID.
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Returns the owning list's ID.
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Returns the card title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the card description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the 1-based position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns when the card was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the card was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the card.
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

    /// Update the card description.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the new description exceeds the maximum length
    pub fn update_description(
        &mut self,
        description: Option<String>,
    ) -> Result<Option<String>, ValidationError> {
        let description = validate_description(description)?;

        let old_description = std::mem::replace(&mut self.description, description);
        self.updated_at = Timestamp::now();
        Ok(old_description)
    }

    /// Place the card at a position within a list.
    ///
    /// Passing a different list reparents the card.
    pub fn relocate(&mut self, list_id: ListId, position: Position) {
        self.list_id = list_id;
        self.position = position;
        self.updated_at = Timestamp::now();
    }
}

/// Validates and normalizes a card title.
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

/// Validates a card description, passing `None` through untouched.
fn validate_description(
    description: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match description {
        Some(text) if text.len() > MAX_DESCRIPTION_LENGTH => Err(ValidationError::out_of_range(
            "description",
            0,
            MAX_DESCRIPTION_LENGTH as i32,
            text.len() as i32,
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> Card {
        Card::new(CardId::new(), ListId::new(), "Fix login".to_string(), None).unwrap()
    }

    // Construction tests

    #[test]
    fn new_card_starts_at_position_one() {
        let card = test_card();
        assert_eq!(card.position(), Position::FIRST);
    }

    #[test]
    fn new_card_has_no_description_by_default() {
        let card = test_card();
        assert!(card.description().is_none());
    }

    #[test]
    fn new_card_accepts_description() {
        let card = Card::new(
            CardId::new(),
            ListId::new(),
            "Fix login".to_string(),
            Some("Repro steps in the thread".to_string()),
        )
        .unwrap();
        assert_eq!(card.description(), Some("Repro steps in the thread"));
    }

    #[test]
    fn new_card_rejects_empty_title() {
        let result = Card::new(CardId::new(), ListId::new(), "  ".to_string(), None);
        assert!(result.is_err());
    }

    #[test]
    fn new_card_rejects_too_long_description() {
        let long = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        let result = Card::new(
            CardId::new(),
            ListId::new(),
            "Fix login".to_string(),
            Some(long),
        );
        assert!(result.is_err());
    }

    // Mutation tests

    #[test]
    fn rename_returns_old_title() {
        let mut card = test_card();
        let old = card.rename("Fix logout".to_string()).unwrap();
        assert_eq!(old, "Fix login");
        assert_eq!(card.title(), "Fix logout");
    }

    #[test]
    fn update_description_returns_old() {
        let mut card = test_card();
        let old = card.update_description(Some("notes".to_string())).unwrap();
        assert!(old.is_none());
        assert_eq!(card.description(), Some("notes"));
    }

    #[test]
    fn update_description_can_clear() {
        let mut card = test_card();
        card.update_description(Some("notes".to_string())).unwrap();
        let old = card.update_description(None).unwrap();
        assert_eq!(old, Some("notes".to_string()));
        assert!(card.description().is_none());
    }

    // Relocate tests

    #[test]
    fn relocate_moves_within_list() {
        let mut card = test_card();
        let list_id = *card.list_id();
        card.relocate(list_id, Position::new(4));
        assert_eq!(card.list_id(), &list_id);
        assert_eq!(card.position().get(), 4);
    }

    #[test]
    fn relocate_reparents_across_lists() {
        let mut card = test_card();
        let other_list = ListId::new();
        card.relocate(other_list, Position::FIRST);
        assert_eq!(card.list_id(), &other_list);
        assert_eq!(card.position(), Position::FIRST);
    }
}
