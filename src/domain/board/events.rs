//! Real-time event vocabulary for board mutations.
//!
//! Defines the closed set of event kinds pushed to connected board
//! viewers, the internal envelope routed through the hub, and the
//! client-visible wire shape.
//!
//! Payloads carry identifiers only, never full entities; clients
//! refetch whatever detail they need.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::domain::foundation::{BoardId, CardId, ListId, Position, UserId};

// ============================================
// Event Kinds
// ============================================

/// All event kinds that can be pushed to connected clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    BoardCreated,
    BoardUpdated,
    BoardDeleted,
    BoardMemberAdded,
    BoardMemberRemoved,
    ListCreated,
    ListUpdated,
    ListDeleted,
    CardCreated,
    CardUpdated,
    CardDeleted,
    CardMoved,
    CardAssigned,
    CardUnassigned,
    CardCollaboratorAdded,
    CardCollaboratorRemoved,
}

impl EventKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BoardCreated => "BOARD_CREATED",
            EventKind::BoardUpdated => "BOARD_UPDATED",
            EventKind::BoardDeleted => "BOARD_DELETED",
            EventKind::BoardMemberAdded => "BOARD_MEMBER_ADDED",
            EventKind::BoardMemberRemoved => "BOARD_MEMBER_REMOVED",
            EventKind::ListCreated => "LIST_CREATED",
            EventKind::ListUpdated => "LIST_UPDATED",
            EventKind::ListDeleted => "LIST_DELETED",
            EventKind::CardCreated => "CARD_CREATED",
            EventKind::CardUpdated => "CARD_UPDATED",
            EventKind::CardDeleted => "CARD_DELETED",
            EventKind::CardMoved => "CARD_MOVED",
            EventKind::CardAssigned => "CARD_ASSIGNED",
            EventKind::CardUnassigned => "CARD_UNASSIGNED",
            EventKind::CardCollaboratorAdded => "CARD_COLLABORATOR_ADDED",
            EventKind::CardCollaboratorRemoved => "CARD_COLLABORATOR_REMOVED",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Internal Envelope
// ============================================

/// Internal representation of a board event for broadcasting.
///
/// Carries two routing fields the client never sees: the target board
/// and the originating user (used for self-exclusion during fan-out).
#[derive(Debug, Clone)]
pub struct BoardEvent {
    kind: EventKind,
    payload: serde_json::Value,
    board_id: BoardId,
    origin: Option<UserId>,
}

impl BoardEvent {
    /// Returns the event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the event payload.
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Returns the board this event is routed to.
    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// Returns the user whose mutation produced this event, if known.
    pub fn origin(&self) -> Option<&UserId> {
        self.origin.as_ref()
    }

    /// Returns the client-visible subset of this event.
    pub fn wire(&self) -> WireEvent<'_> {
        WireEvent {
            kind: self.kind,
            payload: &self.payload,
        }
    }

    /// Serializes the client-visible subset to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded.
    pub fn serialize_wire(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.wire())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Constructors, one per kind
    // ─────────────────────────────────────────────────────────────────────────

    /// A board was created.
    pub fn board_created(board_id: BoardId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::BoardCreated,
            payload: json!({ "boardId": board_id }),
            board_id,
            origin,
        }
    }

    /// A board's title or metadata changed.
    pub fn board_updated(board_id: BoardId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::BoardUpdated,
            payload: json!({ "boardId": board_id }),
            board_id,
            origin,
        }
    }

    /// A board was deleted.
    pub fn board_deleted(board_id: BoardId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::BoardDeleted,
            payload: json!({ "boardId": board_id }),
            board_id,
            origin,
        }
    }

    /// A user joined the board's member set.
    pub fn board_member_added(board_id: BoardId, member: &UserId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::BoardMemberAdded,
            payload: json!({ "boardId": board_id, "userId": member }),
            board_id,
            origin,
        }
    }

    /// A user left the board's member set.
    pub fn board_member_removed(
        board_id: BoardId,
        member: &UserId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::BoardMemberRemoved,
            payload: json!({ "boardId": board_id, "userId": member }),
            board_id,
            origin,
        }
    }

    /// A list was created on the board.
    pub fn list_created(board_id: BoardId, list_id: ListId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::ListCreated,
            payload: json!({ "boardId": board_id, "listId": list_id }),
            board_id,
            origin,
        }
    }

    /// A list was renamed or reordered.
    pub fn list_updated(board_id: BoardId, list_id: ListId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::ListUpdated,
            payload: json!({ "boardId": board_id, "listId": list_id }),
            board_id,
            origin,
        }
    }

    /// A list was deleted.
    pub fn list_deleted(board_id: BoardId, list_id: ListId, origin: Option<UserId>) -> Self {
        Self {
            kind: EventKind::ListDeleted,
            payload: json!({ "boardId": board_id, "listId": list_id }),
            board_id,
            origin,
        }
    }

    /// A card was created in a list.
    pub fn card_created(
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardCreated,
            payload: json!({ "listId": list_id, "cardId": card_id }),
            board_id,
            origin,
        }
    }

    /// A card's title or description changed.
    pub fn card_updated(
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardUpdated,
            payload: json!({ "listId": list_id, "cardId": card_id }),
            board_id,
            origin,
        }
    }

    /// A card was deleted.
    pub fn card_deleted(
        board_id: BoardId,
        list_id: ListId,
        card_id: CardId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardDeleted,
            payload: json!({ "listId": list_id, "cardId": card_id }),
            board_id,
            origin,
        }
    }

    /// A card moved within or across lists.
    pub fn card_moved(
        board_id: BoardId,
        card_id: CardId,
        from_list_id: ListId,
        to_list_id: ListId,
        position: Position,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardMoved,
            payload: json!({
                "cardId": card_id,
                "fromListId": from_list_id,
                "toListId": to_list_id,
                "position": position,
            }),
            board_id,
            origin,
        }
    }

    /// A user was assigned to a card.
    pub fn card_assigned(
        board_id: BoardId,
        card_id: CardId,
        assignee: &UserId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardAssigned,
            payload: json!({ "cardId": card_id, "userId": assignee }),
            board_id,
            origin,
        }
    }

    /// A user's assignment was removed from a card.
    pub fn card_unassigned(
        board_id: BoardId,
        card_id: CardId,
        assignee: &UserId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardUnassigned,
            payload: json!({ "cardId": card_id, "userId": assignee }),
            board_id,
            origin,
        }
    }

    /// A collaborator was added to a card.
    pub fn card_collaborator_added(
        board_id: BoardId,
        card_id: CardId,
        collaborator: &UserId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardCollaboratorAdded,
            payload: json!({ "cardId": card_id, "userId": collaborator }),
            board_id,
            origin,
        }
    }

    /// A collaborator was removed from a card.
    pub fn card_collaborator_removed(
        board_id: BoardId,
        card_id: CardId,
        collaborator: &UserId,
        origin: Option<UserId>,
    ) -> Self {
        Self {
            kind: EventKind::CardCollaboratorRemoved,
            payload: json!({ "cardId": card_id, "userId": collaborator }),
            board_id,
            origin,
        }
    }
}

// ============================================
// Wire Shape
// ============================================

/// Client-visible subset of a [`BoardEvent`].
///
/// Exactly two fields cross the wire: `type` and `payload`. The
/// routing fields never do.
#[derive(Debug, Clone, Serialize)]
pub struct WireEvent<'a> {
    #[serde(rename = "type")]
    kind: EventKind,
    payload: &'a serde_json::Value,
}
