//! Error type shared by all mutation handlers.

use thiserror::Error;

use crate::domain::foundation::{CardId, ErrorCode, ListId, ValidationError};
use crate::domain::ordering::PositionError;
use crate::ports::StoreError;

/// Failure of a board mutation.
///
/// Collapses domain validation, engine bounds checks, and storage
/// failures into the one error surface the service boundary maps to
/// responses.
#[derive(Debug, Error)]
pub enum MutationError {
    /// The referenced list does not exist.
    #[error("List {0} not found")]
    ListNotFound(ListId),

    /// The referenced card does not exist.
    #[error("Card {0} not found")]
    CardNotFound(CardId),

    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested target position lies outside the valid range.
    #[error("Target position {target} is out of bounds (valid range is 1..={max})")]
    PositionOutOfBounds { target: u32, max: u32 },

    /// The storage backend failed; nothing was persisted.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl MutationError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ListNotFound(_) => ErrorCode::ListNotFound,
            Self::CardNotFound(_) => ErrorCode::CardNotFound,
            Self::Validation(ValidationError::EmptyField { .. }) => ErrorCode::EmptyField,
            Self::Validation(ValidationError::OutOfRange { .. }) => ErrorCode::OutOfRange,
            Self::PositionOutOfBounds { .. } => ErrorCode::PositionOutOfBounds,
            Self::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<PositionError> for MutationError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::OutOfBounds { target, max } => {
                Self::PositionOutOfBounds { target, max }
            }
            PositionError::Store(e) => Self::Storage(e),
        }
    }
}
