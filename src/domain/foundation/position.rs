//! Position value object (1-based ordering index).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A 1-based position within an ordered collection.
///
/// Every parent keeps its children at positions 1..=N with no gaps and
/// no duplicates, so `Position` can never hold zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// The head of a sequence.
    pub const FIRST: Self = Self(1);

    /// Creates a new Position, raising zero to 1.
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Creates a Position, returning error if zero.
    ///
    /// Use this for externally supplied values; a zero target must be
    /// rejected, not clamped.
    pub fn try_new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range("position", 1, i32::MAX, 0));
        }
        Ok(Self(value))
    }

    /// Returns the raw 1-based index.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the position immediately after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
