//! Core domain types for the crossword game.

use crate::error::GameError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Unique identifier for a game.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Creates a game id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a player.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single uppercase letter `A`-`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Parses an announced letter.
    ///
    /// The input is upper-cased first and must then be exactly one
    /// character in `A`-`Z`. Surrounding whitespace is not stripped.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] for anything else.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let upper = input.to_uppercase();
        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok(Self(c)),
            _ => Err(GameError::InvalidInput(format!(
                "letter must be a single character A-Z, got {:?}",
                input
            ))),
        }
    }

    /// Returns the letter as a `char`.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(Self(upper))
        } else {
            Err(GameError::InvalidInput(format!(
                "letter must be a single character A-Z, got {:?}",
                c
            )))
        }
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.0
    }
}

/// A square on a player's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No letter placed yet.
    #[default]
    Empty,
    /// Square holding a placed letter.
    Filled(Letter),
}

impl Square {
    /// Returns the letter in this square, if any.
    pub fn letter(self) -> Option<Letter> {
        match self {
            Square::Empty => None,
            Square::Filled(letter) => Some(letter),
        }
    }

    /// Checks if the square is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }
}

/// Orientation of a board line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Read left to right along a row.
    Horizontal,
    /// Read top to bottom along a column.
    Vertical,
}
