//! Structured error types for the turn engine.
//!
//! Every engine failure is a [`GameError`] with a stable
//! [`GameErrorKind`] tag, so callers can map errors onto their own
//! transport codes without parsing messages.

use crate::types::{GameId, PlayerId};
use serde::{Deserialize, Serialize};

/// Stable classification of a [`GameError`].
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
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameErrorKind {
    /// Malformed request data.
    InvalidInput,
    /// Unknown game or player.
    NotFound,
    /// Operation not legal in the current state.
    InvalidAction,
    /// An internal invariant was violated.
    #[serde(rename = "unexpected_game_logic_error")]
    #[strum(serialize = "unexpected_game_logic_error")]
    UnexpectedGameLogic,
}

/// Kind of object a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ObjectKind {
    /// A game.
    Game,
    /// A player within a game.
    Player,
}

/// Player action that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Announcing a letter.
    Announce,
    /// Placing the announced letter.
    Place,
    /// Requesting a score.
    Score,
}

/// Error returned by every engine and manager operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Malformed request data (bad letter, out-of-range coordinates, ...).
    #[display("invalid input: {_0}")]
    InvalidInput(String),

    /// Unknown game or player.
    #[display("{kind} \"{id}\" not found")]
    NotFound {
        /// What was being looked up.
        kind: ObjectKind,
        /// The id that was not found.
        id: String,
    },

    /// Operation not legal in the current state.
    #[display("invalid action \"{action}\" for player {player}: {reason}")]
    InvalidAction {
        /// Player who attempted the action.
        player: PlayerId,
        /// Action that was attempted.
        action: ActionKind,
        /// Why it was rejected.
        reason: String,
    },

    /// Internal invariant violated; the game state is corrupt.
    #[display("unexpected game logic error: {_0}")]
    UnexpectedGameLogic(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Game with the given id does not exist.
    pub fn game_not_found(id: &GameId) -> Self {
        Self::NotFound {
            kind: ObjectKind::Game,
            id: id.to_string(),
        }
    }

    /// Player is not part of the game.
    pub fn player_not_found(id: &PlayerId) -> Self {
        Self::NotFound {
            kind: ObjectKind::Player,
            id: id.to_string(),
        }
    }

    /// Action rejected for the given player.
    pub fn invalid_action(player: &PlayerId, action: ActionKind, reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            player: player.clone(),
            action,
            reason: reason.into(),
        }
    }

    /// Returns the stable classification of this error.
    pub fn kind(&self) -> GameErrorKind {
        match self {
            Self::InvalidInput(_) => GameErrorKind::InvalidInput,
            Self::NotFound { .. } => GameErrorKind::NotFound,
            Self::InvalidAction { .. } => GameErrorKind::InvalidAction,
            Self::UnexpectedGameLogic(_) => GameErrorKind::UnexpectedGameLogic,
        }
    }

    /// Fatal errors signal a corrupted game rather than a user mistake.
    pub fn is_fatal(&self) -> bool {
        self.kind() == GameErrorKind::UnexpectedGameLogic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_tags_are_stable() {
        assert_eq!(GameErrorKind::InvalidInput.to_string(), "invalid_input");
        assert_eq!(GameErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(GameErrorKind::InvalidAction.to_string(), "invalid_action");
        assert_eq!(
            GameErrorKind::UnexpectedGameLogic.to_string(),
            "unexpected_game_logic_error"
        );
        assert_eq!(
            GameErrorKind::from_str("unexpected_game_logic_error").unwrap(),
            GameErrorKind::UnexpectedGameLogic
        );
        assert_eq!(
            serde_json::to_string(&GameErrorKind::UnexpectedGameLogic).unwrap(),
            "\"unexpected_game_logic_error\""
        );
    }

    #[test]
    fn test_messages() {
        let err = GameError::player_not_found(&PlayerId::new("alice"));
        assert_eq!(err.to_string(), "player \"alice\" not found");
        assert_eq!(err.kind(), GameErrorKind::NotFound);

        let err = GameError::invalid_action(&PlayerId::new("bob"), ActionKind::Place, "not your turn");
        assert_eq!(
            err.to_string(),
            "invalid action \"place\" for player bob: not your turn"
        );
        assert!(!err.is_fatal());
        assert!(GameError::UnexpectedGameLogic("boards diverged".into()).is_fatal());
    }
}
