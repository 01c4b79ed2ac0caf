//! First-class player actions.
//!
//! Actions are domain events, not side effects. They carry the player's
//! raw intent (the letter is kept as typed) so validation happens in one
//! place, the contracts, and so they can be serialized for replay.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player announcing the letter everyone places this round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Announcement {
    /// The announcing player.
    pub player: PlayerId,
    /// The letter as submitted, before validation.
    pub letter: String,
}

impl Announcement {
    /// Creates a new announcement.
    #[instrument(skip(player, letter))]
    pub fn new(player: PlayerId, letter: impl Into<String>) -> Self {
        Self {
            player,
            letter: letter.into(),
        }
    }
}

/// A player placing the announced letter on their own board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The placing player.
    pub player: PlayerId,
    /// Target row (0-based).
    pub row: usize,
    /// Target column (0-based).
    pub column: usize,
}

impl Placement {
    /// Creates a new placement.
    #[instrument(skip(player))]
    pub fn new(player: PlayerId, row: usize, column: usize) -> Self {
        Self {
            player,
            row,
            column,
        }
    }
}

/// Any action accepted by the turn engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Announce a letter.
    Announce(Announcement),
    /// Place the announced letter.
    Place(Placement),
}

impl Action {
    /// Shorthand for an [`Announcement`].
    pub fn announce(player: PlayerId, letter: impl Into<String>) -> Self {
        Action::Announce(Announcement::new(player, letter))
    }

    /// Shorthand for a [`Placement`].
    pub fn place(player: PlayerId, row: usize, column: usize) -> Self {
        Action::Place(Placement::new(player, row, column))
    }

    /// Returns the acting player.
    pub fn player(&self) -> &PlayerId {
        match self {
            Action::Announce(a) => &a.player,
            Action::Place(p) => &p.player,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Announce(a) => write!(f, "{} announces {:?}", a.player, a.letter),
            Action::Place(p) => write!(f, "{} places at ({}, {})", p.player, p.row, p.column),
        }
    }
}
