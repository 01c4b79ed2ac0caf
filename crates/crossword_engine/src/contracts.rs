//! Contract-based validation for the turn engine.
//!
//! Contracts define correctness through preconditions and postconditions,
//! Hoare-style: {P} action {Q}. Preconditions reject bad requests before
//! anything changes; postconditions re-check the game invariants on the
//! candidate next state so a corrupt transition is never committed.

use crate::action::{Announcement, Placement};
use crate::error::{ActionKind, GameError};
use crate::game::{Game, GameStatus};
use crate::invariants::{CrosswordInvariants, InvariantSet};
use crate::types::{Letter, PlayerId};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Value established by the precondition and needed by the transition.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Shared Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the acting player is on the roster.
pub struct PlayerInRoster;

impl PlayerInRoster {
    /// Fails with `NotFound` for strangers.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player: &PlayerId) -> Result<(), GameError> {
        if game.boards.contains_key(player) {
            Ok(())
        } else {
            Err(GameError::player_not_found(player))
        }
    }
}

/// Precondition: every board is inside the round's +0/+1 fill window.
///
/// A failure here means the stored game is corrupt, not that the player
/// did something wrong.
pub struct RoundWindow;

impl RoundWindow {
    /// Fails with `UnexpectedGameLogic` naming the first diverged board.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        for (player, board) in &game.boards {
            let filled = board.filled_squares();
            if filled != game.squares_filled && filled != game.squares_filled + 1 {
                warn!(%player, filled, squares_filled = game.squares_filled, "Board diverged from round counter");
                return Err(GameError::UnexpectedGameLogic(format!(
                    "board of player {} has {} filled squares but {} rounds are complete",
                    player, filled, game.squares_filled
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Announce Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is waiting for an announcement.
pub struct AnnouncementPhase;

impl AnnouncementPhase {
    /// Fails with `InvalidAction` in any other phase.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Announcement) -> Result<(), GameError> {
        match game.status {
            GameStatus::AwaitingAnnouncement => Ok(()),
            other => Err(GameError::invalid_action(
                &action.player,
                ActionKind::Announce,
                format!("game is {}, not awaiting an announcement", other.as_str()),
            )),
        }
    }
}

/// Precondition: it is this player's turn to announce.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with `InvalidAction` naming the expected announcer.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Announcement) -> Result<(), GameError> {
        let expected = game.current_announcing_player();
        if &action.player == expected {
            Ok(())
        } else {
            Err(GameError::invalid_action(
                &action.player,
                ActionKind::Announce,
                format!("it is {}'s turn to announce", expected),
            ))
        }
    }
}

/// Contract for announcements.
///
/// Preconditions, in order:
/// - player is on the roster
/// - game awaits an announcement
/// - it is the player's turn
/// - the letter is a single `A`-`Z`
///
/// Postconditions:
/// - game invariants hold
/// - the announcer advanced by exactly one roster slot
pub struct AnnounceContract;

impl Contract<Game, Announcement> for AnnounceContract {
    type Checked = Letter;

    fn pre(game: &Game, action: &Announcement) -> Result<Letter, GameError> {
        PlayerInRoster::check(game, &action.player)?;
        AnnouncementPhase::check(game, action)?;
        PlayersTurn::check(game, action)?;
        Letter::parse(&action.letter)
    }

    fn post(before: &Game, after: &Game) -> Result<(), GameError> {
        check_invariants(after)?;
        let expected = (before.announcer + 1) % before.players.len();
        if after.announcer != expected {
            return Err(GameError::UnexpectedGameLogic(format!(
                "announcer moved from slot {} to {}, expected {}",
                before.announcer, after.announcer, expected
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Place Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is waiting for placements.
pub struct PlacementPhase;

impl PlacementPhase {
    /// Returns the announced letter, or fails with `InvalidAction`.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Placement) -> Result<Letter, GameError> {
        match game.status {
            GameStatus::AwaitingPlacement { letter } => Ok(letter),
            other => Err(GameError::invalid_action(
                &action.player,
                ActionKind::Place,
                format!("game is {}, not awaiting placements", other.as_str()),
            )),
        }
    }
}

/// Precondition: the coordinates lie on the board.
pub struct WithinBoard;

impl WithinBoard {
    /// Fails with `InvalidInput` for off-board coordinates.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Placement) -> Result<(), GameError> {
        let n = game.board_dimension;
        if action.row < n && action.column < n {
            Ok(())
        } else {
            Err(GameError::InvalidInput(format!(
                "position ({}, {}) is outside the {}x{} board",
                action.row, action.column, n, n
            )))
        }
    }
}

/// Precondition: the player has not placed this round's letter yet.
pub struct NotYetPlaced;

impl NotYetPlaced {
    /// Fails with `InvalidAction` on a second placement in one round.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Placement) -> Result<(), GameError> {
        if game.has_placed_this_round(&action.player)? {
            Err(GameError::invalid_action(
                &action.player,
                ActionKind::Place,
                "already placed a letter this round",
            ))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with `InvalidAction` for an occupied square.
    #[instrument(skip(game))]
    pub fn check(game: &Game, action: &Placement) -> Result<(), GameError> {
        if game.board(&action.player)?.is_empty(action.row, action.column) {
            Ok(())
        } else {
            Err(GameError::invalid_action(
                &action.player,
                ActionKind::Place,
                format!("square ({}, {}) is already occupied", action.row, action.column),
            ))
        }
    }
}

/// Contract for placements.
///
/// Preconditions, in order:
/// - player is on the roster
/// - game awaits placements
/// - coordinates are on the board
/// - every board is inside the round window
/// - player has not placed this round
/// - the square is empty
///
/// Postconditions:
/// - game invariants hold
/// - exactly one square was filled
/// - the round counter advanced by at most one
pub struct PlaceContract;

impl Contract<Game, Placement> for PlaceContract {
    type Checked = Letter;

    fn pre(game: &Game, action: &Placement) -> Result<Letter, GameError> {
        PlayerInRoster::check(game, &action.player)?;
        let letter = PlacementPhase::check(game, action)?;
        WithinBoard::check(game, action)?;
        RoundWindow::check(game)?;
        NotYetPlaced::check(game, action)?;
        SquareIsEmpty::check(game, action)?;
        Ok(letter)
    }

    fn post(before: &Game, after: &Game) -> Result<(), GameError> {
        check_invariants(after)?;
        let filled = |g: &Game| g.boards.values().map(|b| b.filled_squares()).sum::<usize>();
        if filled(after) != filled(before) + 1 {
            return Err(GameError::UnexpectedGameLogic(format!(
                "placement changed filled squares from {} to {}",
                filled(before),
                filled(after)
            )));
        }
        if after.squares_filled != before.squares_filled
            && after.squares_filled != before.squares_filled + 1
        {
            return Err(GameError::UnexpectedGameLogic(format!(
                "round counter jumped from {} to {}",
                before.squares_filled, after.squares_filled
            )));
        }
        Ok(())
    }
}

/// Runs the full invariant set, folding violations into one error.
fn check_invariants(game: &Game) -> Result<(), GameError> {
    CrosswordInvariants::check_all(game).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        GameError::UnexpectedGameLogic(format!("postcondition failed: {}", descriptions))
    })
}
