//! Termination invariant: the round counter is bounded by the board size.

use super::Invariant;
use crate::game::{Game, GameStatus};

/// Invariant: `squares_filled <= N²`, and the game is finished exactly
/// when every square of every board has been played.
pub struct SquaresFilledBoundedInvariant;

impl Invariant<Game> for SquaresFilledBoundedInvariant {
    fn holds(game: &Game) -> bool {
        let total = game.total_squares();
        game.squares_filled <= total
            && (game.status == GameStatus::Finished) == (game.squares_filled == total)
    }

    fn description() -> &'static str {
        "Game finishes exactly when the round counter reaches the board size"
    }
}
