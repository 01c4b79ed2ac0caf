//! Round consistency: boards never drift more than one placement apart.

use super::Invariant;
use crate::game::{Game, GameStatus};

/// Invariant: every board's fill count tracks the round counter.
///
/// While placements are pending a board may be one letter ahead of
/// `squares_filled`. In every other phase all boards hold exactly
/// `squares_filled` letters.
pub struct RoundConsistentInvariant;

impl Invariant<Game> for RoundConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let rounds = game.squares_filled;
        game.boards.values().all(|board| {
            let filled = board.filled_squares();
            match game.status {
                GameStatus::AwaitingPlacement { .. } => filled == rounds || filled == rounds + 1,
                GameStatus::AwaitingAnnouncement | GameStatus::Finished => filled == rounds,
            }
        })
    }

    fn description() -> &'static str {
        "Board fill counts stay within one placement of the round counter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameId, Letter, PlayerId, Square};

    fn game() -> Game {
        Game::new(GameId::new("g"), vec![PlayerId::new("a"), PlayerId::new("b")], 3).unwrap()
    }

    #[test]
    fn test_new_game_holds() {
        assert!(RoundConsistentInvariant::holds(&game()));
    }

    #[test]
    fn test_partial_round_holds() {
        let mut game = game();
        game.announce(&PlayerId::new("a"), "Q").unwrap();
        game.place(&PlayerId::new("a"), 2, 2).unwrap();
        assert!(RoundConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_extra_letter_between_rounds_violates() {
        let mut game = game();
        let board = game.boards.get_mut(&PlayerId::new("b")).unwrap();
        board.set(0, 0, Square::Filled(Letter::parse("Q").unwrap())).unwrap();
        assert!(!RoundConsistentInvariant::holds(&game));
    }
}
