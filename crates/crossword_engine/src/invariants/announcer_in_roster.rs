//! Announcer invariant: the announcing slot always names a roster member.

use super::Invariant;
use crate::game::Game;

/// Invariant: the announcer index points into the roster, and the roster
/// and the board map name the same players.
pub struct AnnouncerInRosterInvariant;

impl Invariant<Game> for AnnouncerInRosterInvariant {
    fn holds(game: &Game) -> bool {
        game.announcer < game.players.len()
            && game.players.len() == game.boards.len()
            && game.players.iter().all(|p| game.boards.contains_key(p))
    }

    fn description() -> &'static str {
        "Current announcer is a roster member and every player owns a board"
    }
}
