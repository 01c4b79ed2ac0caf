//! Turn engine for one crossword game.
//!
//! A round is "announce once, place simultaneously": the current
//! announcer picks a letter, then every player writes it somewhere on
//! their own board. Instead of tracking who has acted, the engine
//! compares each board's fill count against the shared round counter
//! `squares_filled`; the contracts module guards that comparison.

use crate::action::{Action, Announcement, Placement};
use crate::board::{square_count, Board};
use crate::contracts::{AnnounceContract, Contract, PlaceContract};
use crate::error::GameError;
use crate::invariants::{CrosswordInvariants, InvariantSet};
use crate::types::{GameId, Letter, PlayerId, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "status", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Waiting for the current announcer to pick a letter.
    AwaitingAnnouncement,
    /// Waiting for every player to place the announced letter.
    AwaitingPlacement {
        /// Letter announced for this round.
        letter: Letter,
    },
    /// Every board is full. Only score queries follow.
    Finished,
}

impl GameStatus {
    /// Returns the snake_case name of the phase.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// What a successful placement did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Some players still have to place this round's letter.
    AwaitingOthers,
    /// Every player placed; the next announcement is due.
    RoundComplete,
    /// The last round completed and the game is over.
    Finished,
}

/// What a successfully applied [`Action`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A letter was announced.
    Announced(Letter),
    /// A letter was placed.
    Placed(PlacementOutcome),
}

/// Complete state of one game.
///
/// Deserialized games are checked against the game invariants, so a
/// snapshot that could not have come from play is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) status: GameStatus,
    /// Roster order fixes the announcing rotation.
    pub(crate) players: Vec<PlayerId>,
    pub(crate) board_dimension: usize,
    /// Number of completed rounds.
    pub(crate) squares_filled: usize,
    /// Index into `players` of the next announcer.
    pub(crate) announcer: usize,
    pub(crate) boards: BTreeMap<PlayerId, Board>,
}

/// Unchecked wire form of a [`Game`].
#[derive(Deserialize)]
struct GameRecord {
    id: GameId,
    status: GameStatus,
    players: Vec<PlayerId>,
    board_dimension: usize,
    squares_filled: usize,
    announcer: usize,
    boards: BTreeMap<PlayerId, Board>,
}

impl TryFrom<GameRecord> for Game {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        if record.players.is_empty() || record.board_dimension == 0 {
            return Err(GameError::InvalidInput(
                "game snapshot needs players and a positive board dimension".to_string(),
            ));
        }
        square_count(record.board_dimension)?;
        if let Some((player, _)) = record
            .boards
            .iter()
            .find(|(_, b)| b.dimension() != record.board_dimension)
        {
            return Err(GameError::InvalidInput(format!(
                "board of player {} does not match dimension {}",
                player, record.board_dimension
            )));
        }

        let game = Self {
            id: record.id,
            status: record.status,
            players: record.players,
            board_dimension: record.board_dimension,
            squares_filled: record.squares_filled,
            announcer: record.announcer,
            boards: record.boards,
        };
        CrosswordInvariants::check_all(&game).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvalidInput(format!("inconsistent game snapshot: {}", descriptions))
        })?;
        Ok(game)
    }
}

impl Game {
    /// Creates a new game with empty boards, waiting for the first
    /// roster entry to announce.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the roster is empty, holds a
    /// duplicate id, or the dimension is zero or too large to square.
    #[instrument(skip(players), fields(game_id = %id, player_count = players.len()))]
    pub fn new(id: GameId, players: Vec<PlayerId>, board_dimension: usize) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::InvalidInput(
                "a game needs at least one player".to_string(),
            ));
        }
        if board_dimension == 0 {
            return Err(GameError::InvalidInput(
                "board dimension must be positive".to_string(),
            ));
        }
        square_count(board_dimension)?;

        let mut boards = BTreeMap::new();
        for player in &players {
            if boards.insert(player.clone(), Board::new(board_dimension)).is_some() {
                return Err(GameError::InvalidInput(format!(
                    "player {} appears more than once",
                    player
                )));
            }
        }

        debug!(board_dimension, "Game created");
        Ok(Self {
            id,
            status: GameStatus::AwaitingAnnouncement,
            players,
            board_dimension,
            squares_filled: 0,
            announcer: 0,
            boards,
        })
    }

    /// Builds a fresh game and applies `actions` in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first rejected action's error.
    #[instrument(skip(players, actions), fields(game_id = %id, actions = actions.len()))]
    pub fn replay(
        id: GameId,
        players: Vec<PlayerId>,
        board_dimension: usize,
        actions: &[Action],
    ) -> Result<Self, GameError> {
        let mut game = Self::new(id, players, board_dimension)?;
        for action in actions {
            game.apply(action)?;
        }
        Ok(game)
    }

    /// Returns the game id.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Returns the current phase.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Checks whether the game reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Returns the roster in turn order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Returns the board side length.
    pub fn board_dimension(&self) -> usize {
        self.board_dimension
    }

    /// Returns the number of completed rounds.
    pub fn squares_filled(&self) -> usize {
        self.squares_filled
    }

    /// Number of rounds in a full game.
    pub fn total_squares(&self) -> usize {
        self.board_dimension.saturating_mul(self.board_dimension)
    }

    /// Player whose turn it is to announce.
    ///
    /// While placements are pending this is already the *next* announcer.
    pub fn current_announcing_player(&self) -> &PlayerId {
        &self.players[self.announcer]
    }

    /// Letter awaiting placement, if an announcement is outstanding.
    pub fn current_announced_letter(&self) -> Option<Letter> {
        match self.status {
            GameStatus::AwaitingPlacement { letter } => Some(letter),
            _ => None,
        }
    }

    /// Position of a player in the roster.
    pub fn player_index(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Returns a player's board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the player is not in this game.
    pub fn board(&self, player: &PlayerId) -> Result<&Board, GameError> {
        self.boards
            .get(player)
            .ok_or_else(|| GameError::player_not_found(player))
    }

    /// Returns all boards keyed by player.
    pub fn boards(&self) -> &BTreeMap<PlayerId, Board> {
        &self.boards
    }

    /// Checks whether a player already placed this round's letter.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the player is not in this game.
    pub fn has_placed_this_round(&self, player: &PlayerId) -> Result<bool, GameError> {
        Ok(self.board(player)?.filled_squares() == self.squares_filled + 1)
    }

    /// Announces the letter for the next round.
    ///
    /// On success the game waits for placements and the announcing turn
    /// passes to the next roster entry.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if the player is not in this game
    /// - [`GameError::InvalidAction`] outside the announcement phase or
    ///   out of turn
    /// - [`GameError::InvalidInput`] if `letter` is not a single `A`-`Z`
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn announce(&mut self, player: &PlayerId, letter: &str) -> Result<Letter, GameError> {
        let action = Announcement::new(player.clone(), letter);
        let letter = AnnounceContract::pre(self, &action)?;

        let mut next = self.clone();
        next.status = GameStatus::AwaitingPlacement { letter };
        next.announcer = (next.announcer + 1) % next.players.len();

        AnnounceContract::post(self, &next)?;
        *self = next;

        info!(
            player = %player,
            letter = %letter,
            next_announcer = %self.current_announcing_player(),
            "Letter announced"
        );
        Ok(letter)
    }

    /// Places the announced letter on the player's board.
    ///
    /// When this completes the round the shared counter advances, and the
    /// game either finishes or waits for the next announcement.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if the player is not in this game
    /// - [`GameError::InvalidAction`] outside the placement phase, when the
    ///   player already placed this round, or the square is occupied
    /// - [`GameError::InvalidInput`] for off-board coordinates
    /// - [`GameError::UnexpectedGameLogic`] if board fill counts diverged
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn place(
        &mut self,
        player: &PlayerId,
        row: usize,
        column: usize,
    ) -> Result<PlacementOutcome, GameError> {
        let action = Placement::new(player.clone(), row, column);
        let letter = PlaceContract::pre(self, &action)?;

        let mut next = self.clone();
        let board = next
            .boards
            .get_mut(player)
            .ok_or_else(|| GameError::player_not_found(player))?;
        board.set(row, column, Square::Filled(letter))?;
        let outcome = next.complete_round_if_ready();

        PlaceContract::post(self, &next)?;
        *self = next;

        debug!(player = %player, row, column, letter = %letter, ?outcome, "Letter placed");
        Ok(outcome)
    }

    /// Applies any action.
    ///
    /// # Errors
    ///
    /// Same as [`Game::announce`] and [`Game::place`].
    pub fn apply(&mut self, action: &Action) -> Result<ActionOutcome, GameError> {
        match action {
            Action::Announce(a) => self.announce(&a.player, &a.letter).map(ActionOutcome::Announced),
            Action::Place(p) => self
                .place(&p.player, p.row, p.column)
                .map(ActionOutcome::Placed),
        }
    }

    /// Advances the round counter once every board holds one more letter.
    fn complete_round_if_ready(&mut self) -> PlacementOutcome {
        let target = self.squares_filled + 1;
        if !self.boards.values().all(|b| b.filled_squares() == target) {
            return PlacementOutcome::AwaitingOthers;
        }

        self.squares_filled = target;
        if self.squares_filled == self.total_squares() {
            self.status = GameStatus::Finished;
            info!(game_id = %self.id, rounds = self.squares_filled, "Game finished");
            PlacementOutcome::Finished
        } else {
            self.status = GameStatus::AwaitingAnnouncement;
            info!(game_id = %self.id, squares_filled = self.squares_filled, "Round complete");
            PlacementOutcome::RoundComplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameErrorKind;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::new(*n)).collect()
    }

    fn two_player_game(dimension: usize) -> Game {
        Game::new(GameId::new("g"), ids(&["p0", "p1"]), dimension).unwrap()
    }

    #[test]
    fn test_new_game_defaults() {
        let game = two_player_game(3);
        assert_eq!(game.status(), GameStatus::AwaitingAnnouncement);
        assert_eq!(game.current_announcing_player().as_str(), "p0");
        assert_eq!(game.current_announced_letter(), None);
        assert_eq!(game.squares_filled(), 0);
        assert_eq!(game.total_squares(), 9);
        assert_eq!(game.boards().len(), 2);
    }

    #[test]
    fn test_new_game_rejects_bad_setup() {
        let err = Game::new(GameId::new("g"), vec![], 3).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput);
        let err = Game::new(GameId::new("g"), ids(&["a"]), 0).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput);
        let err = Game::new(GameId::new("g"), ids(&["a", "a"]), 2).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput);
    }

    #[test]
    fn test_announce_moves_to_placement_and_rotates() {
        let mut game = two_player_game(2);
        let letter = game.announce(&PlayerId::new("p0"), "a").unwrap();
        assert_eq!(letter.as_char(), 'A');
        assert_eq!(game.status(), GameStatus::AwaitingPlacement { letter });
        assert_eq!(game.current_announcing_player().as_str(), "p1");
        assert_eq!(game.current_announced_letter(), Some(letter));
    }

    #[test]
    fn test_failed_action_leaves_game_untouched() {
        let mut game = two_player_game(2);
        let before = game.clone();
        assert!(game.announce(&PlayerId::new("p1"), "A").is_err());
        assert!(game.announce(&PlayerId::new("p0"), "AB").is_err());
        assert!(game.place(&PlayerId::new("p0"), 0, 0).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_round_completes_only_when_everyone_placed() {
        let mut game = two_player_game(2);
        game.announce(&PlayerId::new("p0"), "A").unwrap();

        let outcome = game.place(&PlayerId::new("p0"), 0, 0).unwrap();
        assert_eq!(outcome, PlacementOutcome::AwaitingOthers);
        assert_eq!(game.squares_filled(), 0);
        assert!(game.has_placed_this_round(&PlayerId::new("p0")).unwrap());
        assert!(!game.has_placed_this_round(&PlayerId::new("p1")).unwrap());

        let outcome = game.place(&PlayerId::new("p1"), 1, 1).unwrap();
        assert_eq!(outcome, PlacementOutcome::RoundComplete);
        assert_eq!(game.squares_filled(), 1);
        assert_eq!(game.status(), GameStatus::AwaitingAnnouncement);
        assert_eq!(game.current_announcing_player().as_str(), "p1");
    }

    #[test]
    fn test_single_square_game_finishes() {
        let mut game = Game::new(GameId::new("g"), ids(&["solo"]), 1).unwrap();
        game.announce(&PlayerId::new("solo"), "z").unwrap();
        let outcome = game.place(&PlayerId::new("solo"), 0, 0).unwrap();
        assert_eq!(outcome, PlacementOutcome::Finished);
        assert!(game.is_finished());
        assert_eq!(game.status().as_str(), "finished");
        assert!(game.announce(&PlayerId::new("solo"), "a").is_err());
    }

    #[test]
    fn test_apply_and_replay() {
        let p0 = PlayerId::new("p0");
        let actions = vec![
            Action::Announce(Announcement::new(p0.clone(), "c")),
            Action::Place(Placement::new(p0.clone(), 0, 0)),
        ];
        let game = Game::replay(GameId::new("r"), vec![p0.clone()], 2, &actions).unwrap();
        assert_eq!(game.squares_filled(), 1);
        assert_eq!(
            game.board(&p0).unwrap().get(0, 0),
            Some(Square::Filled(Letter::parse("C").unwrap()))
        );

        let bad = vec![Action::Place(Placement::new(p0.clone(), 0, 0))];
        assert!(Game::replay(GameId::new("r"), vec![p0], 2, &bad).is_err());
    }

    #[test]
    fn test_snapshot_serializes_status_tag() {
        let mut game = two_player_game(2);
        game.announce(&PlayerId::new("p0"), "e").unwrap();
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["status"]["status"], "awaiting_placement");
        assert_eq!(json["status"]["letter"], "E");
        let back: Game = serde_json::from_value(json).unwrap();
        assert_eq!(back, game);
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let err = Game::new(GameId::new("g"), ids(&["a"]), usize::MAX).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput);
        let err = Game::new(GameId::new("g"), ids(&["a"]), 1usize << (usize::BITS / 2)).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::InvalidInput);
    }

    #[test]
    fn test_snapshot_with_bad_announcer_rejected() {
        let mut json = serde_json::to_value(two_player_game(2)).unwrap();
        json["announcer"] = serde_json::json!(5);
        let err = serde_json::from_value::<Game>(json).unwrap_err();
        assert!(err.to_string().contains("inconsistent game snapshot"));
    }

    #[test]
    fn test_snapshot_with_mismatched_boards_rejected() {
        let mut json = serde_json::to_value(two_player_game(2)).unwrap();
        json["board_dimension"] = serde_json::json!(3);
        assert!(serde_json::from_value::<Game>(json).is_err());

        let mut json = serde_json::to_value(two_player_game(2)).unwrap();
        json["squares_filled"] = serde_json::json!(1);
        assert!(serde_json::from_value::<Game>(json).is_err());

        let mut json = serde_json::to_value(two_player_game(2)).unwrap();
        json["players"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Game>(json).is_err());
    }
}
