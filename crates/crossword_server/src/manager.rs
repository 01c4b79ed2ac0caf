//! Game manager: the operations exposed to API layers.
//!
//! Each operation resolves the game through the store and runs the engine
//! inside [`GameStore::update`], so rejected actions never persist.

use crate::store::{GameStore, InMemoryGameStore};
use crossword_engine::{
    Action, ActionKind, ActionOutcome, Board, Game, GameError, GameId, Letter, PlacementOutcome,
    PlayerId, ScoreResult, Scorer,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, instrument, warn};

/// Owns the store and the scorer shared by all games.
#[derive(Debug)]
pub struct GameManager<S = InMemoryGameStore> {
    store: S,
    scorer: Arc<Scorer>,
    max_board_dimension: usize,
    next_id: AtomicU64,
    /// Finished boards never change, so their scores are computed once.
    scores: Mutex<HashMap<(GameId, PlayerId), ScoreResult>>,
}

impl GameManager<InMemoryGameStore> {
    /// Creates a manager backed by a fresh in-memory store.
    pub fn in_memory(scorer: Arc<Scorer>, max_board_dimension: usize) -> Self {
        Self::new(InMemoryGameStore::new(), scorer, max_board_dimension)
    }
}

impl<S: GameStore> GameManager<S> {
    /// Creates a manager over `store`.
    #[instrument(skip(store, scorer))]
    pub fn new(store: S, scorer: Arc<Scorer>, max_board_dimension: usize) -> Self {
        info!("Creating game manager");
        Self {
            store,
            scorer,
            max_board_dimension,
            next_id: AtomicU64::new(1),
            scores: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The shared scorer.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Largest accepted board side.
    pub fn max_board_dimension(&self) -> usize {
        self.max_board_dimension
    }

    /// Ids of all stored games.
    pub fn game_ids(&self) -> Vec<GameId> {
        self.store.ids()
    }

    /// Creates a game and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the dimension is zero or above
    /// the configured maximum, or the roster is empty or has duplicates.
    #[instrument(skip(self, players), fields(player_count = players.len()))]
    pub fn create_game(
        &self,
        players: Vec<PlayerId>,
        board_dimension: usize,
    ) -> Result<GameId, GameError> {
        if board_dimension > self.max_board_dimension {
            let err = GameError::InvalidInput(format!(
                "board dimension {} exceeds the maximum of {}",
                board_dimension, self.max_board_dimension
            ));
            return Err(log_rejection(err));
        }

        let id = GameId::new(format!(
            "game-{}",
            self.next_id.fetch_add(1, Ordering::Relaxed)
        ));
        let game = Game::new(id.clone(), players, board_dimension).map_err(log_rejection)?;
        self.store.insert(game).map_err(log_rejection)?;

        info!(game_id = %id, board_dimension, "Game created");
        Ok(id)
    }

    /// Returns a snapshot of a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub fn game_state(&self, id: &GameId) -> Result<Game, GameError> {
        self.store.get(id)
    }

    /// Returns a copy of one player's board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the game or player is unknown.
    #[instrument(skip(self))]
    pub fn player_board(&self, id: &GameId, player: &PlayerId) -> Result<Board, GameError> {
        let game = self.store.get(id)?;
        game.board(player).cloned()
    }

    /// Announces a letter on behalf of `player`.
    ///
    /// # Errors
    ///
    /// See [`Game::announce`]; also [`GameError::NotFound`] for unknown games.
    #[instrument(skip(self))]
    pub fn submit_announcement(
        &self,
        id: &GameId,
        player: &PlayerId,
        letter: &str,
    ) -> Result<Letter, GameError> {
        self.store
            .update(id, |game| game.announce(player, letter))
            .map_err(log_rejection)
    }

    /// Places the announced letter on `player`'s board.
    ///
    /// # Errors
    ///
    /// See [`Game::place`]; also [`GameError::NotFound`] for unknown games.
    #[instrument(skip(self))]
    pub fn submit_placement(
        &self,
        id: &GameId,
        player: &PlayerId,
        row: usize,
        column: usize,
    ) -> Result<PlacementOutcome, GameError> {
        self.store
            .update(id, |game| game.place(player, row, column))
            .map_err(log_rejection)
    }

    /// Applies any action.
    ///
    /// # Errors
    ///
    /// Same as [`GameManager::submit_announcement`] and
    /// [`GameManager::submit_placement`].
    pub fn submit_action(&self, id: &GameId, action: &Action) -> Result<ActionOutcome, GameError> {
        match action {
            Action::Announce(a) => self
                .submit_announcement(id, &a.player, &a.letter)
                .map(ActionOutcome::Announced),
            Action::Place(p) => self
                .submit_placement(id, &p.player, p.row, p.column)
                .map(ActionOutcome::Placed),
        }
    }

    /// Scores one player's board of a finished game.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if the game or player is unknown
    /// - [`GameError::InvalidAction`] while the game is still running
    #[instrument(skip(self))]
    pub fn player_score(&self, id: &GameId, player: &PlayerId) -> Result<ScoreResult, GameError> {
        let game = self.store.get(id)?;
        let board = game.board(player)?;
        if !game.is_finished() {
            return Err(log_rejection(GameError::invalid_action(
                player,
                ActionKind::Score,
                "the game is not finished yet",
            )));
        }

        let key = (id.clone(), player.clone());
        if let Some(cached) = self.cache().get(&key) {
            debug!("Score served from cache");
            return Ok(cached.clone());
        }

        let result = self.scorer.score_board(board);
        info!(total_score = result.total_score(), "Board scored");
        self.cache().insert(key, result.clone());
        Ok(result)
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, HashMap<(GameId, PlayerId), ScoreResult>> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Logs a rejected operation at a level matching its severity.
fn log_rejection(err: GameError) -> GameError {
    if err.is_fatal() {
        error!(error = %err, kind = %err.kind(), "Game state diverged; action rejected");
    } else {
        warn!(error = %err, kind = %err.kind(), "Action rejected");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_engine::{Dictionary, GameErrorKind, MatcherKind};

    fn manager() -> GameManager {
        let scorer = Scorer::from_dictionary(MatcherKind::Trie, Dictionary::from_words(["at"]));
        GameManager::in_memory(Arc::new(scorer), 4)
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::new(*n)).collect()
    }

    #[test]
    fn test_create_game_validation() {
        let manager = manager();
        for (players, dimension) in [
            (ids(&["a"]), 0),
            (ids(&["a"]), 5),
            (vec![], 2),
            (ids(&["a", "a"]), 2),
        ] {
            let err = manager.create_game(players, dimension).unwrap_err();
            assert_eq!(err.kind(), GameErrorKind::InvalidInput);
        }
        assert!(manager.game_ids().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let manager = manager();
        let first = manager.create_game(ids(&["a"]), 2).unwrap();
        let second = manager.create_game(ids(&["a"]), 2).unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.game_ids().len(), 2);
    }

    #[test]
    fn test_unknown_game_and_player() {
        let manager = manager();
        let missing = GameId::new("missing");
        let a = PlayerId::new("a");
        assert_eq!(manager.game_state(&missing).unwrap_err().kind(), GameErrorKind::NotFound);
        assert_eq!(
            manager.submit_announcement(&missing, &a, "a").unwrap_err().kind(),
            GameErrorKind::NotFound
        );

        let id = manager.create_game(vec![a.clone()], 2).unwrap();
        let stranger = PlayerId::new("z");
        assert_eq!(
            manager.player_board(&id, &stranger).unwrap_err().kind(),
            GameErrorKind::NotFound
        );
        assert_eq!(
            manager.player_score(&id, &stranger).unwrap_err().kind(),
            GameErrorKind::NotFound
        );
    }

    #[test]
    fn test_score_cached_after_finish() {
        let manager = manager();
        let a = PlayerId::new("a");
        let id = manager.create_game(vec![a.clone()], 2).unwrap();
        for (letter, row, column) in [("a", 0, 0), ("t", 0, 1), ("x", 1, 0), ("y", 1, 1)] {
            manager.submit_announcement(&id, &a, letter).unwrap();
            manager.submit_placement(&id, &a, row, column).unwrap();
        }

        let first = manager.player_score(&id, &a).unwrap();
        assert_eq!(*first.total_score(), 4);
        assert_eq!(manager.cache().len(), 1);
        assert_eq!(manager.player_score(&id, &a).unwrap(), first);
    }
}
