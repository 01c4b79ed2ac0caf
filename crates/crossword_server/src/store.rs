//! Game storage collaborator.
//!
//! The engine never locks anything; serializing mutations to one game is
//! the store's job. [`GameStore::update`] runs a mutation on a working
//! copy and commits it only when the mutation succeeds.

use crossword_engine::{Game, GameError, GameId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Store-and-retrieve-by-id contract for games.
pub trait GameStore: Send + Sync {
    /// Adds a new game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the id is already taken.
    fn insert(&self, game: Game) -> Result<(), GameError>;

    /// Returns a snapshot of a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for unknown ids.
    fn get(&self, id: &GameId) -> Result<Game, GameError>;

    /// Atomic read-modify-write.
    ///
    /// `mutation` sees a working copy; the copy replaces the stored game
    /// only if `mutation` returns `Ok`. Concurrent updates of the same
    /// game run one after another.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for unknown ids, or whatever
    /// `mutation` returns.
    fn update<T, F>(&self, id: &GameId, mutation: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>;

    /// Lists stored game ids.
    fn ids(&self) -> Vec<GameId>;
}

type GameSlot = Arc<Mutex<Game>>;

/// Process-local store with one mutex per game.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<Mutex<HashMap<GameId, GameSlot>>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.index().len()
    }

    /// Checks whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.index().is_empty()
    }

    fn index(&self) -> MutexGuard<'_, HashMap<GameId, GameSlot>> {
        // A panic inside a mutation never leaves a half-written game behind,
        // so a poisoned lock still guards consistent data.
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, id: &GameId) -> Result<GameSlot, GameError> {
        self.index()
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::game_not_found(id))
    }
}

impl GameStore for InMemoryGameStore {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn insert(&self, game: Game) -> Result<(), GameError> {
        let mut games = self.index();
        if games.contains_key(game.id()) {
            return Err(GameError::InvalidInput(format!(
                "game {} already exists",
                game.id()
            )));
        }
        games.insert(game.id().clone(), Arc::new(Mutex::new(game)));
        debug!(count = games.len(), "Game stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &GameId) -> Result<Game, GameError> {
        let slot = self.slot(id)?;
        let game = slot.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Ok(game)
    }

    #[instrument(skip(self, mutation))]
    fn update<T, F>(&self, id: &GameId, mutation: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        // The index lock is released before the game lock is taken, so a
        // long mutation on one game does not block the others.
        let slot = self.slot(id)?;
        let mut stored = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let mut working = stored.clone();
        let value = mutation(&mut working)?;
        *stored = working;
        debug!("Game updated");
        Ok(value)
    }

    fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.index().keys().cloned().collect();
        ids.sort();
        ids
    }
}
