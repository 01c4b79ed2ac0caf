//! Replay scripts: a roster, a board size and an ordered list of actions.
//!
//! ```toml
//! players = ["alice", "bob"]
//! board_dimension = 2
//!
//! [[actions]]
//! kind = "announce"
//! player = "alice"
//! letter = "a"
//!
//! [[actions]]
//! kind = "place"
//! player = "alice"
//! row = 0
//! column = 0
//! ```

use crate::manager::GameManager;
use crate::store::GameStore;
use crossword_engine::{Action, Game, GameError, PlayerId, ScoreResult};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// A scripted game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ReplayScript {
    /// Roster in turn order.
    players: Vec<PlayerId>,
    /// Board side; the configured default when absent.
    #[serde(default)]
    board_dimension: Option<usize>,
    /// Actions applied in order.
    #[serde(default)]
    actions: Vec<Action>,
}

/// Final state of a replayed game.
#[derive(Debug, Clone, Getters, Serialize, new)]
pub struct ReplayReport {
    /// The game after the last action.
    game: Game,
    /// Scores per player, present once the game is finished.
    scores: BTreeMap<PlayerId, ScoreResult>,
}

impl ReplayScript {
    /// Loads a script from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScriptError::new(format!("Failed to read script: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = toml::from_str(content)
            .map_err(|e| ScriptError::new(format!("Failed to parse script: {}", e)))?;
        debug!(
            players = script.players.len(),
            actions = script.actions.len(),
            "Script parsed"
        );
        Ok(script)
    }

    /// Runs the script through `manager`.
    ///
    /// Stops at the first rejected action.
    ///
    /// # Errors
    ///
    /// Returns the [`GameError`] of game creation or of the first rejected
    /// action.
    #[instrument(skip(self, manager), fields(actions = self.actions.len()))]
    pub fn run<S: GameStore>(
        &self,
        manager: &GameManager<S>,
        default_dimension: usize,
    ) -> Result<ReplayReport, GameError> {
        let dimension = self.board_dimension.unwrap_or(default_dimension);
        let id = manager.create_game(self.players.clone(), dimension)?;

        for (step, action) in self.actions.iter().enumerate() {
            if let Err(e) = manager.submit_action(&id, action) {
                warn!(step, %action, "Replay stopped");
                return Err(e);
            }
        }

        let game = manager.game_state(&id)?;
        let mut scores = BTreeMap::new();
        if game.is_finished() {
            for player in game.players() {
                scores.insert(player.clone(), manager.player_score(&id, player)?);
            }
        }
        info!(game_id = %id, status = game.status().as_str(), "Replay complete");
        Ok(ReplayReport::new(game, scores))
    }
}

/// Script loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Script error: {} at {}:{}", message, file, line)]
pub struct ScriptError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScriptError {
    /// Creates a new script error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
