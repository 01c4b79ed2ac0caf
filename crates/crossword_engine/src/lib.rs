//! Crossword engine - turn rules and dictionary scoring
//!
//! Players share a rotation of letter announcements. Each round the
//! announcer calls a letter and every player writes it on their own
//! N x N board. When all boards are full, each board is scored by
//! finding dictionary words along its rows and columns.
//!
//! # Architecture
//!
//! - **Game**: Turn engine guarded by contracts and invariants
//! - **Scoring**: Dictionary, matchers, per-line selection, board totals
//! - **Types**: Ids, letters, squares and boards
//!
//! # Example
//!
//! ```
//! use crossword_engine::{Dictionary, Game, GameId, MatcherKind, PlayerId, Scorer};
//!
//! let alice = PlayerId::new("alice");
//! let mut game = Game::new(GameId::new("demo"), vec![alice.clone()], 1)?;
//! game.announce(&alice, "a")?;
//! game.place(&alice, 0, 0)?;
//! assert!(game.is_finished());
//!
//! let scorer = Scorer::from_dictionary(MatcherKind::Trie, Dictionary::from_words(["at"]));
//! assert_eq!(*scorer.score_board(game.board(&alice)?).total_score(), 0);
//! # Ok::<(), crossword_engine::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod contracts;
mod error;
mod game;
mod types;

// Public module declarations
pub mod invariants;
pub mod scoring;

// Crate-level exports - Actions
pub use action::{Action, Announcement, Placement};

// Crate-level exports - Board
pub use board::{square_count, Board, EMPTY_MARK};

// Crate-level exports - Contracts
pub use contracts::{
    AnnounceContract, AnnouncementPhase, Contract, NotYetPlaced, PlaceContract, PlacementPhase,
    PlayerInRoster, PlayersTurn, RoundWindow, SquareIsEmpty, WithinBoard,
};

// Crate-level exports - Errors
pub use error::{ActionKind, GameError, GameErrorKind, ObjectKind};

// Crate-level exports - Turn engine
pub use game::{ActionOutcome, Game, GameStatus, PlacementOutcome};

// Crate-level exports - Scoring
pub use scoring::{Dictionary, DictionaryError, Line, Matcher, MatcherKind, ScoreResult, ScoredWord, Scorer};

// Crate-level exports - Primitive types
pub use types::{Direction, GameId, Letter, PlayerId, Square};
