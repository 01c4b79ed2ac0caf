//! Crossword server - game manager, storage and configuration
//!
//! Wraps the pure engine in the operations an API layer calls: create a
//! game, submit announcements and placements, read state and request
//! scores once a game is finished.
//!
//! # Architecture
//!
//! - **Store**: [`GameStore`] with atomic read-modify-write per game
//! - **Manager**: [`GameManager`] validating requests and caching scores
//! - **Config**: [`ServerConfig`] from TOML and environment
//! - **Script**: [`ReplayScript`] for driving whole games from a file

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod manager;
mod script;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig, DICTIONARY_ENV, MATCHER_ENV};

// Crate-level exports - Game management
pub use manager::GameManager;

// Crate-level exports - Replay scripts
pub use script::{ReplayReport, ReplayScript, ScriptError};

// Crate-level exports - Storage
pub use store::{GameStore, InMemoryGameStore};
