//! Server configuration.
//!
//! Values come from a TOML file, then environment variables, then
//! command-line flags, each layer overriding the one before.

use crossword_engine::{Dictionary, DictionaryError, MatcherKind, Scorer};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::dictionary_path`].
pub const DICTIONARY_ENV: &str = "CROSSWORD_DICTIONARY";

/// Environment variable overriding [`ServerConfig::matcher`].
pub const MATCHER_ENV: &str = "CROSSWORD_MATCHER";

/// Configuration for the game manager and binary.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Line-delimited word list used for scoring.
    #[serde(default)]
    dictionary_path: Option<PathBuf>,

    /// Matcher implementation (trie or substring).
    #[serde(default)]
    matcher: MatcherKind,

    /// Largest board side accepted by `create_game`.
    #[serde(default = "default_max_board_dimension")]
    max_board_dimension: usize,

    /// Board side used when a request does not name one.
    #[serde(default = "default_board_dimension")]
    default_board_dimension: usize,
}

fn default_max_board_dimension() -> usize {
    10
}

fn default_board_dimension() -> usize {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            matcher: MatcherKind::default(),
            max_board_dimension: default_max_board_dimension(),
            default_board_dimension: default_board_dimension(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            matcher = %config.matcher,
            max_board_dimension = config.max_board_dimension,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an invalid value.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `CROSSWORD_MATCHER` names no matcher.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(DICTIONARY_ENV).filter(|p| !p.is_empty()) {
            debug!(%path, "Dictionary path from environment");
            self.dictionary_path = Some(PathBuf::from(path));
        }
        if let Some(kind) = lookup(MATCHER_ENV).filter(|k| !k.is_empty()) {
            self.matcher = kind.parse().map_err(|_| {
                ConfigError::new(format!("Unknown matcher '{}' in {}", kind, MATCHER_ENV))
            })?;
            debug!(matcher = %self.matcher, "Matcher from environment");
        }
        Ok(self)
    }

    /// Replaces the dictionary path.
    pub fn set_dictionary_path(&mut self, path: PathBuf) {
        self.dictionary_path = Some(path);
    }

    /// Replaces the matcher kind.
    pub fn set_matcher(&mut self, matcher: MatcherKind) {
        self.matcher = matcher;
    }

    /// Checks the dimension limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a dimension is zero or the default
    /// exceeds the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_board_dimension == 0 {
            return Err(ConfigError::new("max_board_dimension must be positive"));
        }
        if self.default_board_dimension == 0
            || self.default_board_dimension > self.max_board_dimension
        {
            return Err(ConfigError::new(format!(
                "default_board_dimension must be between 1 and {}",
                self.max_board_dimension
            )));
        }
        Ok(())
    }

    /// Loads the configured dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no path is configured or loading fails.
    #[instrument(skip(self))]
    pub fn load_dictionary(&self) -> Result<Dictionary, ConfigError> {
        let path = self.dictionary_path.as_ref().ok_or_else(|| {
            ConfigError::new(format!(
                "No dictionary configured; set dictionary_path, {} or --dictionary",
                DICTIONARY_ENV
            ))
        })?;
        Ok(Dictionary::load(path)?)
    }

    /// Loads the dictionary and builds the configured scorer.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::load_dictionary`].
    pub fn build_scorer(&self) -> Result<Scorer, ConfigError> {
        Ok(Scorer::from_dictionary(self.matcher, self.load_dictionary()?))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

// Keeps the location recorded where the dictionary failed to load.
impl From<DictionaryError> for ConfigError {
    fn from(err: DictionaryError) -> Self {
        Self {
            message: err.message,
            line: err.line,
            file: err.file,
        }
    }
}
