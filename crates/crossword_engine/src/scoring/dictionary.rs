//! Normalized word list used for scoring.

use derive_more::{Display, Error};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Dictionary loading error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Dictionary error: {} at {}:{}", message, file, line)]
pub struct DictionaryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DictionaryError {
    /// Creates a new dictionary error with caller location tracking.
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

/// Word list in normalized form: trimmed, upper-case, `A`-`Z` only,
/// at least two letters, first occurrence kept on duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from raw words, normalizing each one.
    #[instrument(skip(words))]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut skipped = 0usize;
        for raw in words {
            match normalize(raw.as_ref()) {
                Some(word) if seen.insert(word.clone()) => kept.push(word),
                _ => skipped += 1,
            }
        }
        debug!(kept = kept.len(), skipped, "Dictionary normalized");
        Self { words: kept }
    }

    /// Reads one word per line.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if reading fails.
    #[instrument(skip(reader))]
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DictionaryError::new(format!("Failed to read word list: {}", e)))?;
        Ok(Self::from_words(lines))
    }

    /// Loads a line-delimited word list from a file.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the file cannot be opened or read.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            DictionaryError::new(format!(
                "Failed to open dictionary '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        info!(words = dictionary.len(), "Dictionary loaded");
        Ok(dictionary)
    }

    /// Returns the words in load order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Checks whether no word survived normalization.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the longest word, 0 when empty.
    pub fn longest_word(&self) -> usize {
        self.words.iter().map(String::len).max().unwrap_or(0)
    }
}

/// Trims and upper-cases a raw word, dropping anything that cannot score.
fn normalize(raw: &str) -> Option<String> {
    let word = raw.trim().to_uppercase();
    if word.len() > 1 && word.bytes().all(|b| b.is_ascii_uppercase()) {
        Some(word)
    } else {
        None
    }
}
