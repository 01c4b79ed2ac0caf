//! Board scoring: dictionary, matching, line selection, aggregation.

mod aggregate;
mod dictionary;
mod line;
mod matcher;

pub use aggregate::Scorer;
pub use dictionary::{Dictionary, DictionaryError};
pub use line::{best_selection, score_line, word_score, Line};
pub use matcher::{Matcher, MatcherKind, Occurrence, SubstringMatcher, TrieMatcher};

use crate::types::Direction;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A word counted towards a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct ScoredWord {
    /// The dictionary word.
    word: String,
    /// Points for this word.
    score: u32,
    /// Line orientation.
    direction: Direction,
    /// Row of the first letter.
    start_row: usize,
    /// Column of the first letter.
    start_column: usize,
}

/// Score of one board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScoreResult {
    /// Sum of all word scores.
    total_score: u32,
    /// Words in row-then-column order.
    words: Vec<ScoredWord>,
}

impl ScoreResult {
    /// Sums the scores of `words`.
    pub fn from_words(words: Vec<ScoredWord>) -> Self {
        let total_score = words.iter().map(|w| w.score).fold(0u32, u32::saturating_add);
        Self { total_score, words }
    }
}
