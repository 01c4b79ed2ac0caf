//! Whole-board scoring.

use super::dictionary::Dictionary;
use super::line::{score_line, Line};
use super::matcher::{Matcher, MatcherKind};
use super::{ScoreResult, ScoredWord};
use crate::board::Board;
use crate::types::Direction;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Scores boards against one dictionary.
///
/// Every row and every column is scored on its own; a letter may count
/// once horizontally and once vertically.
#[derive(Debug)]
pub struct Scorer {
    matcher: Box<dyn Matcher>,
}

impl Scorer {
    /// Wraps an already built matcher.
    pub fn new(matcher: Box<dyn Matcher>) -> Self {
        Self { matcher }
    }

    /// Builds a matcher of `kind` over `dictionary`.
    pub fn from_dictionary(kind: MatcherKind, dictionary: Dictionary) -> Self {
        Self::new(kind.build(dictionary))
    }

    /// The matcher in use.
    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    /// Scores a single line.
    pub fn score_line(&self, line: &Line) -> Vec<ScoredWord> {
        score_line(self.matcher(), line)
    }

    /// Scores all rows, then all columns, of `board`.
    #[instrument(skip(self, board), fields(dimension = board.dimension()))]
    pub fn score_board(&self, board: &Board) -> ScoreResult {
        let mut words = Vec::new();
        for direction in Direction::iter() {
            for index in 0..board.dimension() {
                let line = match direction {
                    Direction::Horizontal => Line::row(board, index),
                    Direction::Vertical => Line::column(board, index),
                };
                words.extend(self.score_line(&line));
            }
        }
        let result = ScoreResult::from_words(words);
        debug!(
            total = result.total_score(),
            words = result.words().len(),
            "Board scored"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(words: &[&str]) -> Scorer {
        Scorer::from_dictionary(MatcherKind::Trie, Dictionary::from_words(words))
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let result = scorer(&["cat"]).score_board(&Board::new(3));
        assert_eq!(*result.total_score(), 0);
        assert!(result.words().is_empty());
    }

    #[test]
    fn test_rows_and_columns_counted_separately() {
        // Full rows and full columns all spell AT or TA.
        let board = Board::from_rows(&["at", "ta"]).unwrap();
        let result = scorer(&["at", "ta"]).score_board(&board);
        assert_eq!(result.words().len(), 4);
        assert_eq!(*result.total_score(), 16);
        let directions: Vec<_> = result.words().iter().map(|w| *w.direction()).collect();
        assert_eq!(
            directions,
            vec![
                Direction::Horizontal,
                Direction::Horizontal,
                Direction::Vertical,
                Direction::Vertical
            ]
        );
    }

    #[test]
    fn test_same_word_in_two_lines_counts_twice() {
        let board = Board::from_rows(&["go.", "go.", "..."]).unwrap();
        let result = scorer(&["go"]).score_board(&board);
        assert_eq!(result.words().len(), 2);
        assert_eq!(*result.total_score(), 4);
    }

    #[test]
    fn test_matcher_kinds_score_alike() {
        let board = Board::from_rows(&["cargo", "a.o.t", "rotot", "totoa", "sxyzo"]).unwrap();
        let words = ["cargo", "car", "go", "to", "tot", "rot", "cars"];
        let trie = Scorer::from_dictionary(MatcherKind::Trie, Dictionary::from_words(words));
        let substring =
            Scorer::from_dictionary(MatcherKind::Substring, Dictionary::from_words(words));
        assert_eq!(trie.score_board(&board), substring.score_board(&board));
    }
}
