//! Scoring of a single board line.
//!
//! All dictionary occurrences in the line are candidates; the scorer
//! keeps the pairwise non-overlapping subset with the highest total.
//! Occurrences are contiguous ranges, so the exact search is an interval
//! dynamic program over line positions: `best[i]` is the best selection
//! using positions `i..len`.
//!
//! Ties go to the selection whose words start earliest; at the same
//! start the longer word wins, then the earlier dictionary entry.

use super::matcher::{Matcher, Occurrence};
use super::ScoredWord;
use crate::board::{Board, EMPTY_MARK};
use crate::types::{Direction, Letter, Square};
use tracing::{instrument, trace};

/// A full row or column read off a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    direction: Direction,
    /// Row index for horizontal lines, column index for vertical ones.
    index: usize,
}

impl Line {
    /// Creates a line from text. The text is upper-cased.
    pub fn new(text: impl AsRef<str>, direction: Direction, index: usize) -> Self {
        Self {
            text: text.as_ref().to_ascii_uppercase(),
            direction,
            index,
        }
    }

    /// Reads row `row` of the board.
    pub fn row(board: &Board, row: usize) -> Self {
        Self::new(render(board.row(row)), Direction::Horizontal, row)
    }

    /// Reads column `column` of the board.
    pub fn column(board: &Board, column: usize) -> Self {
        Self::new(render(board.column(column)), Direction::Vertical, column)
    }

    /// The line text; empty squares read as `.`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Orientation of the line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Row or column index of the line.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of squares in the line.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Checks for a zero-length line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Board coordinates of the square at `offset` along the line.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        match self.direction {
            Direction::Horizontal => (self.index, offset),
            Direction::Vertical => (offset, self.index),
        }
    }
}

fn render(squares: impl Iterator<Item = Square>) -> String {
    squares
        .map(|s| s.letter().map_or(EMPTY_MARK, Letter::as_char))
        .collect()
}

/// Score of one word: doubled when it spans the whole line.
pub fn word_score(word_len: usize, line_len: usize) -> u32 {
    let base = u32::try_from(word_len).unwrap_or(u32::MAX);
    if word_len == line_len {
        base.saturating_mul(2)
    } else {
        base
    }
}

/// Scores one line, returning the chosen words left to right.
#[instrument(skip(matcher), fields(line = %line.text()))]
pub fn score_line(matcher: &dyn Matcher, line: &Line) -> Vec<ScoredWord> {
    let occurrences = matcher.find(line.text());
    let chosen = best_selection(&occurrences, line.len());
    trace!(candidates = occurrences.len(), chosen = chosen.len(), "Line scored");

    chosen
        .into_iter()
        .map(|occurrence| {
            let (row, column) = line.position(occurrence.start());
            ScoredWord::new(
                occurrence.word().to_string(),
                word_score(occurrence.len(), line.len()),
                line.direction(),
                row,
                column,
            )
        })
        .collect()
}

/// Picks the highest-scoring set of non-overlapping occurrences.
pub fn best_selection<'d>(occurrences: &[Occurrence<'d>], line_len: usize) -> Vec<Occurrence<'d>> {
    // Candidates per start offset, most preferred first.
    let mut by_start: Vec<Vec<&Occurrence<'d>>> = vec![Vec::new(); line_len];
    for occurrence in occurrences {
        if occurrence.start() + occurrence.len() <= line_len {
            by_start[occurrence.start()].push(occurrence);
        }
    }
    for candidates in &mut by_start {
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.rank().cmp(&b.rank())));
    }

    // best[i] = (total score within i..len, occurrence taken at i)
    let mut best: Vec<(u32, Option<&Occurrence<'d>>)> = vec![(0, None); line_len + 1];
    for i in (0..line_len).rev() {
        let mut choice = (best[i + 1].0, None);
        for &candidate in &by_start[i] {
            let total = word_score(candidate.len(), line_len) + best[i + candidate.len()].0;
            if total > choice.0 || (total == choice.0 && choice.1.is_none()) {
                choice = (total, Some(candidate));
            }
        }
        best[i] = choice;
    }

    let mut chosen = Vec::new();
    let mut i = 0;
    while i < line_len {
        match best[i].1 {
            Some(occurrence) => {
                chosen.push(*occurrence);
                i += occurrence.len();
            }
            None => i += 1,
        }
    }

    debug_assert!(
        chosen.windows(2).all(|pair| !pair[0].overlaps(&pair[1])),
        "selected occurrences overlap"
    );
    chosen
}
