//! Square letter board owned by a single player.

use crate::error::GameError;
use crate::types::{Letter, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Character used for empty squares in text renderings.
pub const EMPTY_MARK: char = '.';

/// N×N board of letter squares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    dimension: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardRecord {
    dimension: usize,
    squares: Vec<Square>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = GameError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let expected = square_count(record.dimension)?;
        if record.squares.len() != expected {
            return Err(GameError::InvalidInput(format!(
                "a {}x{} board needs {} squares, got {}",
                record.dimension,
                record.dimension,
                expected,
                record.squares.len()
            )));
        }
        Ok(Self {
            dimension: record.dimension,
            squares: record.squares,
        })
    }
}

/// Number of squares on an N×N board.
///
/// # Errors
///
/// Returns [`GameError::InvalidInput`] if N² does not fit in `usize`.
pub fn square_count(dimension: usize) -> Result<usize, GameError> {
    dimension.checked_mul(dimension).ok_or_else(|| {
        GameError::InvalidInput(format!("board dimension {} is too large", dimension))
    })
}

impl Board {
    /// Creates a new empty board.
    ///
    /// Callers pass a dimension already checked with [`square_count`].
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            squares: vec![Square::Empty; dimension * dimension],
        }
    }

    /// Parses a board from text rows.
    ///
    /// Each row holds one character per square: a letter (any case) or
    /// `.`, `_` or a space for an empty square. The number of rows must
    /// match the row width.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the rows are not square or
    /// contain other characters.
    #[instrument(skip(rows))]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let dimension = rows.len();
        let mut board = Self::new(dimension);
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.as_ref().chars().collect();
            if chars.len() != dimension {
                return Err(GameError::InvalidInput(format!(
                    "row {} has {} squares, expected {}",
                    row,
                    chars.len(),
                    dimension
                )));
            }
            for (column, c) in chars.into_iter().enumerate() {
                let square = match c {
                    EMPTY_MARK | '_' | ' ' => Square::Empty,
                    other => Square::Filled(Letter::try_from(other)?),
                };
                board.set(row, column, square)?;
            }
        }
        Ok(board)
    }

    /// Returns the side length of the board.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Checks whether `(row, column)` lies on the board.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.dimension && column < self.dimension
    }

    /// Gets the square at the given position.
    pub fn get(&self, row: usize, column: usize) -> Option<Square> {
        if self.contains(row, column) {
            self.squares.get(row * self.dimension + column).copied()
        } else {
            None
        }
    }

    /// Sets the square at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the position is off the board.
    pub fn set(&mut self, row: usize, column: usize, square: Square) -> Result<(), GameError> {
        if !self.contains(row, column) {
            return Err(GameError::InvalidInput(format!(
                "position ({}, {}) is outside the {}x{} board",
                row, column, self.dimension, self.dimension
            )));
        }
        self.squares[row * self.dimension + column] = square;
        Ok(())
    }

    /// Checks if a square is empty. Off-board positions are not empty.
    pub fn is_empty(&self, row: usize, column: usize) -> bool {
        matches!(self.get(row, column), Some(Square::Empty))
    }

    /// Counts the filled squares.
    pub fn filled_squares(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    /// Checks if every square holds a letter.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| !s.is_empty())
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Squares of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Square> + '_ {
        let start = (row * self.dimension).min(self.squares.len());
        let end = ((row + 1) * self.dimension).min(self.squares.len());
        self.squares[start..end].iter().copied()
    }

    /// Squares of one column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = Square> + '_ {
        let dimension = self.dimension;
        (0..dimension).filter_map(move |row| self.get(row, column))
    }

    /// Formats the board as one text row per line.
    pub fn display(&self) -> String {
        (0..self.dimension)
            .map(|row| {
                self.row(row)
                    .map(|s| s.letter().map_or(EMPTY_MARK, Letter::as_char))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
