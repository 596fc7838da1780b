//! Flat-indexed 8x8 checkers board.

use super::types::{CheckersPiece, Owner};
use serde::{Deserialize, Serialize};

/// Board edge length.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Splits a cell index into `(row, col)`, or `None` if out of range.
pub fn row_col(index: usize) -> Option<(usize, usize)> {
    (index < CELL_COUNT).then(|| (index / BOARD_SIZE, index % BOARD_SIZE))
}

/// Joins `(row, col)` into a cell index, or `None` if off the board.
pub fn index_of(row: i16, col: i16) -> Option<usize> {
    let size = BOARD_SIZE as i16;
    ((0..size).contains(&row) && (0..size).contains(&col)).then(|| (row * size + col) as usize)
}

/// Cell reached from `index` after `steps` diagonal steps, or `None` if off the board.
pub fn step(index: usize, d_row: i8, d_col: i8, steps: i16) -> Option<usize> {
    let (row, col) = row_col(index)?;
    index_of(
        row as i16 + i16::from(d_row) * steps,
        col as i16 + i16::from(d_col) * steps,
    )
}

/// Checkers board.
///
/// Always exactly [`CELL_COUNT`] cells; decoding rejects any other length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<CheckersPiece>>", into = "Vec<Option<CheckersPiece>>")]
pub struct CheckersBoard {
    cells: Vec<Option<CheckersPiece>>,
}

impl CheckersBoard {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
        }
    }

    /// Creates the standard starting position: 12 men each on dark cells.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for index in 0..CELL_COUNT {
            let (row, col) = (index / BOARD_SIZE, index % BOARD_SIZE);
            if (row + col) % 2 == 0 {
                continue;
            }
            board.cells[index] = match row {
                0..=2 => Some(CheckersPiece::man(Owner::Second)),
                5..=7 => Some(CheckersPiece::man(Owner::First)),
                _ => None,
            };
        }
        board
    }

    /// Gets the piece on a cell; `None` for empty or out-of-range cells.
    pub fn get(&self, index: usize) -> Option<CheckersPiece> {
        self.cells.get(index).copied().flatten()
    }

    /// Builder-style placement; out-of-range indices are ignored.
    pub fn with(mut self, index: usize, piece: CheckersPiece) -> Self {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Some(piece);
        }
        self
    }

    /// Checks whether an in-range cell is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// Iterates every occupied cell with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, CheckersPiece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|p| (i, p)))
    }

    /// Formats the board as text: `o`/`x` for men, `O`/`X` for kings.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            let symbol = match cell {
                None => '.',
                Some(p) => match (p.owner, p.is_king) {
                    (Owner::First, false) => 'o',
                    (Owner::First, true) => 'O',
                    (Owner::Second, false) => 'x',
                    (Owner::Second, true) => 'X',
                },
            };
            result.push(symbol);
            if i % BOARD_SIZE == BOARD_SIZE - 1 && i + 1 < CELL_COUNT {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Option<CheckersPiece>>> for CheckersBoard {
    type Error = String;

    fn try_from(cells: Vec<Option<CheckersPiece>>) -> Result<Self, Self::Error> {
        if cells.len() != CELL_COUNT {
            return Err(format!(
                "checkers board needs {} cells, got {}",
                CELL_COUNT,
                cells.len()
            ));
        }
        Ok(Self { cells })
    }
}

impl From<CheckersBoard> for Vec<Option<CheckersPiece>> {
    fn from(board: CheckersBoard) -> Self {
        board.cells
    }
}
