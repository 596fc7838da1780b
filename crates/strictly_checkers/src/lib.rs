//! Pure checkers logic for strictly_boards.
//!
//! Cells are flat indices `row * 8 + col`. Men step forward and jump in
//! any diagonal direction; kings fly along diagonals and may capture the
//! first opposing piece on a ray. Only single jumps are generated.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod movegen;
mod types;

pub use board::{BOARD_SIZE, CELL_COUNT, CheckersBoard, index_of, row_col, step};
pub use movegen::{captured_square, legal_destinations};
pub use types::{CheckersMove, CheckersPiece, Owner};
