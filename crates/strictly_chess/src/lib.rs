//! Pure chess logic for strictly_boards.
//!
//! - **Board**: 8x8 grid of optional pieces
//! - **Move generation**: pseudo-legal destinations per piece
//! - **Check detection**: whether a side's king is attacked
//!
//! Castling, en passant and repetition rules are not modelled; the
//! authoritative server adjudicates those.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod check;
mod movegen;
mod types;

pub use action::{ChessMove, PromotionPiece, needs_promotion};
pub use board::ChessBoard;
pub use check::{is_in_check, king_square};
pub use movegen::legal_destinations;
pub use types::{ChessPiece, Color, PieceKind, Square, SquareCoords};
