//! 8x8 chess board.

use super::types::{ChessPiece, Color, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// Chess board: an 8x8 grid of optional pieces, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessBoard {
    squares: [[Option<ChessPiece>; 8]; 8],
}

impl ChessBoard {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(ChessPiece::new(*kind, Color::Black));
            board.squares[1][col] = Some(ChessPiece::new(PieceKind::Pawn, Color::Black));
            board.squares[6][col] = Some(ChessPiece::new(PieceKind::Pawn, Color::White));
            board.squares[7][col] = Some(ChessPiece::new(*kind, Color::White));
        }
        board
    }

    /// Gets the piece on a square.
    pub fn get(&self, square: Square) -> Option<ChessPiece> {
        self.squares[usize::from(square.row())][usize::from(square.col())]
    }

    /// Places a piece (or clears the square with `None`).
    pub fn set(&mut self, square: Square, piece: Option<ChessPiece>) {
        self.squares[usize::from(square.row())][usize::from(square.col())] = piece;
    }

    /// Builder-style placement, handy for setting up positions.
    pub fn with(mut self, square: Square, piece: ChessPiece) -> Self {
        self.set(square, Some(piece));
        self
    }

    /// Checks whether a square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Iterates every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ChessPiece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Formats the board as text, rank 8 on top.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..Square::SIZE {
            for col in 0..Square::SIZE {
                let symbol = Square::new(row, col)
                    .and_then(|sq| self.get(sq))
                    .map(|p| p.kind.symbol(p.color))
                    .unwrap_or('.');
                result.push(symbol);
            }
            if row + 1 < Square::SIZE {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::standard()
    }
}
