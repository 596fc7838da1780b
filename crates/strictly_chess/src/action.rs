//! First-class move types for chess.
//!
//! A move is the player's intent. It is built by the client and
//! adjudicated by the authoritative server.

use super::board::ChessBoard;
use super::types::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Piece a pawn may promote to (never a pawn or king).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    /// Queen.
    #[display("queen")]
    Queen,
    /// Rook.
    #[display("rook")]
    Rook,
    /// Bishop.
    #[display("bishop")]
    Bishop,
    /// Knight.
    #[display("knight")]
    Knight,
}

impl From<PromotionPiece> for PieceKind {
    fn from(piece: PromotionPiece) -> Self {
        match piece {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }
}

/// A chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Promotion choice when a pawn reaches the final rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionPiece>,
}

impl ChessMove {
    /// Creates a non-promoting move.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    pub fn promoting(from: Square, to: Square, piece: PromotionPiece) -> Self {
        Self {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl std::fmt::Display for ChessMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.promotion {
            Some(piece) => write!(f, "{}{}={}", self.from, self.to, piece),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

/// Checks whether moving `from` to `to` is a pawn reaching its final rank.
///
/// Such a move cannot be sent until a [`PromotionPiece`] is chosen.
#[instrument(skip(board))]
pub fn needs_promotion(board: &ChessBoard, from: Square, to: Square) -> bool {
    match board.get(from) {
        Some(piece) if piece.kind == PieceKind::Pawn => to.row() == piece.color.promotion_row(),
        _ => false,
    }
}
