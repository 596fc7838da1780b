//! Chess adapter.

use super::{BoardGame, MovePlan};
use crate::protocol::{GameBoard, GameKind, GameMove};
use std::collections::BTreeSet;
use strictly_chess::{
    ChessBoard, ChessMove, Color, PromotionPiece, Square, legal_destinations, needs_promotion,
};
use tracing::{debug, instrument};

/// Chess marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chess;

/// A pawn move onto the last rank that still needs a promotion piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    /// Pawn square.
    pub from: Square,
    /// Promotion square.
    pub to: Square,
}

impl BoardGame for Chess {
    const KIND: GameKind = GameKind::Chess;
    const MOVE_ENDS_TURN: bool = true;

    type Board = ChessBoard;
    type Side = Color;
    type Target = Square;
    type Move = ChessMove;
    type Pending = PendingPromotion;
    type Choice = PromotionPiece;

    fn board_from(board: GameBoard) -> Option<ChessBoard> {
        match board {
            GameBoard::Chess(board) => Some(board),
            _ => None,
        }
    }

    fn parse_side(name: &str) -> Option<Color> {
        match name.to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Color::White),
            "black" | "b" => Some(Color::Black),
            _ => None,
        }
    }

    fn owns(board: &ChessBoard, target: Square, side: Color) -> bool {
        board.get(target).is_some_and(|piece| piece.color == side)
    }

    fn origins(board: &ChessBoard, side: Color) -> Vec<Square> {
        board
            .pieces()
            .filter(|(_, piece)| piece.color == side)
            .map(|(square, _)| square)
            .collect()
    }

    fn destinations(board: &ChessBoard, origin: Square, side: Color) -> BTreeSet<Square> {
        legal_destinations(board, origin, side)
    }

    #[instrument(skip(board))]
    fn plan(
        board: &ChessBoard,
        origin: Square,
        destination: Square,
        _side: Color,
    ) -> Option<MovePlan<ChessMove, PendingPromotion>> {
        if needs_promotion(board, origin, destination) {
            debug!("Promotion required");
            Some(MovePlan::NeedsChoice(PendingPromotion {
                from: origin,
                to: destination,
            }))
        } else {
            Some(MovePlan::Ready(ChessMove::new(origin, destination)))
        }
    }

    fn resolve(pending: PendingPromotion, choice: PromotionPiece) -> ChessMove {
        ChessMove::promoting(pending.from, pending.to, choice)
    }

    fn into_wire(mv: ChessMove) -> GameMove {
        GameMove::Chess(mv)
    }
}
