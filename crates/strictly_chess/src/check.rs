//! Check detection built on pseudo-legal move generation.

use super::board::ChessBoard;
use super::movegen::legal_destinations;
use super::types::{Color, PieceKind, Square};
use tracing::{debug, instrument};

/// Locates the king of `color`, scanning in row-major order.
#[instrument(skip(board))]
pub fn king_square(board: &ChessBoard, color: Color) -> Option<Square> {
    board
        .pieces()
        .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
        .map(|(sq, _)| sq)
}

/// Checks whether the king of `color` is attacked by any opposing piece.
///
/// A board without a king for `color` is reported as not in check.
/// Recomputed from scratch on every call.
#[instrument(skip(board))]
pub fn is_in_check(board: &ChessBoard, color: Color) -> bool {
    let Some(king) = king_square(board, color) else {
        debug!("No king on board");
        return false;
    };

    let attacker = color.opponent();
    let attacked = board
        .pieces()
        .filter(|(_, p)| p.color == attacker)
        .any(|(from, _)| legal_destinations(board, from, attacker).contains(&king));

    debug!(%king, attacked, "Check test complete");
    attacked
}
