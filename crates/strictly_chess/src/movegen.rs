//! Pseudo-legal move generation.
//!
//! Destinations obey piece geometry and occupancy only. A move that leaves
//! the mover's own king attacked is still generated; see [`crate::is_in_check`]
//! for the separate check test.

use super::board::ChessBoard;
use super::types::{Color, PieceKind, Square};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns every pseudo-legal destination for the piece on `origin`.
///
/// Empty when the origin is empty or holds a piece not owned by `mover`.
#[instrument(skip(board))]
pub fn legal_destinations(board: &ChessBoard, origin: Square, mover: Color) -> BTreeSet<Square> {
    let Some(piece) = board.get(origin) else {
        debug!("No piece on origin");
        return BTreeSet::new();
    };
    if piece.color != mover {
        debug!(owner = %piece.color, "Origin piece belongs to the opponent");
        return BTreeSet::new();
    }

    let destinations = match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, origin, mover),
        PieceKind::Rook => ray_destinations(board, origin, mover, &ORTHOGONAL),
        PieceKind::Bishop => ray_destinations(board, origin, mover, &DIAGONAL),
        PieceKind::Queen => {
            let mut set = ray_destinations(board, origin, mover, &ORTHOGONAL);
            set.extend(ray_destinations(board, origin, mover, &DIAGONAL));
            set
        }
        PieceKind::Knight => step_destinations(board, origin, mover, &KNIGHT_JUMPS),
        PieceKind::King => step_destinations(board, origin, mover, &KING_STEPS),
    };

    debug!(kind = %piece.kind, count = destinations.len(), "Generated destinations");
    destinations
}

fn pawn_destinations(board: &ChessBoard, origin: Square, mover: Color) -> BTreeSet<Square> {
    let mut set = BTreeSet::new();
    let dir = mover.pawn_direction();

    if let Some(one) = origin.offset(dir, 0)
        && board.is_empty(one)
    {
        set.insert(one);
        if origin.row() == mover.pawn_start_row()
            && let Some(two) = origin.offset(2 * dir, 0)
            && board.is_empty(two)
        {
            set.insert(two);
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = origin.offset(dir, d_col)
            && board.get(target).is_some_and(|p| p.color != mover)
        {
            set.insert(target);
        }
    }

    set
}

fn ray_destinations(
    board: &ChessBoard,
    origin: Square,
    mover: Color,
    directions: &[(i8, i8)],
) -> BTreeSet<Square> {
    let mut set = BTreeSet::new();
    for &(d_row, d_col) in directions {
        let mut cursor = origin.offset(d_row, d_col);
        while let Some(square) = cursor {
            match board.get(square) {
                None => {
                    set.insert(square);
                }
                Some(blocker) => {
                    if blocker.color != mover {
                        set.insert(square);
                    }
                    break;
                }
            }
            cursor = square.offset(d_row, d_col);
        }
    }
    set
}

fn step_destinations(
    board: &ChessBoard,
    origin: Square,
    mover: Color,
    offsets: &[(i8, i8)],
) -> BTreeSet<Square> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| origin.offset(d_row, d_col))
        .filter(|&square| board.get(square).is_none_or(|p| p.color != mover))
        .collect()
}
