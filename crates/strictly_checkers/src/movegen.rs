//! Single-jump move generation for checkers.
//!
//! Continuation captures after a landing are not generated here.

use super::board::{CheckersBoard, row_col, step};
use super::types::{CheckersPiece, Owner};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns every legal destination for the piece on `from`.
///
/// Empty for out-of-range indices, empty cells and opponent pieces.
#[instrument(skip(board))]
pub fn legal_destinations(board: &CheckersBoard, from: usize, mover: Owner) -> BTreeSet<usize> {
    let Some(piece) = board.get(from) else {
        debug!("No piece on origin");
        return BTreeSet::new();
    };
    if piece.owner != mover {
        debug!(owner = %piece.owner, "Origin piece belongs to the opponent");
        return BTreeSet::new();
    }

    let destinations = if piece.is_king {
        king_destinations(board, from, mover)
    } else {
        man_destinations(board, from, mover)
    };

    debug!(is_king = piece.is_king, count = destinations.len(), "Generated destinations");
    destinations
}

fn is_opponent(piece: Option<CheckersPiece>, mover: Owner) -> bool {
    piece.is_some_and(|p| p.owner != mover)
}

fn man_destinations(board: &CheckersBoard, from: usize, mover: Owner) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();

    for d_col in [-1, 1] {
        if let Some(to) = step(from, mover.forward(), d_col, 1)
            && board.is_empty(to)
        {
            set.insert(to);
        }
    }

    // Captures are allowed in all four directions.
    for (d_row, d_col) in DIAGONALS {
        if let Some(over) = step(from, d_row, d_col, 1)
            && is_opponent(board.get(over), mover)
            && let Some(landing) = step(from, d_row, d_col, 2)
            && board.is_empty(landing)
        {
            set.insert(landing);
        }
    }

    set
}

fn king_destinations(board: &CheckersBoard, from: usize, mover: Owner) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();

    for (d_row, d_col) in DIAGONALS {
        let mut distance = 1;
        while let Some(cell) = step(from, d_row, d_col, distance) {
            match board.get(cell) {
                None => {
                    set.insert(cell);
                    distance += 1;
                }
                Some(blocker) => {
                    // Only the first blocker on a ray can be jumped, and only
                    // onto the cell directly behind it.
                    if blocker.owner != mover
                        && let Some(landing) = step(from, d_row, d_col, distance + 1)
                        && board.is_empty(landing)
                    {
                        set.insert(landing);
                    }
                    break;
                }
            }
        }
    }

    set
}

/// Infers the cell of the piece captured by moving `from` to `to`.
///
/// Walks the diagonal between the two cells and returns the single opposing
/// piece found on it. `None` for non-diagonal moves, plain steps, or paths
/// that cross anything other than exactly one opposing piece.
#[instrument(skip(board))]
pub fn captured_square(board: &CheckersBoard, from: usize, to: usize) -> Option<usize> {
    let mover = board.get(from)?.owner;
    let (from_row, from_col) = row_col(from)?;
    let (to_row, to_col) = row_col(to)?;

    let d_row = to_row as i16 - from_row as i16;
    let d_col = to_col as i16 - from_col as i16;
    if d_row.abs() != d_col.abs() || d_row.abs() < 2 {
        return None;
    }

    let (dir_row, dir_col) = (d_row.signum() as i8, d_col.signum() as i8);
    let mut captured = None;
    for distance in 1..d_row.abs() {
        let cell = step(from, dir_row, dir_col, distance)?;
        match board.get(cell) {
            None => {}
            Some(p) if p.owner != mover && captured.is_none() => captured = Some(cell),
            Some(_) => return None,
        }
    }
    captured
}
