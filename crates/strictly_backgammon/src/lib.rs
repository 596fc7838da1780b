//! Pure backgammon logic for strictly_boards.
//!
//! # Conventions
//!
//! - Points are indexed 0..=23. White moves up, black moves down.
//! - A point with two or more opposing pieces is blocked; a single
//!   opposing piece can be hit.
//! - Each color always owns 15 pieces across board, bar and home.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod invariants;
mod movegen;
mod types;

pub use board::{BackgammonBoard, BackgammonPosition, BoardRepr};
pub use error::BoardError;
pub use invariants::{
    BoardInvariants, Invariant, InvariantSet, InvariantViolation, PieceConservation, PointCount,
    SingleColorPoints,
};
pub use movegen::{die_value_for, home_eligible, is_blocked, legal_destinations};
pub use types::{
    BackgammonMove, Color, DiceRoll, DiceRollRepr, Destination, Location, Marker, Origin,
    PIECES_PER_COLOR, POINT_COUNT, PerColor,
};
