//! Per-game adapters behind a single selection seam.
//!
//! The session and selection logic are written once against
//! [`BoardGame`]. Each game supplies its board type, how targets map to
//! moves, and whether a move needs a follow-up choice before it commits.

mod backgammon;
mod checkers;
mod chess;

pub use backgammon::{Backgammon, BackgammonTarget};
pub use checkers::Checkers;
pub use chess::{Chess, PendingPromotion};

use crate::protocol::{GameBoard, GameKind, GameMove};
use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

/// Result of planning a move from a selected origin to a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan<M, P> {
    /// The move is complete and can be sent.
    Ready(M),
    /// The move needs one more choice from the player.
    NeedsChoice(P),
}

/// Rules a board game exposes to the selection machinery.
pub trait BoardGame: Debug + Clone + Copy + Send + 'static {
    /// Which game this is.
    const KIND: GameKind;
    /// Whether a single committed move ends the turn.
    const MOVE_ENDS_TURN: bool;

    /// Board state extracted from snapshots.
    type Board: Debug + Clone;
    /// A player's side.
    type Side: Debug + Copy + Eq + Display;
    /// Anything the player can click: a square, cell or point.
    type Target: Debug + Copy + Ord + Display;
    /// A committed move.
    type Move: Debug + Clone + PartialEq + Display;
    /// A move waiting for an extra choice.
    type Pending: Debug + Clone + PartialEq;
    /// The extra choice.
    type Choice: Debug + Copy;

    /// Extracts this game's board from a snapshot payload.
    fn board_from(board: GameBoard) -> Option<Self::Board>;

    /// Parses a side name such as `white` or `0`.
    fn parse_side(name: &str) -> Option<Self::Side>;

    /// Whether `target` holds a piece `side` may move.
    fn owns(board: &Self::Board, target: Self::Target, side: Self::Side) -> bool;

    /// Every target `side` could pick up, in order.
    fn origins(board: &Self::Board, side: Self::Side) -> Vec<Self::Target>;

    /// Legal destinations from `origin` for `side`.
    fn destinations(
        board: &Self::Board,
        origin: Self::Target,
        side: Self::Side,
    ) -> BTreeSet<Self::Target>;

    /// Builds the move for a clicked destination.
    ///
    /// `None` when the pair cannot form a move.
    fn plan(
        board: &Self::Board,
        origin: Self::Target,
        destination: Self::Target,
        side: Self::Side,
    ) -> Option<MovePlan<Self::Move, Self::Pending>>;

    /// Completes a pending move with the player's choice.
    fn resolve(pending: Self::Pending, choice: Self::Choice) -> Self::Move;

    /// Wraps a move for the wire.
    fn into_wire(mv: Self::Move) -> GameMove;
}
