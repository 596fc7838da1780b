//! Checkers adapter.

use super::{BoardGame, MovePlan};
use crate::protocol::{GameBoard, GameKind, GameMove};
use std::collections::BTreeSet;
use std::convert::Infallible;
use strictly_checkers::{CheckersBoard, CheckersMove, Owner, legal_destinations};

/// Checkers marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkers;

impl BoardGame for Checkers {
    const KIND: GameKind = GameKind::Checkers;
    const MOVE_ENDS_TURN: bool = true;

    type Board = CheckersBoard;
    type Side = Owner;
    type Target = usize;
    type Move = CheckersMove;
    // Every checkers move commits immediately.
    type Pending = Infallible;
    type Choice = Infallible;

    fn board_from(board: GameBoard) -> Option<CheckersBoard> {
        match board {
            GameBoard::Checkers(board) => Some(board),
            _ => None,
        }
    }

    fn parse_side(name: &str) -> Option<Owner> {
        match name {
            "0" | "first" => Some(Owner::First),
            "1" | "second" => Some(Owner::Second),
            _ => None,
        }
    }

    fn owns(board: &CheckersBoard, target: usize, side: Owner) -> bool {
        board.get(target).is_some_and(|piece| piece.owner == side)
    }

    fn origins(board: &CheckersBoard, side: Owner) -> Vec<usize> {
        board
            .pieces()
            .filter(|(_, piece)| piece.owner == side)
            .map(|(index, _)| index)
            .collect()
    }

    fn destinations(board: &CheckersBoard, origin: usize, side: Owner) -> BTreeSet<usize> {
        legal_destinations(board, origin, side)
    }

    fn plan(
        _board: &CheckersBoard,
        origin: usize,
        destination: usize,
        _side: Owner,
    ) -> Option<MovePlan<CheckersMove, Infallible>> {
        Some(MovePlan::Ready(CheckersMove::new(origin, destination)))
    }

    fn resolve(pending: Infallible, _choice: Infallible) -> CheckersMove {
        match pending {}
    }

    fn into_wire(mv: CheckersMove) -> GameMove {
        GameMove::Checkers(mv)
    }
}
