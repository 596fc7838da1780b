//! Backgammon adapter.

use super::{BoardGame, MovePlan};
use crate::protocol::{GameBoard, GameKind, GameMove};
use std::collections::BTreeSet;
use std::convert::Infallible;
use strictly_backgammon::{
    BackgammonMove, BackgammonPosition, Color, Destination, Origin, POINT_COUNT, die_value_for,
    legal_destinations,
};
use tracing::{debug, instrument, warn};

/// Backgammon marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backgammon;

/// Clickable backgammon location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackgammonTarget {
    /// The mover's bar.
    Bar,
    /// A board point, 0..=23.
    Point(u8),
    /// The bear-off tray.
    BearOff,
}

impl BackgammonTarget {
    fn as_origin(self) -> Option<Origin> {
        match self {
            Self::Bar => Some(Origin::Bar),
            Self::Point(p) if usize::from(p) < POINT_COUNT => Some(Origin::Point(p)),
            _ => None,
        }
    }

    fn as_destination(self) -> Option<Destination> {
        match self {
            Self::Point(p) if usize::from(p) < POINT_COUNT => Some(Destination::Point(p)),
            Self::BearOff => Some(Destination::BearOff),
            _ => None,
        }
    }
}

impl From<Destination> for BackgammonTarget {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Point(p) => Self::Point(p),
            Destination::BearOff => Self::BearOff,
        }
    }
}

impl std::fmt::Display for BackgammonTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Point(p) => write!(f, "{}", p),
            Self::BearOff => write!(f, "off"),
        }
    }
}

impl BoardGame for Backgammon {
    const KIND: GameKind = GameKind::Backgammon;
    const MOVE_ENDS_TURN: bool = false;

    type Board = BackgammonPosition;
    type Side = Color;
    type Target = BackgammonTarget;
    type Move = BackgammonMove;
    type Pending = Infallible;
    type Choice = Infallible;

    fn board_from(board: GameBoard) -> Option<BackgammonPosition> {
        match board {
            GameBoard::Backgammon(position) => Some(position),
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

    fn owns(position: &BackgammonPosition, target: BackgammonTarget, side: Color) -> bool {
        match target {
            BackgammonTarget::Bar => position.board.bar().get(side) > 0,
            BackgammonTarget::Point(p) => position.board.count_at(usize::from(p), side) > 0,
            BackgammonTarget::BearOff => false,
        }
    }

    fn origins(position: &BackgammonPosition, side: Color) -> Vec<BackgammonTarget> {
        let board = &position.board;
        let bar = (board.bar().get(side) > 0).then_some(BackgammonTarget::Bar);
        bar.into_iter()
            .chain(
                board
                    .occupied_points(side)
                    .map(|p| BackgammonTarget::Point(p as u8)),
            )
            .collect()
    }

    #[instrument(skip(position))]
    fn destinations(
        position: &BackgammonPosition,
        origin: BackgammonTarget,
        side: Color,
    ) -> BTreeSet<BackgammonTarget> {
        let Some(dice) = &position.dice else {
            debug!("No dice rolled");
            return BTreeSet::new();
        };
        let Some(origin) = origin.as_origin() else {
            return BTreeSet::new();
        };
        legal_destinations(&position.board, origin, side, dice)
            .into_iter()
            .map(BackgammonTarget::from)
            .collect()
    }

    #[instrument(skip(position))]
    fn plan(
        position: &BackgammonPosition,
        origin: BackgammonTarget,
        destination: BackgammonTarget,
        side: Color,
    ) -> Option<MovePlan<BackgammonMove, Infallible>> {
        let dice = position.dice.as_ref()?;
        let from = origin.as_origin()?;
        let to = destination.as_destination()?;
        let Some(die_value) = die_value_for(dice, from, to, side) else {
            warn!("No remaining die covers this move");
            return None;
        };
        debug!(die_value, "Inferred die value");
        Some(MovePlan::Ready(BackgammonMove {
            from,
            to,
            die_value,
        }))
    }

    fn resolve(pending: Infallible, _choice: Infallible) -> BackgammonMove {
        match pending {}
    }

    fn into_wire(mv: BackgammonMove) -> GameMove {
        GameMove::Backgammon(mv)
    }
}
