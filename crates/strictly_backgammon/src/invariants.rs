//! First-class invariants for the backgammon board.
//!
//! Every [`BackgammonBoard`] is checked against [`BoardInvariants`] when it
//! is built, so a board that exists satisfies all of them.

use super::board::BackgammonBoard;
use super::types::{Color, PIECES_PER_COLOR, POINT_COUNT};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the board has exactly 24 points.
pub struct PointCount;

impl Invariant<BackgammonBoard> for PointCount {
    fn holds(board: &BackgammonBoard) -> bool {
        board.stacks().len() == POINT_COUNT
    }

    fn description() -> &'static str {
        "Board has exactly 24 points"
    }
}

/// Invariant: a point never mixes colors.
pub struct SingleColorPoints;

impl Invariant<BackgammonBoard> for SingleColorPoints {
    fn holds(board: &BackgammonBoard) -> bool {
        board
            .stacks()
            .iter()
            .all(|stack| stack.windows(2).all(|pair| pair[0] == pair[1]))
    }

    fn description() -> &'static str {
        "No point holds pieces of both colors"
    }
}

/// Invariant: each color owns exactly 15 pieces across board, bar and home.
pub struct PieceConservation;

impl Invariant<BackgammonBoard> for PieceConservation {
    fn holds(board: &BackgammonBoard) -> bool {
        [Color::White, Color::Black].into_iter().all(|color| {
            board.pieces_on_board(color)
                + usize::from(board.bar().get(color))
                + usize::from(board.home().get(color))
                == PIECES_PER_COLOR
        })
    }

    fn description() -> &'static str {
        "Each color has 15 pieces across board, bar and home"
    }
}

/// All board invariants, checked together.
pub type BoardInvariants = (PointCount, SingleColorPoints, PieceConservation);
