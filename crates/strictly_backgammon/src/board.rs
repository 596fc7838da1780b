//! Backgammon board: 24 stacked points, two bars and two homes.

use super::error::BoardError;
use super::invariants::{BoardInvariants, InvariantSet};
use super::types::{Color, DiceRoll, POINT_COUNT, PerColor};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Wire form of a board, validated into [`BackgammonBoard`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRepr {
    /// Stacks of pieces, one per point.
    pub points: Vec<Vec<Color>>,
    /// Pieces waiting to re-enter.
    #[serde(default)]
    pub bar: PerColor<u8>,
    /// Pieces borne off.
    #[serde(default)]
    pub home: PerColor<u8>,
}

/// Backgammon board.
///
/// Construction checks [`BoardInvariants`]; a board value always has 24
/// single-color points and 15 pieces per color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct BackgammonBoard {
    points: Vec<Vec<Color>>,
    bar: PerColor<u8>,
    home: PerColor<u8>,
}

impl BackgammonBoard {
    /// Builds a board from stacks, validating every invariant.
    #[instrument(skip(points))]
    pub fn new(
        points: Vec<Vec<Color>>,
        bar: PerColor<u8>,
        home: PerColor<u8>,
    ) -> Result<Self, BoardError> {
        let board = Self { points, bar, home };
        BoardInvariants::check_all(&board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Rejected backgammon board");
            BoardError::new(format!("Invalid board: {}", descriptions))
        })?;
        Ok(board)
    }

    /// Builds a board from `(point, color, count)` triples.
    pub fn from_counts(
        stacks: &[(usize, Color, usize)],
        bar: PerColor<u8>,
        home: PerColor<u8>,
    ) -> Result<Self, BoardError> {
        let mut points = vec![Vec::new(); POINT_COUNT];
        for &(index, color, count) in stacks {
            let point = points
                .get_mut(index)
                .ok_or_else(|| BoardError::new(format!("point {} is off the board", index)))?;
            point.extend(std::iter::repeat_n(color, count));
        }
        Self::new(points, bar, home)
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let points = standard_points();
        Self {
            points,
            bar: PerColor::default(),
            home: PerColor::default(),
        }
    }

    /// Raw point stacks.
    pub fn stacks(&self) -> &[Vec<Color>] {
        &self.points
    }

    /// Owner and size of the stack on `point`; `None` if empty or out of range.
    pub fn point(&self, point: usize) -> Option<(Color, usize)> {
        let stack = self.points.get(point)?;
        stack.first().map(|color| (*color, stack.len()))
    }

    /// Number of `color` pieces on `point`.
    pub fn count_at(&self, point: usize, color: Color) -> usize {
        match self.point(point) {
            Some((owner, count)) if owner == color => count,
            _ => 0,
        }
    }

    /// Pieces on the bar, per color.
    pub fn bar(&self) -> PerColor<u8> {
        self.bar
    }

    /// Pieces borne off, per color.
    pub fn home(&self) -> PerColor<u8> {
        self.home
    }

    /// Total `color` pieces on the 24 points.
    pub fn pieces_on_board(&self, color: Color) -> usize {
        self.points
            .iter()
            .flatten()
            .filter(|c| **c == color)
            .count()
    }

    /// Points holding at least one `color` piece.
    pub fn occupied_points(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        (0..self.points.len()).filter(move |i| self.count_at(*i, color) > 0)
    }
}

fn standard_points() -> Vec<Vec<Color>> {
    const LAYOUT: [(usize, Color, usize); 8] = [
        (0, Color::White, 2),
        (11, Color::White, 5),
        (16, Color::White, 3),
        (18, Color::White, 5),
        (23, Color::Black, 2),
        (12, Color::Black, 5),
        (7, Color::Black, 3),
        (5, Color::Black, 5),
    ];
    let mut points = vec![Vec::new(); POINT_COUNT];
    for (index, color, count) in LAYOUT {
        points[index] = vec![color; count];
    }
    points
}

impl Default for BackgammonBoard {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BoardRepr> for BackgammonBoard {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        BackgammonBoard::new(repr.points, repr.bar, repr.home)
    }
}

impl From<BackgammonBoard> for BoardRepr {
    fn from(board: BackgammonBoard) -> Self {
        Self {
            points: board.points,
            bar: board.bar,
            home: board.home,
        }
    }
}

/// A board plus the roll being played, as delivered in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackgammonPosition {
    /// The board.
    pub board: BackgammonBoard,
    /// Current roll; `None` until the player to move has rolled.
    #[serde(default)]
    pub dice: Option<DiceRoll>,
}

impl BackgammonPosition {
    /// Creates a position.
    pub fn new(board: BackgammonBoard, dice: Option<DiceRoll>) -> Self {
        Self { board, dice }
    }
}
