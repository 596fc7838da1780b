//! Core domain types for chess.

use serde::{Deserialize, Serialize};

/// Side in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White (starts on rows 6-7, moves toward row 0).
    #[display("white")]
    White,
    /// Black (starts on rows 0-1, moves toward row 7).
    #[display("black")]
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step for this color.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row from which this color's pawns may advance two squares.
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns promote.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// Kind of chess piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Pawn.
    #[display("pawn")]
    Pawn,
    /// Rook.
    #[display("rook")]
    Rook,
    /// Knight.
    #[display("knight")]
    Knight,
    /// Bishop.
    #[display("bishop")]
    Bishop,
    /// Queen.
    #[display("queen")]
    Queen,
    /// King.
    #[display("king")]
    King,
}

impl PieceKind {
    /// Single-letter symbol, uppercase for white.
    pub fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A piece on the board.
///
/// Pieces are immutable values; a move replaces the whole piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChessPiece {
    /// What kind of piece this is.
    pub kind: PieceKind,
    /// Who owns it.
    pub color: Color,
    /// Whether the piece has left its starting square.
    #[serde(default)]
    pub has_moved: bool,
}

impl ChessPiece {
    /// Creates an unmoved piece.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }
}

/// Unvalidated wire coordinates of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareCoords {
    /// Row as received.
    pub row: u8,
    /// Column as received.
    pub col: u8,
}

/// A square on the 8x8 board.
///
/// A `Square` is always in bounds; out-of-range coordinates cannot be
/// constructed and are rejected when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SquareCoords", into = "SquareCoords")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Board edge length.
    pub const SIZE: u8 = 8;

    /// Creates a square, or `None` if out of bounds.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < Self::SIZE && col < Self::SIZE).then_some(Self { row, col })
    }

    /// Creates a square from signed coordinates, or `None` if out of bounds.
    pub fn from_signed(row: i16, col: i16) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// Row (0 is the top edge).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column (0 is the left edge).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Square shifted by the given deltas, or `None` if it leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_signed(
            i16::from(self.row) + i16::from(d_row),
            i16::from(self.col) + i16::from(d_col),
        )
    }

    /// Iterates all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::SIZE).flat_map(|row| (0..Self::SIZE).map(move |col| Square { row, col }))
    }
}

impl TryFrom<SquareCoords> for Square {
    type Error = String;

    fn try_from(repr: SquareCoords) -> Result<Self, Self::Error> {
        Square::new(repr.row, repr.col)
            .ok_or_else(|| format!("square ({}, {}) is off the board", repr.row, repr.col))
    }
}

impl From<Square> for SquareCoords {
    fn from(square: Square) -> Self {
        Self {
            row: square.row,
            col: square.col,
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Algebraic: file a-h by column, rank 8 at row 0.
        let file = char::from(b'a' + self.col);
        write!(f, "{}{}", file, Self::SIZE - self.row)
    }
}
