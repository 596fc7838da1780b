//! Core domain types for checkers.

use serde::{Deserialize, Serialize};

/// Owner of a piece, encoded as `0` or `1` on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Owner {
    /// Player 0 (starts on rows 5-7, moves toward row 0).
    #[display("0")]
    First,
    /// Player 1 (starts on rows 0-2, moves toward row 7).
    #[display("1")]
    Second,
}

impl Owner {
    /// Returns the opposing owner.
    pub fn opponent(self) -> Self {
        match self {
            Owner::First => Owner::Second,
            Owner::Second => Owner::First,
        }
    }

    /// Row delta of a forward step for this owner.
    pub fn forward(self) -> i8 {
        match self {
            Owner::First => -1,
            Owner::Second => 1,
        }
    }
}

impl TryFrom<u8> for Owner {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Owner::First),
            1 => Ok(Owner::Second),
            other => Err(format!("owner must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Owner> for u8 {
    fn from(owner: Owner) -> Self {
        match owner {
            Owner::First => 0,
            Owner::Second => 1,
        }
    }
}

/// A checkers piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckersPiece {
    /// Who owns the piece.
    pub owner: Owner,
    /// Whether the piece has been crowned.
    #[serde(default)]
    pub is_king: bool,
}

impl CheckersPiece {
    /// Creates an uncrowned piece.
    pub fn man(owner: Owner) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    /// Creates a king.
    pub fn king(owner: Owner) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }
}

/// A checkers move. Whether it captures is inferred from its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    /// Origin cell index.
    pub from: usize,
    /// Destination cell index.
    pub to: usize,
}

impl CheckersMove {
    /// Creates a move.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
