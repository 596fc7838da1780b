//! Core domain types for backgammon.

use super::error::BoardError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Pieces each color owns across board, bar and home.
pub const PIECES_PER_COLOR: usize = 15;

/// Side in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White moves from point 0 toward point 23.
    #[display("white")]
    White,
    /// Black moves from point 23 toward point 0.
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

    /// Index delta per pip.
    pub fn direction(self) -> i16 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Virtual index of the bar, one pip behind the first point.
    pub fn bar_index(self) -> i16 {
        match self {
            Color::White => -1,
            Color::Black => POINT_COUNT as i16,
        }
    }

    /// The six points closest to this color's bear-off edge.
    pub fn home_range(self) -> RangeInclusive<usize> {
        match self {
            Color::White => 18..=23,
            Color::Black => 0..=5,
        }
    }

    /// Pips from `point` to the bear-off edge.
    pub fn pips_to_bear_off(self, point: usize) -> u8 {
        match self {
            Color::White => (POINT_COUNT - point) as u8,
            Color::Black => (point + 1) as u8,
        }
    }
}

/// A pair of values, one per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerColor<T> {
    /// White's value.
    pub white: T,
    /// Black's value.
    pub black: T,
}

impl<T: Copy> PerColor<T> {
    /// Creates a pair.
    pub fn new(white: T, black: T) -> Self {
        Self { white, black }
    }

    /// Value for `color`.
    pub fn get(&self, color: Color) -> T {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// Where a move starts: a real point or the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Location", into = "Location")]
pub enum Origin {
    /// The mover's bar stack.
    Bar,
    /// Point index 0..=23.
    Point(u8),
}

/// Where a move ends: a real point or off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Location", into = "Location")]
pub enum Destination {
    /// Point index 0..=23.
    Point(u8),
    /// Borne off to the mover's home stack.
    BearOff,
}

/// Named off-board locations on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// The bar.
    Bar,
    /// Bear-off.
    Off,
}

/// Wire form of a location: a point index or a marker string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// A point index.
    Index(u8),
    /// `"bar"` or `"off"`.
    Marker(Marker),
}

fn checked_point(index: u8) -> Result<u8, BoardError> {
    if usize::from(index) < POINT_COUNT {
        Ok(index)
    } else {
        Err(BoardError::new(format!("point {} is off the board", index)))
    }
}

impl TryFrom<Location> for Origin {
    type Error = BoardError;

    fn try_from(location: Location) -> Result<Self, Self::Error> {
        match location {
            Location::Index(i) => checked_point(i).map(Origin::Point),
            Location::Marker(Marker::Bar) => Ok(Origin::Bar),
            Location::Marker(Marker::Off) => Err(BoardError::new("a move cannot start off the board")),
        }
    }
}

impl From<Origin> for Location {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Bar => Location::Marker(Marker::Bar),
            Origin::Point(i) => Location::Index(i),
        }
    }
}

impl TryFrom<Location> for Destination {
    type Error = BoardError;

    fn try_from(location: Location) -> Result<Self, Self::Error> {
        match location {
            Location::Index(i) => checked_point(i).map(Destination::Point),
            Location::Marker(Marker::Off) => Ok(Destination::BearOff),
            Location::Marker(Marker::Bar) => Err(BoardError::new("a move cannot end on the bar")),
        }
    }
}

impl From<Destination> for Location {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Point(i) => Location::Index(i),
            Destination::BearOff => Location::Marker(Marker::Off),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Bar => write!(f, "bar"),
            Origin::Point(i) => write!(f, "{}", i),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Point(i) => write!(f, "{}", i),
            Destination::BearOff => write!(f, "off"),
        }
    }
}

/// Wire form of a dice roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollRepr {
    /// The two dice as rolled.
    pub dice: (u8, u8),
    /// Remaining die values, consumed by the adjudicator.
    pub available_moves: Vec<u8>,
}

/// The current roll and the die values still available to spend.
///
/// Read-only here; the adjudicator removes values as moves consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiceRollRepr", into = "DiceRollRepr")]
pub struct DiceRoll {
    dice: (u8, u8),
    available_moves: Vec<u8>,
}

impl DiceRoll {
    /// Creates a fresh roll; doubles grant four moves.
    pub fn roll(a: u8, b: u8) -> Result<Self, BoardError> {
        let available = if a == b { vec![a; 4] } else { vec![a, b] };
        Self::new((a, b), available)
    }

    /// Creates a roll with explicit remaining values.
    pub fn new(dice: (u8, u8), available_moves: Vec<u8>) -> Result<Self, BoardError> {
        let valid = |v: u8| (1..=6).contains(&v);
        if !valid(dice.0) || !valid(dice.1) {
            return Err(BoardError::new(format!("dice {:?} out of range 1-6", dice)));
        }
        if let Some(bad) = available_moves.iter().find(|v| !valid(**v)) {
            return Err(BoardError::new(format!("die value {} out of range 1-6", bad)));
        }
        Ok(Self {
            dice,
            available_moves,
        })
    }

    /// The dice as rolled.
    pub fn dice(&self) -> (u8, u8) {
        self.dice
    }

    /// Remaining die values in order.
    pub fn available_moves(&self) -> &[u8] {
        &self.available_moves
    }

    /// Distinct remaining die values, ascending.
    pub fn distinct_values(&self) -> impl Iterator<Item = u8> + '_ {
        let mut values = self.available_moves.clone();
        values.sort_unstable();
        values.dedup();
        values.into_iter()
    }

    /// Whether any die value remains.
    pub fn has_moves(&self) -> bool {
        !self.available_moves.is_empty()
    }
}

impl TryFrom<DiceRollRepr> for DiceRoll {
    type Error = BoardError;

    fn try_from(repr: DiceRollRepr) -> Result<Self, Self::Error> {
        DiceRoll::new(repr.dice, repr.available_moves)
    }
}

impl From<DiceRoll> for DiceRollRepr {
    fn from(roll: DiceRoll) -> Self {
        Self {
            dice: roll.dice,
            available_moves: roll.available_moves,
        }
    }
}

/// A backgammon move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgammonMove {
    /// Point or bar the piece leaves.
    pub from: Origin,
    /// Point the piece lands on, or bear-off.
    pub to: Destination,
    /// Die value this move spends.
    pub die_value: u8,
}

impl std::fmt::Display for BackgammonMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.die_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_wire_forms() {
        assert_eq!(serde_json::from_str::<Origin>("\"bar\"").unwrap(), Origin::Bar);
        assert_eq!(serde_json::from_str::<Origin>("7").unwrap(), Origin::Point(7));
        assert!(serde_json::from_str::<Origin>("24").is_err());
        assert!(serde_json::from_str::<Origin>("\"off\"").is_err());
        assert_eq!(
            serde_json::from_str::<Destination>("\"off\"").unwrap(),
            Destination::BearOff
        );
        assert!(serde_json::from_str::<Destination>("\"bar\"").is_err());
    }

    #[test]
    fn test_move_wire_format() {
        let mv = BackgammonMove {
            from: Origin::Point(20),
            to: Destination::BearOff,
            die_value: 5,
        };
        let json = serde_json::to_value(mv).unwrap();
        assert_eq!(json["from"], 20);
        assert_eq!(json["to"], "off");
        assert_eq!(json["dieValue"], 5);
    }

    #[test]
    fn test_doubles_grant_four_moves() {
        let roll = DiceRoll::roll(3, 3).unwrap();
        assert_eq!(roll.available_moves(), &[3, 3, 3, 3]);
        assert_eq!(roll.distinct_values().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_die_out_of_range_rejected() {
        assert!(DiceRoll::roll(0, 3).is_err());
        assert!(DiceRoll::new((2, 3), vec![7]).is_err());
    }

    #[test]
    fn test_pips_to_bear_off() {
        assert_eq!(Color::White.pips_to_bear_off(23), 1);
        assert_eq!(Color::White.pips_to_bear_off(18), 6);
        assert_eq!(Color::Black.pips_to_bear_off(0), 1);
        assert_eq!(Color::Black.pips_to_bear_off(5), 6);
    }
}
