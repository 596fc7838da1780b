//! Move generation for backgammon: bar entry, point moves and bear-off.

use super::board::BackgammonBoard;
use super::types::{Color, DiceRoll, Destination, Origin, PIECES_PER_COLOR, POINT_COUNT};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Checks whether `point` holds two or more opposing pieces.
pub fn is_blocked(board: &BackgammonBoard, point: usize, mover: Color) -> bool {
    board.count_at(point, mover.opponent()) >= 2
}

/// Checks whether `color` may bear off.
///
/// True iff nothing is on the bar, every board piece sits in the home
/// range, and board plus home pieces account for all 15.
#[instrument(skip(board))]
pub fn home_eligible(board: &BackgammonBoard, color: Color) -> bool {
    if board.bar().get(color) > 0 {
        return false;
    }
    let home = color.home_range();
    let all_home = board.occupied_points(color).all(|p| home.contains(&p));
    let accounted =
        board.pieces_on_board(color) + usize::from(board.home().get(color)) == PIECES_PER_COLOR;
    all_home && accounted
}

fn target_index(from: i16, die: u8, mover: Color) -> i16 {
    from + i16::from(die) * mover.direction()
}

fn on_board(index: i16) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < POINT_COUNT)
}

/// Returns every legal destination from `origin` for the remaining dice.
///
/// While the mover has pieces on the bar only [`Origin::Bar`] produces
/// moves. Empty for origins the mover does not occupy.
#[instrument(skip(board, dice))]
pub fn legal_destinations(
    board: &BackgammonBoard,
    origin: Origin,
    mover: Color,
    dice: &DiceRoll,
) -> BTreeSet<Destination> {
    let on_bar = board.bar().get(mover);
    let mut set = BTreeSet::new();

    match origin {
        Origin::Bar => {
            if on_bar == 0 {
                debug!("Nothing on the bar");
                return set;
            }
            for die in dice.distinct_values() {
                if let Some(entry) = on_board(target_index(mover.bar_index(), die, mover))
                    && !is_blocked(board, entry, mover)
                {
                    set.insert(Destination::Point(entry as u8));
                }
            }
        }
        Origin::Point(from) => {
            let from = usize::from(from);
            if on_bar > 0 {
                debug!(on_bar, "Pieces on the bar must enter first");
                return set;
            }
            if board.count_at(from, mover) == 0 {
                debug!(from, "Origin not occupied by mover");
                return set;
            }
            let can_bear_off = home_eligible(board, mover);
            for die in dice.distinct_values() {
                match on_board(target_index(from as i16, die, mover)) {
                    Some(to) => {
                        if !is_blocked(board, to, mover) {
                            set.insert(Destination::Point(to as u8));
                        }
                    }
                    // Direction is fixed per color, so leaving the board is
                    // always past the mover's own edge.
                    None if can_bear_off => {
                        set.insert(Destination::BearOff);
                    }
                    None => {}
                }
            }
        }
    }

    debug!(count = set.len(), "Generated destinations");
    set
}

/// Infers the die value a move from `origin` to `destination` spends.
///
/// Point moves and bar entry need the exact distance. Bearing off spends
/// the smallest remaining value at least the exact distance.
#[instrument(skip(dice))]
pub fn die_value_for(
    dice: &DiceRoll,
    origin: Origin,
    destination: Destination,
    mover: Color,
) -> Option<u8> {
    let start = match origin {
        Origin::Bar => mover.bar_index(),
        Origin::Point(p) => i16::from(p),
    };

    match destination {
        Destination::Point(to) => {
            let distance = (i16::from(to) - start) * mover.direction();
            let die = u8::try_from(distance).ok()?;
            dice.available_moves().contains(&die).then_some(die)
        }
        Destination::BearOff => {
            let Origin::Point(from) = origin else {
                return None;
            };
            let exact = mover.pips_to_bear_off(usize::from(from));
            dice.distinct_values().find(|die| *die >= exact)
        }
    }
}
