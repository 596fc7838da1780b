//! Click-driven piece selection.
//!
//! # State machine
//!
//! ```text
//! Idle --click own piece--> Selected
//! Selected --click same origin--> Idle
//! Selected --click destination--> Idle (move committed)
//!                              \-> AwaitingChoice (promotion)
//! Selected --click other own piece--> Selected (new origin)
//! Selected --click anything else--> Idle
//! AwaitingChoice --choose / cancel--> Idle
//! ```

use crate::games::{BoardGame, MovePlan};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// Current selection for one game.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<G: BoardGame> {
    /// Nothing selected.
    Idle,
    /// A piece is picked up with its highlighted destinations.
    Selected {
        /// Picked-up piece.
        origin: G::Target,
        /// Legal destinations from `origin`.
        destinations: BTreeSet<G::Target>,
    },
    /// A move waits for an extra choice.
    AwaitingChoice(G::Pending),
}

impl<G: BoardGame> Default for Selection<G> {
    fn default() -> Self {
        Self::Idle
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome<G: BoardGame> {
    /// Nothing changed.
    Ignored,
    /// A piece was picked up.
    Selected {
        /// Picked-up piece.
        origin: G::Target,
        /// Legal destinations from `origin`.
        destinations: BTreeSet<G::Target>,
    },
    /// The previous selection was dropped.
    Deselected,
    /// A move is ready to send.
    Committed(G::Move),
    /// A move needs a choice before it can be sent.
    AwaitingChoice(G::Pending),
}

impl<G: BoardGame> Selection<G> {
    /// Applies a click on `target`.
    #[instrument(skip(self, board))]
    pub fn click(&mut self, board: &G::Board, target: G::Target, side: G::Side) -> ClickOutcome<G> {
        let previous = std::mem::take(self);
        let was_active = !matches!(previous, Selection::Idle);

        if let Selection::Selected {
            origin,
            destinations,
        } = previous
        {
            if target == origin {
                debug!(%origin, "Deselecting origin");
                return ClickOutcome::Deselected;
            }
            if destinations.contains(&target) {
                return match G::plan(board, origin, target, side) {
                    Some(MovePlan::Ready(mv)) => {
                        debug!(%mv, "Move ready");
                        ClickOutcome::Committed(mv)
                    }
                    Some(MovePlan::NeedsChoice(pending)) => {
                        debug!(?pending, "Awaiting choice");
                        *self = Selection::AwaitingChoice(pending.clone());
                        ClickOutcome::AwaitingChoice(pending)
                    }
                    None => {
                        warn!(%origin, %target, "Highlighted destination produced no move");
                        ClickOutcome::Deselected
                    }
                };
            }
        }

        if G::owns(board, target, side) {
            let destinations = G::destinations(board, target, side);
            debug!(origin = %target, count = destinations.len(), "Selected piece");
            *self = Selection::Selected {
                origin: target,
                destinations: destinations.clone(),
            };
            return ClickOutcome::Selected {
                origin: target,
                destinations,
            };
        }

        if was_active {
            ClickOutcome::Deselected
        } else {
            ClickOutcome::Ignored
        }
    }

    /// Resolves a pending move with `choice`.
    ///
    /// `None` if nothing is pending; the selection is left untouched then.
    #[instrument(skip(self))]
    pub fn choose(&mut self, choice: G::Choice) -> Option<G::Move> {
        match std::mem::take(self) {
            Selection::AwaitingChoice(pending) => Some(G::resolve(pending, choice)),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Drops any selection or pending move.
    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }

    /// Highlighted destinations, if a piece is selected.
    pub fn destinations(&self) -> Option<&BTreeSet<G::Target>> {
        match self {
            Selection::Selected { destinations, .. } => Some(destinations),
            _ => None,
        }
    }

    /// Selected origin, if any.
    pub fn origin(&self) -> Option<G::Target> {
        match self {
            Selection::Selected { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Whether a move waits for a choice.
    pub fn is_awaiting_choice(&self) -> bool {
        matches!(self, Selection::AwaitingChoice(_))
    }
}
