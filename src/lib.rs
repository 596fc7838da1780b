//! Strictly Boards - client-side rules and turn timing for networked board games.
//!
//! # Architecture
//!
//! - Chess, checkers and backgammon rules live in their own crates.
//! - [`games::BoardGame`] adapts each engine to one selection seam.
//! - [`session::GameSession`] composes the board view, click selection,
//!   the turn [`timer`] and an [`transport::Outbox`] for one local player.
//! - [`protocol`] holds the JSON events and messages exchanged with the server.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod games;
pub mod protocol;
pub mod selection;
pub mod session;
pub mod timer;
pub mod transport;

pub use config::{BoardsConfig, LoggingConfig, TimerConfig};
pub use error::{ConfigError, ProtocolError, SessionError};
pub use games::{Backgammon, BackgammonTarget, BoardGame, Checkers, Chess, MovePlan, PendingPromotion};
pub use protocol::{GameBoard, GameKind, GameMove, InboundEvent, OutboundMessage, PlayerId, Snapshot};
pub use selection::{ClickOutcome, Selection};
pub use session::{EventDisposition, GameSession, TurnView};
pub use timer::{
    Clock, Countdown, ManualClock, SystemClock, TimerGate, TimerListener, TimerMachine,
    TimerPhase, TimerSignal, TimerState,
};
pub use transport::{ChannelOutbox, Outbox, TransportError};
