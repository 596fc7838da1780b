//! Boundary error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Wire decoding/encoding error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", message, file, line)]
pub struct ProtocolError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Error from a session command.
#[derive(Debug, Clone, Display, Error, derive_more::From)]
pub enum SessionError {
    /// The move or request could not be handed to the transport.
    #[display("{}", _0)]
    Transport(crate::transport::TransportError),

    /// The command needs the local player to be on turn.
    #[display("Not the local player's turn")]
    #[from(ignore)]
    NotYourTurn,

    /// The game has not started or is already over.
    #[display("Game is not in progress")]
    #[from(ignore)]
    GameNotActive,

    /// Dice with moves left are already on the board.
    #[display("Dice already rolled")]
    #[from(ignore)]
    DiceAlreadyRolled,
}
