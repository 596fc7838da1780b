//! JSON wire messages exchanged with the game server.

use crate::error::ProtocolError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strictly_backgammon::{BackgammonMove, BackgammonPosition};
use strictly_checkers::{CheckersBoard, CheckersMove};
use strictly_chess::{ChessBoard, ChessMove};
use tracing::{debug, instrument};

/// Unique identifier for a player.
pub type PlayerId = String;

/// Which game a board or move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Chess.
    #[display("chess")]
    Chess,
    /// Checkers.
    #[display("checkers")]
    Checkers,
    /// Backgammon.
    #[display("backgammon")]
    Backgammon,
}

/// Board payload of a snapshot, tagged by game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", content = "position", rename_all = "lowercase")]
pub enum GameBoard {
    /// Chess board.
    Chess(ChessBoard),
    /// Checkers board.
    Checkers(CheckersBoard),
    /// Backgammon board with the current dice.
    Backgammon(BackgammonPosition),
}

impl GameBoard {
    /// Game this board belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Chess(_) => GameKind::Chess,
            Self::Checkers(_) => GameKind::Checkers,
            Self::Backgammon(_) => GameKind::Backgammon,
        }
    }
}

/// Full game state pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Monotonic state version.
    pub version: u64,
    /// Player whose turn it is.
    #[serde(default)]
    pub current_player_id: Option<PlayerId>,
    /// Whether the game has begun.
    #[serde(default)]
    pub started: bool,
    /// Whether the game is over.
    #[serde(default)]
    pub finished: bool,
    /// Board state.
    pub board: GameBoard,
}

impl Snapshot {
    /// Decodes a bare snapshot.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let snapshot: Self = serde_json::from_str(json)?;
        debug!(version = snapshot.version, game = %snapshot.board.kind(), "Decoded snapshot");
        Ok(snapshot)
    }
}

/// Event received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum InboundEvent {
    /// Full state push.
    Snapshot(Snapshot),
    /// Authoritative timer start for a turn.
    TimerStart {
        /// Player the timer runs for.
        current_player_id: PlayerId,
        /// Turn start, in epoch milliseconds.
        start_time: i64,
        /// Turn budget in milliseconds.
        time_limit: i64,
    },
    /// Authoritative low-time warning.
    TimerWarning {
        /// Player being warned.
        current_player_id: PlayerId,
    },
    /// Authoritative turn timeout.
    TimerTimeout {
        /// Player who ran out of time.
        timed_out_player_id: PlayerId,
    },
    /// Game ended because a player ran out of time.
    GameTimeout {
        /// Player who ran out of time.
        timed_out_player_id: PlayerId,
        /// Winner, if the server names one.
        #[serde(default)]
        winner_id: Option<PlayerId>,
    },
}

impl InboundEvent {
    /// Decodes an event from JSON text.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let event: Self = serde_json::from_str(json)?;
        debug!(event = event.name(), "Decoded inbound event");
        Ok(event)
    }

    /// Short event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Snapshot(_) => "snapshot",
            Self::TimerStart { .. } => "timer_start",
            Self::TimerWarning { .. } => "timer_warning",
            Self::TimerTimeout { .. } => "timer_timeout",
            Self::GameTimeout { .. } => "game_timeout",
        }
    }
}

/// A committed move, tagged by game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameMove {
    /// Chess move.
    Chess(ChessMove),
    /// Checkers move.
    Checkers(CheckersMove),
    /// Backgammon move.
    Backgammon(BackgammonMove),
}

/// Message sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Submit a move.
    Move(GameMove),
    /// Ask the server to roll dice (backgammon).
    RollDice,
}

impl OutboundMessage {
    /// Encodes the message as JSON text.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
