//! Outbound message sink.

use crate::protocol::OutboundMessage;
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Failure to hand a message to the transport.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Something that delivers messages to the server.
pub trait Outbox {
    /// Queues a message for delivery.
    fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError>;
}

/// Outbox backed by an unbounded tokio channel.
///
/// The receiving half is drained by whatever owns the real connection.
#[derive(Debug, Clone)]
pub struct ChannelOutbox {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelOutbox {
    /// Creates an outbox and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Outbox for ChannelOutbox {
    #[instrument(skip(self, message))]
    fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError> {
        debug!(?message, "Queueing outbound message");
        self.tx
            .send(message)
            .map_err(|_| TransportError::new("Outbound channel closed"))
    }
}
