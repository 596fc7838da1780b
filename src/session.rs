//! Client-side game session: the board view, selection, turn timer and
//! outbox for one local player.

use crate::config::TimerConfig;
use crate::error::SessionError;
use crate::games::{Backgammon, BoardGame, Chess};
use crate::protocol::{InboundEvent, OutboundMessage, PlayerId, Snapshot};
use crate::selection::{ClickOutcome, Selection};
use crate::timer::{Clock, Countdown, SystemClock, TimerGate, TimerListener, TimerState};
use crate::transport::Outbox;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Turn facts from the latest accepted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    /// Snapshot version.
    pub version: u64,
    /// Player on turn.
    pub current_player_id: Option<PlayerId>,
    /// Game has begun.
    pub started: bool,
    /// Game is over.
    pub finished: bool,
}

/// How an inbound event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// State changed.
    Applied,
    /// Event was stale, for another player, or for another game.
    Ignored,
}

/// One player's view of a running game.
pub struct GameSession<G: BoardGame, O: Outbox> {
    local_player: PlayerId,
    side: G::Side,
    board: Option<G::Board>,
    turn: Option<TurnView>,
    selection: Selection<G>,
    countdown: Countdown,
    clock: Arc<dyn Clock>,
    outbox: O,
    /// Snapshot version a turn-ending move was sent from.
    sent_from: Option<u64>,
}

impl<G: BoardGame, O: Outbox> std::fmt::Debug for GameSession<G, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("game", &G::KIND)
            .field("local_player", &self.local_player)
            .field("side", &self.side)
            .field("turn", &self.turn)
            .field("selection", &self.selection)
            .field("countdown", &self.countdown)
            .finish()
    }
}

impl<G: BoardGame, O: Outbox> GameSession<G, O> {
    /// Creates a session that reads the system clock.
    #[instrument(skip(timer, listener, outbox))]
    pub fn new(
        local_player: PlayerId,
        side: G::Side,
        timer: &TimerConfig,
        listener: Arc<dyn TimerListener>,
        outbox: O,
    ) -> Self {
        Self::with_clock(
            local_player,
            side,
            timer,
            listener,
            outbox,
            Arc::new(SystemClock),
        )
    }

    /// Creates a session with an explicit clock.
    pub fn with_clock(
        local_player: PlayerId,
        side: G::Side,
        timer: &TimerConfig,
        listener: Arc<dyn TimerListener>,
        outbox: O,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(game = %G::KIND, player = %local_player, side = %side, "Creating game session");
        Self {
            local_player,
            side,
            board: None,
            turn: None,
            selection: Selection::Idle,
            countdown: Countdown::new(timer, listener),
            clock,
            outbox,
            sent_from: None,
        }
    }

    /// Local player's id.
    pub fn local_player(&self) -> &str {
        &self.local_player
    }

    /// Local player's side.
    pub fn side(&self) -> G::Side {
        self.side
    }

    /// Latest board, if any snapshot has arrived.
    pub fn board(&self) -> Option<&G::Board> {
        self.board.as_ref()
    }

    /// Latest turn facts.
    pub fn turn(&self) -> Option<&TurnView> {
        self.turn.as_ref()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection<G> {
        &self.selection
    }

    /// Timer display state.
    pub fn timer_state(&self) -> TimerState {
        self.countdown.state()
    }

    /// The outbox.
    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Whether the local player is on turn.
    pub fn is_my_turn(&self) -> bool {
        self.turn
            .as_ref()
            .and_then(|t| t.current_player_id.as_deref())
            .is_some_and(|id| id == self.local_player)
    }

    /// Whether clicks are accepted right now.
    ///
    /// False after a turn-ending move until a newer snapshot arrives.
    pub fn can_act(&self) -> bool {
        self.board.is_some() && self.gate().is_open() && !self.awaiting_reply()
    }

    /// Whether a turn-ending move was sent and its snapshot has not arrived.
    pub fn awaiting_reply(&self) -> bool {
        match (self.sent_from, &self.turn) {
            (Some(sent), Some(turn)) => turn.version <= sent,
            _ => false,
        }
    }

    fn gate(&self) -> TimerGate {
        match &self.turn {
            Some(turn) => TimerGate::new(turn.started, turn.finished, self.is_my_turn()),
            None => TimerGate::default(),
        }
    }

    fn is_local(&self, player: &str) -> bool {
        player == self.local_player
    }

    /// Applies an inbound server event.
    #[instrument(skip(self, event), fields(event = event.name()))]
    pub fn handle_event(&mut self, event: InboundEvent) -> EventDisposition {
        match event {
            InboundEvent::Snapshot(snapshot) => self.apply_snapshot(snapshot),
            InboundEvent::TimerStart {
                current_player_id,
                start_time,
                time_limit,
            } => {
                if !self.is_local(&current_player_id) {
                    debug!(player = %current_player_id, "Timer start for another player");
                    return EventDisposition::Ignored;
                }
                let now = self.clock.now_millis();
                self.countdown.resync(start_time, time_limit, now);
                EventDisposition::Applied
            }
            InboundEvent::TimerWarning { current_player_id } => {
                if !self.is_local(&current_player_id) {
                    debug!(player = %current_player_id, "Warning for another player");
                    return EventDisposition::Ignored;
                }
                self.countdown.warn();
                EventDisposition::Applied
            }
            InboundEvent::TimerTimeout {
                timed_out_player_id,
            } => {
                if !self.is_local(&timed_out_player_id) {
                    debug!(player = %timed_out_player_id, "Timeout for another player");
                    return EventDisposition::Ignored;
                }
                self.countdown.expire();
                EventDisposition::Applied
            }
            InboundEvent::GameTimeout {
                timed_out_player_id,
                winner_id,
            } => {
                info!(
                    timed_out = %timed_out_player_id,
                    winner = ?winner_id,
                    "Game ended on time"
                );
                if let Some(turn) = self.turn.as_mut() {
                    turn.finished = true;
                }
                self.selection.clear();
                let gate = self.gate();
                self.countdown.set_gate(gate);
                EventDisposition::Applied
            }
        }
    }

    /// Replaces the board view with a newer snapshot.
    ///
    /// Versions below the current one are ignored. Any selection is
    /// discarded. A change of player on turn resets the timer, keeping a
    /// server start that already arrived for the local player's turn.
    #[instrument(skip(self, snapshot), fields(version = snapshot.version))]
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> EventDisposition {
        if let Some(turn) = &self.turn
            && snapshot.version < turn.version
        {
            warn!(current = turn.version, "Ignoring stale snapshot");
            return EventDisposition::Ignored;
        }

        let kind = snapshot.board.kind();
        let Some(board) = G::board_from(snapshot.board) else {
            warn!(expected = %G::KIND, got = %kind, "Snapshot for a different game");
            return EventDisposition::Ignored;
        };

        let handoff = self
            .turn
            .as_ref()
            .is_none_or(|t| t.current_player_id != snapshot.current_player_id);

        if !matches!(self.selection, Selection::Idle) {
            debug!("Discarding selection from previous snapshot");
            self.selection.clear();
        }

        if self.sent_from.is_some_and(|sent| snapshot.version > sent) {
            self.sent_from = None;
        }
        self.board = Some(board);
        self.turn = Some(TurnView {
            version: snapshot.version,
            current_player_id: snapshot.current_player_id,
            started: snapshot.started,
            finished: snapshot.finished,
        });

        let gate = self.gate();
        if handoff {
            debug!(my_turn = gate.my_turn, "Turn handoff");
            let now = self.clock.now_millis();
            self.countdown.begin_turn(gate, now);
        } else {
            self.countdown.set_gate(gate);
        }
        EventDisposition::Applied
    }

    /// Handles a click on `target`.
    ///
    /// A no-op unless the local player may act. A completed move is sent
    /// and the timer is reset.
    #[instrument(skip(self))]
    pub fn click(&mut self, target: G::Target) -> Result<ClickOutcome<G>, SessionError> {
        if !self.can_act() {
            debug!("Click ignored: not able to act");
            return Ok(ClickOutcome::Ignored);
        }
        let Some(board) = &self.board else {
            return Ok(ClickOutcome::Ignored);
        };
        match self.selection.click(board, target, self.side) {
            ClickOutcome::Committed(mv) => self.commit(mv).map(ClickOutcome::Committed),
            other => Ok(other),
        }
    }

    /// Completes a pending move with `choice`.
    ///
    /// `Ok(None)` if nothing is pending or the player may not act.
    #[instrument(skip(self))]
    pub fn choose(&mut self, choice: G::Choice) -> Result<Option<G::Move>, SessionError> {
        if !self.can_act() {
            debug!("Choice ignored: not able to act");
            return Ok(None);
        }
        match self.selection.choose(choice) {
            Some(mv) => self.commit(mv).map(Some),
            None => Ok(None),
        }
    }

    /// Abandons a pending move.
    pub fn cancel_pending(&mut self) {
        if self.selection.is_awaiting_choice() {
            debug!("Pending move cancelled");
            self.selection.clear();
        }
    }

    fn commit(&mut self, mv: G::Move) -> Result<G::Move, SessionError> {
        info!(%mv, "Committing move");
        self.outbox
            .send(OutboundMessage::Move(G::into_wire(mv.clone())))?;
        self.selection.clear();
        self.countdown.reset();
        if G::MOVE_ENDS_TURN {
            self.sent_from = self.turn.as_ref().map(|t| t.version);
        }
        Ok(mv)
    }
}

impl<O: Outbox> GameSession<Chess, O> {
    /// Completes a pending promotion with `piece`.
    pub fn choose_promotion(
        &mut self,
        piece: strictly_chess::PromotionPiece,
    ) -> Result<Option<strictly_chess::ChessMove>, SessionError> {
        self.choose(piece)
    }

    /// Whether `color` is in check on the current board.
    pub fn in_check(&self, color: strictly_chess::Color) -> bool {
        self.board
            .as_ref()
            .is_some_and(|board| strictly_chess::is_in_check(board, color))
    }
}

impl<O: Outbox> GameSession<Backgammon, O> {
    /// Asks the server to roll dice.
    ///
    /// Allowed only on the local player's turn while no dice with moves
    /// left are on the board.
    #[instrument(skip(self))]
    pub fn roll_dice(&mut self) -> Result<(), SessionError> {
        let gate = self.gate();
        if !gate.started || gate.finished {
            return Err(SessionError::GameNotActive);
        }
        if !gate.my_turn {
            return Err(SessionError::NotYourTurn);
        }
        if self
            .board
            .as_ref()
            .and_then(|p| p.dice.as_ref())
            .is_some_and(|d| d.has_moves())
        {
            return Err(SessionError::DiceAlreadyRolled);
        }
        info!("Requesting dice roll");
        self.outbox.send(OutboundMessage::RollDice)?;
        Ok(())
    }
}
