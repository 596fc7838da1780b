//! Tests for the game session: selection, commits, timer coupling and
//! server event handling.

use std::sync::Arc;
use std::time::Duration;
use strictly_backgammon::{
    BackgammonBoard, BackgammonMove, BackgammonPosition, Color as BgColor, Destination, DiceRoll,
    Origin, PerColor,
};
use strictly_boards::{
    Backgammon, BackgammonTarget, BoardGame, ChannelOutbox, Checkers, Chess, ClickOutcome, Clock,
    EventDisposition, GameBoard, GameMove, GameSession, InboundEvent, ManualClock,
    OutboundMessage, Selection, SessionError, Snapshot, TimerConfig, TimerSignal,
};
use strictly_checkers::{CheckersBoard, CheckersMove, Owner};
use strictly_chess::{
    ChessBoard, ChessMove, ChessPiece, Color, PieceKind, PromotionPiece, Square,
};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

const ME: &str = "alice";
const OPPONENT: &str = "bob";

struct Harness<G: BoardGame> {
    session: GameSession<G, ChannelOutbox>,
    sent: UnboundedReceiver<OutboundMessage>,
    signals: UnboundedReceiver<TimerSignal>,
    clock: Arc<ManualClock>,
}

impl<G: BoardGame> Harness<G> {
    fn new(side: G::Side) -> Self {
        let (outbox, sent) = ChannelOutbox::new();
        let (tx, signals) = unbounded_channel::<TimerSignal>();
        let clock = Arc::new(ManualClock::new(100_000));
        let session = GameSession::with_clock(
            ME.to_string(),
            side,
            &TimerConfig::default(),
            Arc::new(tx),
            outbox,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        Self {
            session,
            sent,
            signals,
            clock,
        }
    }

    fn sent(&mut self) -> Vec<OutboundMessage> {
        let mut out = Vec::new();
        while let Ok(message) = self.sent.try_recv() {
            out.push(message);
        }
        out
    }

    fn signals(&mut self) -> Vec<TimerSignal> {
        let mut out = Vec::new();
        while let Ok(signal) = self.signals.try_recv() {
            out.push(signal);
        }
        out
    }
}

fn snapshot(version: u64, current: &str, board: GameBoard) -> Snapshot {
    Snapshot {
        version,
        current_player_id: Some(current.to_string()),
        started: true,
        finished: false,
        board,
    }
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn chess(version: u64, current: &str, board: ChessBoard) -> InboundEvent {
    InboundEvent::Snapshot(snapshot(version, current, GameBoard::Chess(board)))
}

#[tokio::test(start_paused = true)]
async fn test_chess_click_commits_and_resets_timer() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(h.session.timer_state().time_left, 25);

    let selected = h.session.click(sq(6, 4)).unwrap();
    assert!(matches!(selected, ClickOutcome::Selected { .. }));
    let committed = h.session.click(sq(4, 4)).unwrap();
    assert_eq!(
        committed,
        ClickOutcome::Committed(ChessMove::new(sq(6, 4), sq(4, 4)))
    );

    assert_eq!(
        h.sent(),
        vec![OutboundMessage::Move(GameMove::Chess(ChessMove::new(
            sq(6, 4),
            sq(4, 4)
        )))]
    );
    assert_eq!(*h.session.selection(), Selection::Idle);
    assert_eq!(h.session.timer_state().time_left, 30);
}

#[test]
fn test_clicks_ignored_when_not_my_turn() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, OPPONENT, ChessBoard::standard()));
    assert_eq!(h.session.click(sq(6, 4)).unwrap(), ClickOutcome::Ignored);
    assert_eq!(*h.session.selection(), Selection::Idle);
    assert!(h.sent().is_empty());
}

#[test]
fn test_clicks_ignored_before_start_and_without_board() {
    let mut h = Harness::<Chess>::new(Color::White);
    assert_eq!(h.session.click(sq(6, 4)).unwrap(), ClickOutcome::Ignored);

    let mut waiting = snapshot(1, ME, GameBoard::Chess(ChessBoard::standard()));
    waiting.started = false;
    h.session.handle_event(InboundEvent::Snapshot(waiting));
    assert_eq!(h.session.click(sq(6, 4)).unwrap(), ClickOutcome::Ignored);
    assert!(!h.session.timer_state().is_active);
}

#[test]
fn test_promotion_waits_for_choice() {
    let board =
        ChessBoard::empty().with(sq(1, 3), ChessPiece::new(PieceKind::Pawn, Color::White));
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, board));

    h.session.click(sq(1, 3)).unwrap();
    let outcome = h.session.click(sq(0, 3)).unwrap();
    assert!(matches!(outcome, ClickOutcome::AwaitingChoice(_)));
    assert!(h.sent().is_empty());

    let mv = h.session.choose_promotion(PromotionPiece::Queen).unwrap();
    let expected = ChessMove::promoting(sq(1, 3), sq(0, 3), PromotionPiece::Queen);
    assert_eq!(mv, Some(expected));
    assert_eq!(
        h.sent(),
        vec![OutboundMessage::Move(GameMove::Chess(expected))]
    );
}

#[test]
fn test_cancel_pending_sends_nothing() {
    let board =
        ChessBoard::empty().with(sq(6, 0), ChessPiece::new(PieceKind::Pawn, Color::Black));
    let mut h = Harness::<Chess>::new(Color::Black);
    h.session.handle_event(chess(1, ME, board));

    h.session.click(sq(6, 0)).unwrap();
    h.session.click(sq(7, 0)).unwrap();
    assert!(h.session.selection().is_awaiting_choice());

    h.session.cancel_pending();
    assert_eq!(*h.session.selection(), Selection::Idle);
    assert_eq!(h.session.choose_promotion(PromotionPiece::Rook).unwrap(), None);
    assert!(h.sent().is_empty());
}

#[test]
fn test_new_snapshot_discards_selection() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    h.session.click(sq(6, 4)).unwrap();
    assert!(h.session.selection().origin().is_some());

    assert_eq!(
        h.session.handle_event(chess(2, ME, ChessBoard::standard())),
        EventDisposition::Applied
    );
    assert_eq!(*h.session.selection(), Selection::Idle);
}

#[test]
fn test_stale_snapshot_ignored() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(5, ME, ChessBoard::standard()));
    assert_eq!(
        h.session.handle_event(chess(4, OPPONENT, ChessBoard::empty())),
        EventDisposition::Ignored
    );
    assert_eq!(h.session.turn().unwrap().version, 5);
    assert!(h.session.is_my_turn());
    assert_eq!(h.session.board(), Some(&ChessBoard::standard()));
}

#[test]
fn test_snapshot_for_other_game_ignored() {
    let mut h = Harness::<Chess>::new(Color::White);
    let event = InboundEvent::Snapshot(snapshot(
        1,
        ME,
        GameBoard::Checkers(CheckersBoard::standard()),
    ));
    assert_eq!(h.session.handle_event(event), EventDisposition::Ignored);
    assert!(h.session.board().is_none());
}

#[test]
fn test_in_check_reads_current_board() {
    let board = ChessBoard::empty()
        .with(sq(7, 4), ChessPiece::new(PieceKind::King, Color::White))
        .with(sq(0, 4), ChessPiece::new(PieceKind::Rook, Color::Black));
    let mut h = Harness::<Chess>::new(Color::White);
    assert!(!h.session.in_check(Color::White));
    h.session.handle_event(chess(1, ME, board));
    assert!(h.session.in_check(Color::White));
    assert!(!h.session.in_check(Color::Black));
}

#[tokio::test(start_paused = true)]
async fn test_turn_handoff_resets_and_gates_timer() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    assert!(h.session.timer_state().is_active);

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    // Same player on turn: no reset.
    h.session.handle_event(chess(2, ME, ChessBoard::standard()));
    assert_eq!(h.session.timer_state().time_left, 25);

    h.session.handle_event(chess(3, OPPONENT, ChessBoard::standard()));
    let state = h.session.timer_state();
    assert!(!state.is_active);
    assert_eq!(state.time_left, 30);

    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(h.session.timer_state().time_left, 30);
    assert!(h.signals().is_empty());

    h.session.handle_event(chess(4, ME, ChessBoard::standard()));
    let state = h.session.timer_state();
    assert!(state.is_active);
    assert_eq!(state.time_left, 30);
}

#[tokio::test(start_paused = true)]
async fn test_local_expiry_fires_timeout_once() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));

    tokio::time::sleep(Duration::from_millis(30_500)).await;
    assert_eq!(
        h.signals(),
        vec![TimerSignal::Warning { time_left: 10 }, TimerSignal::Timeout]
    );

    // The authoritative timeout arriving afterwards does not fire again.
    h.session.handle_event(InboundEvent::TimerTimeout {
        timed_out_player_id: ME.to_string(),
    });
    assert!(h.signals().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timer_start_resyncs_from_clock() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));

    let now = h.clock.now_millis();
    let event = InboundEvent::TimerStart {
        current_player_id: ME.to_string(),
        start_time: now - 21_500,
        time_limit: 30_000,
    };
    assert_eq!(h.session.handle_event(event), EventDisposition::Applied);
    assert_eq!(h.session.timer_state().time_left, 9);
    assert_eq!(h.signals(), vec![TimerSignal::Warning { time_left: 9 }]);

    h.clock.advance(1_000);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(h.session.timer_state().time_left, 8);
}

#[tokio::test(start_paused = true)]
async fn test_timer_start_ahead_of_snapshot_survives_handoff() {
    let mut h = Harness::<Chess>::new(Color::White);
    let now = h.clock.now_millis();
    let event = InboundEvent::TimerStart {
        current_player_id: ME.to_string(),
        start_time: now - 25_000,
        time_limit: 30_000,
    };
    assert_eq!(h.session.handle_event(event), EventDisposition::Applied);
    assert!(h.signals().is_empty());

    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    let state = h.session.timer_state();
    assert_eq!(state.time_left, 5);
    assert!(state.is_active);
    assert_eq!(h.signals(), vec![TimerSignal::Warning { time_left: 5 }]);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(h.session.timer_state().time_left, 4);
}

#[tokio::test(start_paused = true)]
async fn test_timer_start_from_earlier_turn_is_dropped() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    let now = h.clock.now_millis();
    h.session.handle_event(InboundEvent::TimerStart {
        current_player_id: ME.to_string(),
        start_time: now - 25_000,
        time_limit: 30_000,
    });
    assert_eq!(h.session.timer_state().time_left, 5);

    h.session.handle_event(chess(2, OPPONENT, ChessBoard::standard()));
    h.session.handle_event(chess(3, ME, ChessBoard::standard()));
    let state = h.session.timer_state();
    assert_eq!(state.time_left, 30);
    assert!(!state.is_warning);
}

#[tokio::test(start_paused = true)]
async fn test_timer_events_for_other_player_ignored() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));

    let events = [
        InboundEvent::TimerStart {
            current_player_id: OPPONENT.to_string(),
            start_time: 0,
            time_limit: 30_000,
        },
        InboundEvent::TimerWarning {
            current_player_id: OPPONENT.to_string(),
        },
        InboundEvent::TimerTimeout {
            timed_out_player_id: OPPONENT.to_string(),
        },
    ];
    for event in events {
        assert_eq!(h.session.handle_event(event), EventDisposition::Ignored);
    }
    assert_eq!(h.session.timer_state().time_left, 30);
    assert!(h.signals().is_empty());

    h.session.handle_event(InboundEvent::TimerWarning {
        current_player_id: ME.to_string(),
    });
    assert_eq!(h.signals(), vec![TimerSignal::Warning { time_left: 30 }]);
}

#[tokio::test(start_paused = true)]
async fn test_game_timeout_ends_play() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    h.session.click(sq(6, 4)).unwrap();

    h.session.handle_event(InboundEvent::GameTimeout {
        timed_out_player_id: ME.to_string(),
        winner_id: Some(OPPONENT.to_string()),
    });
    assert!(h.session.turn().unwrap().finished);
    assert_eq!(*h.session.selection(), Selection::Idle);
    assert!(!h.session.timer_state().is_active);
    assert_eq!(h.session.click(sq(6, 4)).unwrap(), ClickOutcome::Ignored);
}

#[test]
fn test_checkers_click_commits() {
    let mut h = Harness::<Checkers>::new(Owner::Second);
    let event = InboundEvent::Snapshot(snapshot(
        1,
        ME,
        GameBoard::Checkers(CheckersBoard::standard()),
    ));
    h.session.handle_event(event);

    // Row 2, col 1 steps down-left to row 3, col 0.
    h.session.click(17).unwrap();
    let outcome = h.session.click(24).unwrap();
    assert_eq!(outcome, ClickOutcome::Committed(CheckersMove::new(17, 24)));
    assert_eq!(
        h.sent(),
        vec![OutboundMessage::Move(GameMove::Checkers(CheckersMove::new(
            17, 24
        )))]
    );
}

#[test]
fn test_second_move_blocked_until_newer_snapshot() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    h.session.click(sq(6, 4)).unwrap();
    h.session.click(sq(4, 4)).unwrap();
    assert_eq!(h.sent().len(), 1);
    assert!(h.session.awaiting_reply());

    assert_eq!(h.session.click(sq(6, 3)).unwrap(), ClickOutcome::Ignored);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    assert_eq!(h.session.click(sq(6, 3)).unwrap(), ClickOutcome::Ignored);
    assert!(h.sent().is_empty());

    h.session.handle_event(chess(2, ME, ChessBoard::standard()));
    assert!(!h.session.awaiting_reply());
    assert!(matches!(
        h.session.click(sq(6, 3)).unwrap(),
        ClickOutcome::Selected { .. }
    ));
}

fn backgammon(version: u64, current: &str, position: BackgammonPosition) -> InboundEvent {
    InboundEvent::Snapshot(snapshot(version, current, GameBoard::Backgammon(position)))
}

#[test]
fn test_bear_off_click_spends_smallest_sufficient_die() {
    let board = BackgammonBoard::from_counts(
        &[(21, BgColor::White, 15), (0, BgColor::Black, 15)],
        PerColor::default(),
        PerColor::default(),
    )
    .unwrap();
    let position = BackgammonPosition::new(board, DiceRoll::roll(6, 4).ok());
    let mut h = Harness::<Backgammon>::new(BgColor::White);
    h.session.handle_event(backgammon(1, ME, position));

    let selected = h.session.click(BackgammonTarget::Point(21)).unwrap();
    assert!(matches!(
        selected,
        ClickOutcome::Selected { ref destinations, .. }
            if destinations.len() == 1 && destinations.contains(&BackgammonTarget::BearOff)
    ));

    h.session.click(BackgammonTarget::BearOff).unwrap();
    assert_eq!(
        h.sent(),
        vec![OutboundMessage::Move(GameMove::Backgammon(BackgammonMove {
            from: Origin::Point(21),
            to: Destination::BearOff,
            die_value: 4,
        }))]
    );
    // Backgammon turns hold several moves.
    assert!(h.session.can_act());
}

#[test]
fn test_roll_dice_rules() {
    let mut h = Harness::<Backgammon>::new(BgColor::White);
    let unrolled = BackgammonPosition::new(BackgammonBoard::standard(), None);

    assert!(matches!(
        h.session.roll_dice(),
        Err(SessionError::GameNotActive)
    ));

    h.session.handle_event(backgammon(1, OPPONENT, unrolled.clone()));
    assert!(matches!(h.session.roll_dice(), Err(SessionError::NotYourTurn)));

    h.session.handle_event(backgammon(2, ME, unrolled));
    h.session.roll_dice().unwrap();
    assert_eq!(h.sent(), vec![OutboundMessage::RollDice]);

    let rolled = BackgammonPosition::new(BackgammonBoard::standard(), DiceRoll::roll(3, 1).ok());
    h.session.handle_event(backgammon(3, ME, rolled));
    assert!(matches!(
        h.session.roll_dice(),
        Err(SessionError::DiceAlreadyRolled)
    ));

    let spent = BackgammonPosition::new(
        BackgammonBoard::standard(),
        DiceRoll::new((3, 1), Vec::new()).ok(),
    );
    h.session.handle_event(backgammon(4, ME, spent));
    h.session.roll_dice().unwrap();
    assert_eq!(h.sent(), vec![OutboundMessage::RollDice]);
}

#[test]
fn test_backgammon_without_dice_selects_nothing_to_move() {
    let mut h = Harness::<Backgammon>::new(BgColor::White);
    h.session.handle_event(backgammon(
        1,
        ME,
        BackgammonPosition::new(BackgammonBoard::standard(), None),
    ));
    let outcome = h.session.click(BackgammonTarget::Point(0)).unwrap();
    assert!(matches!(
        outcome,
        ClickOutcome::Selected { ref destinations, .. } if destinations.is_empty()
    ));
}

#[test]
fn test_decode_errors_leave_state_untouched() {
    let mut h = Harness::<Chess>::new(Color::White);
    h.session.handle_event(chess(1, ME, ChessBoard::standard()));
    assert!(InboundEvent::from_json(r#"{"type":"snapshot","version":2}"#).is_err());
    assert_eq!(h.session.turn().unwrap().version, 1);
}
