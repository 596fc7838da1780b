//! Tests for the pure turn timer state machine.

use strictly_boards::{TimerConfig, TimerGate, TimerMachine, TimerPhase, TimerSignal};

fn open() -> TimerGate {
    TimerGate::new(true, false, true)
}

fn running(config: &TimerConfig) -> TimerMachine {
    let mut machine = TimerMachine::new(config);
    machine.set_gate(open());
    machine.reset();
    machine
}

fn tick(machine: &mut TimerMachine) -> Option<TimerSignal> {
    let epoch = machine.epoch();
    machine.tick(epoch)
}

#[test]
fn test_warning_fires_exactly_at_threshold() {
    let mut machine = running(&TimerConfig::default());
    for expected_left in (11..30).rev() {
        assert_eq!(tick(&mut machine), None);
        assert_eq!(machine.time_left(), expected_left);
        assert_eq!(machine.phase(), TimerPhase::Active);
    }
    assert_eq!(
        tick(&mut machine),
        Some(TimerSignal::Warning { time_left: 10 })
    );
    assert!(machine.state().is_warning);

    for _ in 0..9 {
        assert_eq!(tick(&mut machine), None);
    }
    assert_eq!(machine.time_left(), 1);
}

#[test]
fn test_warning_threshold_follows_config() {
    let config = TimerConfig::new(60, 45).unwrap();
    let mut machine = running(&config);
    let signals: Vec<_> = (0..60).filter_map(|_| tick(&mut machine)).collect();
    assert_eq!(
        signals,
        vec![TimerSignal::Warning { time_left: 15 }, TimerSignal::Timeout]
    );
}

#[test]
fn test_timeout_fires_once() {
    let mut machine = running(&TimerConfig::default());
    // One second left; inside the warning window.
    assert_eq!(
        machine.resync(0, 1_000, 0),
        Some(TimerSignal::Warning { time_left: 1 })
    );

    assert_eq!(tick(&mut machine), Some(TimerSignal::Timeout));
    assert_eq!(machine.phase(), TimerPhase::Expired);
    assert_eq!(machine.time_left(), 0);

    for _ in 0..5 {
        assert_eq!(tick(&mut machine), None);
    }
    assert_eq!(machine.force_timeout(), None);
    assert_eq!(machine.time_left(), 0);
}

#[test]
fn test_reset_is_idempotent() {
    let mut machine = running(&TimerConfig::default());
    for _ in 0..25 {
        tick(&mut machine);
    }
    machine.reset();
    let once = (machine.phase(), machine.state());
    machine.reset();
    let twice = (machine.phase(), machine.state());
    assert_eq!(once, twice);
    assert_eq!(twice.1.time_left, 30);
    assert!(!twice.1.is_warning);
    assert_eq!(twice.1.progress_percent, 100.0);
}

#[test]
fn test_reset_rearms_warning_and_timeout() {
    let mut machine = running(&TimerConfig::default());
    let first: Vec<_> = (0..30).filter_map(|_| tick(&mut machine)).collect();
    machine.reset();
    let second: Vec<_> = (0..30).filter_map(|_| tick(&mut machine)).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_reset_with_closed_gate_stays_inactive() {
    let mut machine = TimerMachine::new(&TimerConfig::default());
    machine.set_gate(TimerGate::new(true, false, false));
    machine.reset();
    assert_eq!(machine.phase(), TimerPhase::Inactive);
    assert_eq!(tick(&mut machine), None);
    assert_eq!(machine.time_left(), 30);
}

#[test]
fn test_any_closed_condition_stops_counting() {
    for gate in [
        TimerGate::new(false, false, true),
        TimerGate::new(true, true, true),
        TimerGate::new(true, false, false),
    ] {
        let mut machine = running(&TimerConfig::default());
        machine.set_gate(gate);
        assert_eq!(machine.phase(), TimerPhase::Inactive, "{:?}", gate);
        assert!(!machine.state().is_active);
    }
}

#[test]
fn test_resync_above_threshold_is_silent() {
    let mut machine = running(&TimerConfig::default());
    assert_eq!(machine.resync(10_000, 30_000, 15_000), None);
    assert_eq!(machine.time_left(), 25);
    assert_eq!(machine.phase(), TimerPhase::Active);
}

#[test]
fn test_resync_rounds_remaining_up() {
    let mut machine = running(&TimerConfig::default());
    // 10.001s left rounds to 11, above the threshold.
    assert_eq!(machine.resync(0, 30_000, 19_999), None);
    assert_eq!(machine.time_left(), 11);
    // Exactly 10s left lands on the threshold.
    assert_eq!(
        machine.resync(0, 30_000, 20_000),
        Some(TimerSignal::Warning { time_left: 10 })
    );
}

#[test]
fn test_resync_inside_window_warns_once() {
    let mut machine = running(&TimerConfig::default());
    assert_eq!(
        machine.resync(0, 30_000, 21_500),
        Some(TimerSignal::Warning { time_left: 9 })
    );
    assert_eq!(machine.resync(0, 30_000, 22_500), None);
    assert_eq!(machine.time_left(), 8);
    assert!(machine.state().is_warning);
}

#[test]
fn test_resync_above_threshold_rearms_warning() {
    let mut machine = running(&TimerConfig::default());
    machine.resync(0, 30_000, 25_000);
    machine.resync(0, 30_000, 0);
    assert_eq!(machine.time_left(), 30);
    let signals: Vec<_> = (0..20).filter_map(|_| tick(&mut machine)).collect();
    assert_eq!(signals, vec![TimerSignal::Warning { time_left: 10 }]);
}

#[test]
fn test_resync_past_limit_goes_inactive() {
    let mut machine = running(&TimerConfig::default());
    assert_eq!(machine.resync(0, 30_000, 45_000), None);
    assert_eq!(machine.time_left(), 0);
    assert_eq!(machine.phase(), TimerPhase::Inactive);
}

#[test]
fn test_resync_with_closed_gate_does_not_run() {
    let mut machine = TimerMachine::new(&TimerConfig::default());
    assert_eq!(machine.resync(0, 30_000, 25_000), None);
    assert_eq!(machine.time_left(), 5);
    assert_eq!(machine.phase(), TimerPhase::Inactive);
}

#[test]
fn test_warning_guard_survives_pause() {
    let mut machine = running(&TimerConfig::default());
    for _ in 0..22 {
        tick(&mut machine);
    }
    machine.set_gate(TimerGate::new(true, false, false));
    machine.set_gate(open());
    assert_eq!(machine.phase(), TimerPhase::Warning);
    assert_eq!(machine.force_warning(), None);
}

#[test]
fn test_warning_flag_holds_through_expiry_and_pause() {
    let mut machine = running(&TimerConfig::default());
    for _ in 0..20 {
        tick(&mut machine);
    }
    assert!(machine.state().is_warning);

    machine.set_gate(TimerGate::new(true, false, false));
    assert_eq!(machine.phase(), TimerPhase::Inactive);
    assert!(machine.state().is_warning);

    machine.set_gate(open());
    for _ in 0..10 {
        tick(&mut machine);
    }
    let state = machine.state();
    assert_eq!(state.time_left, 0);
    assert_eq!(machine.phase(), TimerPhase::Expired);
    assert!(state.is_warning);

    machine.reset();
    assert!(!machine.state().is_warning);
}

#[test]
fn test_resume_inside_window_warns_immediately() {
    let mut machine = TimerMachine::new(&TimerConfig::default());
    assert_eq!(machine.resync(0, 30_000, 25_000), None);
    assert!(!machine.state().is_warning);

    assert_eq!(
        machine.set_gate(open()),
        Some(TimerSignal::Warning { time_left: 5 })
    );
    assert_eq!(machine.phase(), TimerPhase::Warning);
    assert!(machine.state().is_warning);

    machine.set_gate(TimerGate::new(true, false, false));
    assert_eq!(machine.set_gate(open()), None);
}

#[test]
fn test_resume_above_window_is_silent() {
    let mut machine = TimerMachine::new(&TimerConfig::default());
    assert_eq!(machine.set_gate(open()), None);
    assert_eq!(machine.phase(), TimerPhase::Active);
}
