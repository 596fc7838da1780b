//! Pure per-turn timer state machine.
//!
//! No clocks or tasks live here; [`super::Countdown`] drives [`TimerMachine::tick`]
//! and forwards the emitted signals.

use crate::config::TimerConfig;
use derive_more::Display;
use tracing::{debug, instrument};

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimerPhase {
    /// Not counting.
    #[display("inactive")]
    Inactive,
    /// Counting, above the warning threshold.
    #[display("active")]
    Active,
    /// Counting, at or below the warning threshold.
    #[display("warning")]
    Warning,
    /// Reached zero.
    #[display("expired")]
    Expired,
}

/// Conditions under which the local timer may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_new::new)]
pub struct TimerGate {
    /// Game has begun.
    pub started: bool,
    /// Game is over.
    pub finished: bool,
    /// It is the local player's turn.
    pub my_turn: bool,
}

impl TimerGate {
    /// Whether all conditions allow counting.
    pub fn is_open(&self) -> bool {
        self.started && !self.finished && self.my_turn
    }
}

/// Snapshot of the timer for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerState {
    /// Whole seconds left.
    pub time_left: u32,
    /// Warning has fired this turn. Only a reset clears it.
    pub is_warning: bool,
    /// Currently counting.
    pub is_active: bool,
    /// `time_left` as a percentage of the turn budget, 0..=100.
    pub progress_percent: f32,
}

/// One-shot notification emitted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// Low-time warning.
    Warning {
        /// Seconds left when it fired.
        time_left: u32,
    },
    /// Time ran out.
    Timeout,
}

/// Per-turn countdown state.
///
/// Warning and timeout each fire at most once between resets. Every
/// transition that invalidates a running tick loop bumps the epoch.
#[derive(Debug, Clone)]
pub struct TimerMachine {
    total: u32,
    threshold: u32,
    phase: TimerPhase,
    time_left: u32,
    warned: bool,
    timeout_fired: bool,
    gate: TimerGate,
    epoch: u64,
}

impl TimerMachine {
    /// Creates an inactive timer holding the full budget.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            total: *config.total_time(),
            threshold: config.warning_threshold(),
            phase: TimerPhase::Inactive,
            time_left: *config.total_time(),
            warned: false,
            timeout_fired: false,
            gate: TimerGate::default(),
            epoch: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Seconds left.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Generation counter for tick loops.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current gate.
    pub fn gate(&self) -> TimerGate {
        self.gate
    }

    /// Whether the timer is counting.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Active | TimerPhase::Warning)
    }

    /// Display snapshot.
    pub fn state(&self) -> TimerState {
        let progress = if self.total == 0 {
            0.0
        } else {
            (self.time_left as f32 / self.total as f32 * 100.0).clamp(0.0, 100.0)
        };
        TimerState {
            time_left: self.time_left,
            is_warning: self.warned,
            is_active: self.is_running(),
            progress_percent: progress,
        }
    }

    fn running_phase(&self) -> TimerPhase {
        if self.time_left == 0 || self.timeout_fired {
            TimerPhase::Expired
        } else if self.warned && self.time_left <= self.threshold {
            TimerPhase::Warning
        } else {
            TimerPhase::Active
        }
    }

    fn transition(&mut self, next: TimerPhase) {
        if next != self.phase {
            debug!(from = %self.phase, to = %next, "Timer phase change");
            self.phase = next;
            self.epoch += 1;
        }
    }

    /// Updates the gate, pausing or resuming without touching time left.
    ///
    /// Resuming inside the warning window fires the warning right away if
    /// it has not fired yet.
    #[instrument(skip(self))]
    pub fn set_gate(&mut self, gate: TimerGate) -> Option<TimerSignal> {
        self.gate = gate;
        let mut signal = None;
        let next = if !gate.is_open() {
            TimerPhase::Inactive
        } else if self.phase == TimerPhase::Inactive {
            if self.time_left > 0
                && self.time_left <= self.threshold
                && !self.warned
                && !self.timeout_fired
            {
                self.warned = true;
                debug!(time_left = self.time_left, "Resumed inside warning window");
                signal = Some(TimerSignal::Warning {
                    time_left: self.time_left,
                });
            }
            self.running_phase()
        } else {
            self.phase
        };
        self.transition(next);
        signal
    }

    /// Restores the full budget and clears both one-shot guards.
    ///
    /// Idempotent: resetting twice leaves the same state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.time_left = self.total;
        self.warned = false;
        self.timeout_fired = false;
        self.phase = if self.gate.is_open() {
            TimerPhase::Active
        } else {
            TimerPhase::Inactive
        };
        self.epoch += 1;
        debug!(time_left = self.time_left, phase = %self.phase, "Timer reset");
    }

    /// Aligns with an authoritative server start.
    ///
    /// Time left is the remaining budget rounded up to whole seconds. A
    /// result inside the warning window fires the warning right away if it
    /// has not fired yet.
    #[instrument(skip(self))]
    pub fn resync(&mut self, start_ms: i64, limit_ms: i64, now_ms: i64) -> Option<TimerSignal> {
        let elapsed = now_ms.saturating_sub(start_ms);
        let remaining_ms = limit_ms.saturating_sub(elapsed).max(0);
        let secs = u32::try_from((remaining_ms + 999) / 1000).unwrap_or(u32::MAX);
        self.time_left = secs;
        self.epoch += 1;

        if secs == 0 || !self.gate.is_open() {
            self.phase = TimerPhase::Inactive;
            debug!(secs, "Resynced without running");
            return None;
        }

        if secs > self.threshold {
            self.warned = false;
            self.phase = TimerPhase::Active;
            debug!(secs, "Resynced above warning threshold");
            return None;
        }

        self.phase = TimerPhase::Warning;
        if self.warned {
            return None;
        }
        self.warned = true;
        debug!(secs, "Resynced inside warning window");
        Some(TimerSignal::Warning { time_left: secs })
    }

    /// Advances one second for the tick loop started at `epoch`.
    ///
    /// Stale epochs and stopped timers are no-ops.
    pub fn tick(&mut self, epoch: u64) -> Option<TimerSignal> {
        if epoch != self.epoch || !self.is_running() {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);

        if self.time_left == 0 {
            self.phase = TimerPhase::Expired;
            if self.timeout_fired {
                return None;
            }
            self.timeout_fired = true;
            return Some(TimerSignal::Timeout);
        }

        if self.time_left <= self.threshold && !self.warned {
            self.warned = true;
            self.phase = TimerPhase::Warning;
            return Some(TimerSignal::Warning {
                time_left: self.time_left,
            });
        }
        None
    }

    /// Applies a server-issued warning.
    #[instrument(skip(self))]
    pub fn force_warning(&mut self) -> Option<TimerSignal> {
        if self.warned {
            return None;
        }
        self.warned = true;
        if self.phase == TimerPhase::Active {
            self.phase = TimerPhase::Warning;
        }
        Some(TimerSignal::Warning {
            time_left: self.time_left,
        })
    }

    /// Applies a server-issued timeout.
    #[instrument(skip(self))]
    pub fn force_timeout(&mut self) -> Option<TimerSignal> {
        self.time_left = 0;
        self.transition(TimerPhase::Expired);
        if self.timeout_fired {
            return None;
        }
        self.timeout_fired = true;
        Some(TimerSignal::Timeout)
    }
}
