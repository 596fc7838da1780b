//! Per-turn countdown timer.

mod clock;
mod countdown;
mod machine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, TimerListener};
pub use machine::{TimerGate, TimerMachine, TimerPhase, TimerSignal, TimerState};
