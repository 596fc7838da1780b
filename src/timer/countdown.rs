//! Tokio-driven countdown around [`TimerMachine`].

use super::machine::{TimerGate, TimerMachine, TimerSignal, TimerState};
use crate::config::TimerConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Receives one-shot timer notifications.
pub trait TimerListener: Send + Sync {
    /// Low-time warning with seconds left.
    fn on_warning(&self, time_left: u32);
    /// Time ran out.
    fn on_timeout(&self);
}

impl TimerListener for mpsc::UnboundedSender<TimerSignal> {
    fn on_warning(&self, time_left: u32) {
        if self.send(TimerSignal::Warning { time_left }).is_err() {
            debug!("Timer listener dropped");
        }
    }

    fn on_timeout(&self) {
        if self.send(TimerSignal::Timeout).is_err() {
            debug!("Timer listener dropped");
        }
    }
}

fn dispatch(listener: &dyn TimerListener, signal: TimerSignal) {
    match signal {
        TimerSignal::Warning { time_left } => {
            info!(time_left, "Turn timer warning");
            listener.on_warning(time_left);
        }
        TimerSignal::Timeout => {
            info!("Turn timer expired");
            listener.on_timeout();
        }
    }
}

fn lock(machine: &Mutex<TimerMachine>) -> MutexGuard<'_, TimerMachine> {
    machine.lock().unwrap_or_else(PoisonError::into_inner)
}

struct TickTask {
    epoch: u64,
    handle: JoinHandle<()>,
}

/// Server-issued turn start, kept until the turn it belongs to begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ServerStart {
    start_ms: i64,
    limit_ms: i64,
}

/// Countdown that ticks once per period while its machine is running.
///
/// At most one tick task exists at a time. The task is stamped with the
/// machine epoch it was started for and stops as soon as that epoch is
/// superseded. Dropping the countdown aborts the task.
pub struct Countdown {
    machine: Arc<Mutex<TimerMachine>>,
    listener: Arc<dyn TimerListener>,
    period: Duration,
    task: Option<TickTask>,
    held: Option<ServerStart>,
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("state", &self.state())
            .field("period", &self.period)
            .field("ticking", &self.is_ticking())
            .finish()
    }
}

impl Countdown {
    /// Creates an inactive countdown.
    pub fn new(config: &TimerConfig, listener: Arc<dyn TimerListener>) -> Self {
        Self {
            machine: Arc::new(Mutex::new(TimerMachine::new(config))),
            listener,
            period: config.tick_period(),
            task: None,
            held: None,
        }
    }

    /// Display snapshot.
    pub fn state(&self) -> TimerState {
        lock(&self.machine).state()
    }

    /// Copy of the underlying machine.
    pub fn machine(&self) -> TimerMachine {
        lock(&self.machine).clone()
    }

    /// Whether a tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.handle.is_finished())
    }

    /// Updates the gate.
    pub fn set_gate(&mut self, gate: TimerGate) {
        if let Some(signal) = self.apply(|m| m.set_gate(gate)) {
            dispatch(self.listener.as_ref(), signal);
        }
    }

    /// Full budget, guards cleared. Drops any held server start.
    pub fn reset(&mut self) {
        self.held = None;
        self.apply(TimerMachine::reset);
    }

    /// Starts a new turn under `gate` with the full budget, then re-applies
    /// a server start that arrived ahead of it.
    ///
    /// The held start is used only when `gate` says the turn is the local
    /// player's; otherwise it belonged to an earlier turn and is dropped.
    #[instrument(skip(self))]
    pub fn begin_turn(&mut self, gate: TimerGate, now_ms: i64) {
        let held = self.held.take();
        let resumed = self.apply(|m| {
            m.reset();
            m.set_gate(gate)
        });
        if let Some(signal) = resumed {
            dispatch(self.listener.as_ref(), signal);
        }
        match held {
            Some(start) if gate.my_turn => {
                debug!(?start, "Applying held server start");
                self.resync(start.start_ms, start.limit_ms, now_ms);
            }
            Some(start) => debug!(?start, "Dropping server start from an earlier turn"),
            None => {}
        }
    }

    /// Aligns with an authoritative server start.
    pub fn resync(&mut self, start_ms: i64, limit_ms: i64, now_ms: i64) {
        self.held = Some(ServerStart { start_ms, limit_ms });
        if let Some(signal) = self.apply(|m| m.resync(start_ms, limit_ms, now_ms)) {
            dispatch(self.listener.as_ref(), signal);
        }
    }

    /// Applies a server-issued warning.
    pub fn warn(&mut self) {
        if let Some(signal) = self.apply(TimerMachine::force_warning) {
            dispatch(self.listener.as_ref(), signal);
        }
    }

    /// Applies a server-issued timeout.
    pub fn expire(&mut self) {
        if let Some(signal) = self.apply(TimerMachine::force_timeout) {
            dispatch(self.listener.as_ref(), signal);
        }
    }

    fn apply<R>(&mut self, f: impl FnOnce(&mut TimerMachine) -> R) -> R {
        let out = {
            let mut machine = lock(&self.machine);
            f(&mut machine)
        };
        self.reconcile();
        out
    }

    /// Makes the tick task match the machine: one live task for the
    /// current epoch while running, none otherwise.
    #[instrument(skip(self))]
    fn reconcile(&mut self) {
        let (running, epoch) = {
            let machine = lock(&self.machine);
            (machine.is_running(), machine.epoch())
        };

        if let Some(task) = &self.task
            && running
            && task.epoch == epoch
            && !task.handle.is_finished()
        {
            return;
        }

        if let Some(task) = self.task.take() {
            task.handle.abort();
            debug!(epoch = task.epoch, "Cancelled tick task");
        }

        if running {
            self.task = self.spawn_ticker(epoch);
        }
    }

    fn spawn_ticker(&self, epoch: u64) -> Option<TickTask> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime; countdown will not tick");
            return None;
        };

        let machine = Arc::clone(&self.machine);
        let listener = Arc::clone(&self.listener);
        let period = self.period;
        let first_tick = Instant::now() + period;
        debug!(epoch, ?period, "Starting tick task");

        let handle = runtime.spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (signal, keep_going) = {
                    let mut machine = lock(&machine);
                    let signal = machine.tick(epoch);
                    (signal, machine.is_running() && machine.epoch() == epoch)
                };
                if let Some(signal) = signal {
                    dispatch(listener.as_ref(), signal);
                }
                if !keep_going {
                    debug!(epoch, "Tick task finished");
                    break;
                }
            }
        });

        Some(TickTask { epoch, handle })
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.handle.abort();
        }
    }
}
