//! Cross-thread coordination between the execution thread and the UI
//!
//! The [`Coordinator`] owns every piece of state that both threads touch:
//!
//! | state                         | writer            | reader      |
//! |-------------------------------|-------------------|-------------|
//! | position + tape view          | execution thread  | UI          |
//! | pause / step / stop / delay   | UI (+ breakpoint) | both        |
//! | run phase                     | execution thread  | UI          |
//! | output ring                   | execution thread  | UI          |
//! | IPS sample                    | execution thread  | UI          |
//!
//! Each lives behind its own lock so that, for example, redrawing the output
//! never holds up tape work. Readers copy what they need and release the lock
//! before rendering.
//!
//! The instruction position and the tape contents are published together, so
//! a [`Snapshot`] always pairs them from the same instruction boundary. The
//! execution thread republishes them only when a snapshot has asked for it
//! since the last publish, and before every state change the UI can observe
//! (blocking on `,`, a breakpoint, completion). Snapshots read the phase and
//! the control flags before the boundary, so a state change is never seen
//! with the position from before it.
//!
//! Input is handed over through a single-slot channel: the execution thread
//! announces `AwaitingInput` and blocks on the receiver; [`Controller::
//! supply_input`] sends exactly one byte and retires the request under the
//! phase lock, so a second key press cannot queue a stale byte.

use super::constants::{DELAY_INCREMENT, MAX_DELAY, MIN_DELAY};
use super::engine::Interpreter;
use super::errors::{ControlError, RuntimeError};
use crate::snapshot::{OutputBuffer, Snapshot, Status};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::Duration;

/// Message sent to an execution thread blocked on `,`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handoff {
    Byte(u8),
    Cancel,
}

/// Engine-owned lifecycle phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Running,
    AwaitingInput,
    Completed,
    Failed(RuntimeError),
    /// The loop exited on a stop request
    Stopped,
}

/// Flags written by the presentation layer
#[derive(Debug, Clone, Copy)]
struct ControlFlags {
    paused: bool,
    step_requested: bool,
    stop_requested: bool,
    delay: Duration,
}

/// Engine state at one instruction boundary
#[derive(Debug, Clone, Default)]
struct Boundary {
    ip: usize,
    offset: usize,
    executed: u64,
    cells: Vec<u32>,
    cursor: usize,
}

/// What the execution thread should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    /// Execute one instruction after sleeping for the delay
    Execute(Duration),
    /// Paused with no step pending
    Idle(Duration),
    Stop,
}

/// Shared state between the execution thread and the presentation layer
#[derive(Debug)]
pub struct Coordinator {
    boundary: Mutex<Boundary>,
    control: Mutex<ControlFlags>,
    phase: Mutex<Phase>,
    output: Mutex<OutputBuffer>,
    ips: Mutex<Option<u64>>,
    view_requested: AtomicBool,
}

impl Coordinator {
    /// Create the shared state plus the input channel
    pub(crate) fn new(
        delay: Duration,
        start_paused: bool,
        output_capacity: usize,
    ) -> (Arc<Self>, SyncSender<Handoff>, Receiver<Handoff>) {
        let coordinator = Arc::new(Coordinator {
            boundary: Mutex::new(Boundary::default()),
            control: Mutex::new(ControlFlags {
                paused: start_paused,
                step_requested: false,
                stop_requested: false,
                delay,
            }),
            phase: Mutex::new(Phase::Running),
            output: Mutex::new(OutputBuffer::new(output_capacity)),
            ips: Mutex::new(None),
            view_requested: AtomicBool::new(true),
        });
        let (tx, rx) = mpsc::sync_channel(1);
        (coordinator, tx, rx)
    }

    // ---- execution thread side ----

    pub(crate) fn take_turn(&self) -> Turn {
        let mut control = self.control.lock();
        if control.stop_requested {
            Turn::Stop
        } else if !control.paused {
            Turn::Execute(control.delay)
        } else if control.step_requested {
            control.step_requested = false;
            Turn::Execute(control.delay)
        } else {
            Turn::Idle(control.delay)
        }
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.control.lock().stop_requested
    }

    /// Force the paused state (used for breakpoints)
    pub(crate) fn force_pause(&self) {
        let mut control = self.control.lock();
        control.paused = true;
        control.step_requested = false;
    }

    /// Publish the interpreter's position and tape as one boundary
    pub(crate) fn publish(&self, interpreter: &Interpreter) {
        let tape = interpreter.tape();
        let mut boundary = self.boundary.lock();
        boundary.ip = interpreter.ip();
        boundary.offset = interpreter.offset();
        boundary.executed = interpreter.executed();
        boundary.cells.clear();
        boundary.cells.extend_from_slice(tape.cells());
        boundary.cursor = tape.cursor();
    }

    /// Whether a snapshot asked for a fresh boundary since the last publish
    pub(crate) fn take_view_request(&self) -> bool {
        self.view_requested.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        *self.phase.lock() = phase;
    }

    pub(crate) fn push_output(&self, byte: u8) {
        self.output.lock().push(byte);
    }

    pub(crate) fn set_ips(&self, sample: u64) {
        *self.ips.lock() = Some(sample);
    }

    // ---- presentation side ----

    fn snapshot(&self) -> Snapshot {
        self.view_requested.store(true, Ordering::Release);

        // Phase and flags first: the engine publishes before changing them
        let phase = self.phase.lock().clone();
        let control = *self.control.lock();
        let boundary = self.boundary.lock().clone();
        let ips = *self.ips.lock();

        let status = match phase {
            Phase::AwaitingInput => Status::AwaitingInput,
            Phase::Completed => Status::Completed,
            Phase::Failed(err) => Status::Failed(err),
            Phase::Stopped => Status::Stopped,
            Phase::Running if control.paused => Status::Paused,
            Phase::Running => Status::Running,
        };

        Snapshot {
            ip: boundary.ip,
            offset: boundary.offset,
            executed: boundary.executed,
            cursor: boundary.cursor,
            cells: boundary.cells,
            status,
            ips,
            delay: control.delay,
        }
    }
}

/// Handle used by the presentation layer to observe and steer the engine
#[derive(Debug, Clone)]
pub struct Controller {
    coordinator: Arc<Coordinator>,
    input: SyncSender<Handoff>,
}

impl Controller {
    pub(crate) fn new(coordinator: Arc<Coordinator>, input: SyncSender<Handoff>) -> Self {
        Controller { coordinator, input }
    }

    /// Copy the current engine state
    pub fn snapshot(&self) -> Snapshot {
        self.coordinator.snapshot()
    }

    /// Retained output bytes, oldest first
    pub fn output(&self) -> Vec<u8> {
        self.coordinator.output.lock().to_vec()
    }

    pub fn is_paused(&self) -> bool {
        self.coordinator.control.lock().paused
    }

    pub fn pause(&self) {
        self.coordinator.control.lock().paused = true;
    }

    pub fn resume(&self) {
        let mut control = self.coordinator.control.lock();
        control.paused = false;
        control.step_requested = false;
    }

    /// Toggle pause; returns the new paused state
    pub fn toggle_pause(&self) -> bool {
        let mut control = self.coordinator.control.lock();
        control.paused = !control.paused;
        control.step_requested = false;
        control.paused
    }

    /// Request exactly one instruction while paused; ignored otherwise
    pub fn step(&self) -> bool {
        let mut control = self.coordinator.control.lock();
        if control.paused {
            control.step_requested = true;
        }
        control.paused
    }

    pub fn delay(&self) -> Duration {
        self.coordinator.control.lock().delay
    }

    /// Set the delay, clamped to `MAX_DELAY`
    pub fn set_delay(&self, delay: Duration) {
        self.coordinator.control.lock().delay = delay.min(MAX_DELAY);
    }

    /// Run faster; returns `false` when already at the fastest throttled speed
    pub fn faster(&self) -> bool {
        self.adjust_delay(faster_delay)
    }

    /// Run slower; returns `false` when already at the slowest speed
    pub fn slower(&self) -> bool {
        self.adjust_delay(slower_delay)
    }

    fn adjust_delay(&self, adjust: fn(Duration) -> Option<Duration>) -> bool {
        let mut control = self.coordinator.control.lock();
        match adjust(control.delay) {
            Some(delay) => {
                tracing::debug!(delay_us = delay.as_micros() as u64, "delay changed");
                control.delay = delay;
                true
            }
            None => false,
        }
    }

    /// Deliver one byte to a program blocked on `,`
    pub fn supply_input(&self, byte: u8) -> Result<(), ControlError> {
        let mut phase = self.coordinator.phase.lock();
        match *phase {
            Phase::AwaitingInput => {}
            Phase::Stopped => return Err(ControlError::EngineStopped),
            _ => return Err(ControlError::NotAwaitingInput),
        }
        match self.input.try_send(Handoff::Byte(byte)) {
            Ok(()) => {
                *phase = Phase::Running;
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(ControlError::NotAwaitingInput),
            Err(TrySendError::Disconnected(_)) => Err(ControlError::EngineStopped),
        }
    }

    /// Ask the execution thread to exit at the next instruction boundary
    pub fn stop(&self) {
        self.coordinator.control.lock().stop_requested = true;
        // Wakes a thread blocked on input; a full slot means a byte is already
        // on its way and the stop flag is seen right after it is consumed.
        let _ = self.input.try_send(Handoff::Cancel);
    }
}

/// Halve the delay when the half stays on the increment grid, otherwise step
/// down by one increment. `None` at or below `MIN_DELAY`.
pub fn faster_delay(delay: Duration) -> Option<Duration> {
    if delay <= MIN_DELAY {
        return None;
    }
    let half = delay / 2;
    if half.as_micros() % DELAY_INCREMENT.as_micros() != 0 {
        Some(delay - DELAY_INCREMENT)
    } else {
        Some(half)
    }
}

/// Double the delay up to `MAX_DELAY`; a zero delay jumps to `MIN_DELAY`.
/// `None` at `MAX_DELAY`.
pub fn slower_delay(delay: Duration) -> Option<Duration> {
    if delay >= MAX_DELAY {
        None
    } else if delay.is_zero() {
        Some(MIN_DELAY)
    } else {
        Some((delay * 2).min(MAX_DELAY))
    }
}
