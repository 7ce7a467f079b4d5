//! The interactive execution thread
//!
//! [`Engine`] pairs an [`Interpreter`] with the shared [`Coordinator`] and runs
//! the fetch–decode–execute loop on a dedicated thread. Each iteration:
//!
//! 1. asks the coordinator for a turn (execute, idle while paused, or stop)
//! 2. sleeps for the configured delay
//! 3. executes one instruction, then publishes position and tape if a
//!    snapshot asked for them
//!
//! The only blocking point is `,`, which waits on the input hand-off.

use super::constants::IDLE_POLL;
use super::control::{Controller, Coordinator, Handoff, Phase, Turn};
use super::engine::{Input, Interpreter, Port, Step};
use super::telemetry::{throttle, IpsCounter};
use crate::parser::Op;
use std::io;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Options for the interactive engine
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub delay: Duration,
    pub start_paused: bool,
    pub output_capacity: usize,
    /// Append bytes delivered to `,` to the output
    pub echo_input: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            delay: super::constants::DEFAULT_DELAY,
            start_paused: false,
            output_capacity: super::constants::OUTPUT_CAPACITY,
            echo_input: true,
        }
    }
}

/// Port that writes into the shared output ring and waits for input from
/// the presentation layer
struct SharedPort<'a> {
    coordinator: &'a Coordinator,
    input: &'a Receiver<Handoff>,
    echo_input: bool,
}

impl Port for SharedPort<'_> {
    fn output(&mut self, byte: u8) {
        self.coordinator.push_output(byte);
    }

    fn input(&mut self) -> Input {
        if self.coordinator.stop_requested() {
            return Input::Cancelled;
        }
        self.coordinator.set_phase(Phase::AwaitingInput);
        match self.input.recv() {
            Ok(Handoff::Byte(byte)) => {
                if self.echo_input {
                    self.coordinator.push_output(byte);
                }
                Input::Byte(byte)
            }
            Ok(Handoff::Cancel) | Err(_) => Input::Cancelled,
        }
    }
}

/// Background execution engine
pub struct Engine {
    interpreter: Interpreter,
    coordinator: Arc<Coordinator>,
    input: Receiver<Handoff>,
    echo_input: bool,
}

impl Engine {
    /// Build an engine and the controller that steers it
    pub fn new(interpreter: Interpreter, options: EngineOptions) -> (Self, Controller) {
        let (coordinator, tx, rx) = Coordinator::new(
            options.delay,
            options.start_paused,
            options.output_capacity,
        );
        coordinator.publish(&interpreter);

        let controller = Controller::new(coordinator.clone(), tx);
        let engine = Engine {
            interpreter,
            coordinator,
            input: rx,
            echo_input: options.echo_input,
        };
        (engine, controller)
    }

    /// Run the loop on a named background thread
    pub fn spawn(self) -> io::Result<JoinHandle<Interpreter>> {
        thread::Builder::new()
            .name("bf-engine".to_string())
            .spawn(move || self.run())
    }

    /// Run the loop on the current thread until the program completes, fails
    /// or a stop is requested. Returns the interpreter for inspection.
    pub fn run(mut self) -> Interpreter {
        tracing::info!(ops = self.interpreter.program().len(), "execution thread started");
        let mut ips = IpsCounter::new();

        if self.interpreter.is_finished() {
            self.finish(Phase::Completed);
            return self.interpreter;
        }

        loop {
            // Requests that arrive while idling are served here
            if self.coordinator.take_view_request() {
                self.coordinator.publish(&self.interpreter);
            }

            match self.coordinator.take_turn() {
                Turn::Stop => {
                    tracing::info!("execution stopped on request");
                    self.finish(Phase::Stopped);
                    break;
                }
                Turn::Idle(delay) => {
                    thread::sleep(delay.max(IDLE_POLL));
                    continue;
                }
                Turn::Execute(delay) => throttle(delay),
            }

            // The UI cannot ask for a boundary while we are blocked on input,
            // so publish one up front.
            if self.interpreter.next_op() == Some(Op::Input) {
                self.coordinator.publish(&self.interpreter);
            }

            let result = {
                let mut port = SharedPort {
                    coordinator: &self.coordinator,
                    input: &self.input,
                    echo_input: self.echo_input,
                };
                self.interpreter.step(&mut port)
            };
            if self.coordinator.take_view_request() {
                self.coordinator.publish(&self.interpreter);
            }

            if let Some(sample) = ips.record() {
                self.coordinator.set_ips(sample);
            }

            match result {
                Ok(Step::Continue) => {}
                Ok(Step::Completed) => {
                    tracing::info!(
                        executed = self.interpreter.executed(),
                        "execution completed"
                    );
                    self.finish(Phase::Completed);
                    break;
                }
                Ok(Step::Breakpoint { byte, offset }) => {
                    tracing::info!(
                        instruction = %char::from(byte).escape_default(),
                        offset,
                        "unsupported instruction, pausing"
                    );
                    self.coordinator.publish(&self.interpreter);
                    self.coordinator.force_pause();
                }
                Ok(Step::Cancelled) => {
                    tracing::info!("input wait cancelled");
                    self.finish(Phase::Stopped);
                    break;
                }
                Err(err) => {
                    tracing::error!(%err, "execution failed");
                    self.finish(Phase::Failed(err));
                    break;
                }
            }
        }

        self.interpreter
    }

    fn finish(&self, phase: Phase) {
        self.coordinator.publish(&self.interpreter);
        self.coordinator.set_phase(phase);
    }
}
