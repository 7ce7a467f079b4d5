//! Synchronous execution without a presentation layer
//!
//! Input is read from a byte reader (stdin in the binary), output is written
//! to a byte writer (stdout). There is no pause or step control. End of input
//! on `,` is a silent no-op: the cell keeps its value and execution continues.

use super::engine::{Input, Interpreter, Port, Step};
use super::errors::RuntimeError;
use super::telemetry::throttle;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;
use thiserror::Error;

/// Why a headless run stopped early
#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to write program output: {0}")]
    Io(#[from] io::Error),
}

impl HeadlessError {
    pub fn exit_code(&self) -> i32 {
        match self {
            HeadlessError::Runtime(err) => err.exit_code(),
            HeadlessError::Io(_) => 1,
        }
    }
}

/// Port over a reader/writer pair
pub struct StdioPort<R: Read, W: Write> {
    input: R,
    output: W,
    /// First write error; reported after the instruction that caused it
    error: Option<io::Error>,
}

impl<R: Read, W: Write> StdioPort<R, W> {
    pub fn new(input: R, output: W) -> Self {
        StdioPort {
            input,
            output,
            error: None,
        }
    }

    fn take_error(&mut self) -> Result<(), io::Error> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: Read, W: Write> Port for StdioPort<R, W> {
    fn output(&mut self, byte: u8) {
        if self.error.is_none() {
            if let Err(err) = self.output.write_all(&[byte]) {
                self.error = Some(err);
            }
        }
    }

    fn input(&mut self) -> Input {
        // Prompts written before a read must be visible
        if let Err(err) = self.output.flush() {
            self.error.get_or_insert(err);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Input::EndOfInput,
                Ok(_) => return Input::Byte(byte[0]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    tracing::warn!(%err, "reading input failed; treating as end of input");
                    return Input::EndOfInput;
                }
            }
        }
    }
}

/// Run `interpreter` to completion over `port`.
///
/// Unsupported instructions are fatal here, unlike in the interactive engine.
pub fn run_headless<R: Read, W: Write>(
    interpreter: &mut Interpreter,
    port: &mut StdioPort<R, W>,
    delay: Duration,
) -> Result<(), HeadlessError> {
    let outcome = loop {
        throttle(delay);
        let step = interpreter.step(port);
        port.take_error()?;
        match step {
            Ok(Step::Continue) => {}
            Ok(Step::Completed) | Ok(Step::Cancelled) => break Ok(()),
            Ok(Step::Breakpoint { byte, offset }) => {
                break Err(RuntimeError::IllegalInstruction { byte, offset }.into())
            }
            Err(err) => break Err(err.into()),
        }
    };

    port.output.flush()?;

    match &outcome {
        Ok(()) => tracing::info!(executed = interpreter.executed(), "execution completed"),
        Err(err) => tracing::error!(%err, "execution failed"),
    }
    outcome
}
