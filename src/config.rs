//! Runtime configuration
//!
//! [`Config`] gathers everything the binary needs to load and run a program.
//! It is filled in from the command line in `main.rs`; the defaults match an
//! interactive session on a 4096-cell, 8-bit tape.

use crate::interpreter::constants::{
    DEFAULT_CELL_COUNT, DEFAULT_DELAY, DELAY_INCREMENT, MAX_DELAY, OUTPUT_CAPACITY,
};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::runner::EngineOptions;
use crate::memory::{CellWidth, Tape};
use crate::parser::{encoder, Alphabet, LoadError, Program};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid delay {0} (must be a positive multiple of {})", DELAY_INCREMENT.as_micros())]
    InvalidDelay(u64),

    #[error("unsupported cell width {0} (expected 8, 16 or 32)")]
    InvalidCellWidth(u32),

    #[error("the tape needs at least one cell")]
    EmptyTape,

    #[error("--debug-mode cannot be combined with --no-curses")]
    DebugWithoutCurses,

    #[error(transparent)]
    Alphabet(#[from] LoadError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Run without the terminal UI
    pub headless: bool,
    pub cell_count: usize,
    pub cell_width: CellWidth,
    pub delay: Duration,
    /// Start paused, waiting for single steps
    pub start_paused: bool,
    /// Characters added to the core alphabet
    pub extensions: String,
    pub output_capacity: usize,
    pub echo_input: bool,
    pub seed: Option<u64>,
    /// The program is already in run-length encoded form
    pub encoded: bool,
    /// Write the encoded program here before running
    pub emit_encoded: Option<PathBuf>,
    /// Exit after writing `emit_encoded`
    pub exit_after_emit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            headless: false,
            cell_count: DEFAULT_CELL_COUNT,
            cell_width: CellWidth::Bits8,
            delay: DEFAULT_DELAY,
            start_paused: false,
            extensions: String::new(),
            output_capacity: OUTPUT_CAPACITY,
            echo_input: true,
            seed: None,
            encoded: false,
            emit_encoded: None,
            exit_after_emit: false,
        }
    }
}

impl Config {
    /// Validate a user-supplied delay in microseconds
    pub fn parse_delay(micros: u64) -> Result<Duration, ConfigError> {
        let step = DELAY_INCREMENT.as_micros() as u64;
        if micros == 0 || micros % step != 0 {
            return Err(ConfigError::InvalidDelay(micros));
        }
        Ok(Duration::from_micros(micros).min(MAX_DELAY))
    }

    /// Reject option combinations that cannot work together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_paused && self.headless {
            return Err(ConfigError::DebugWithoutCurses);
        }
        if self.cell_count == 0 {
            return Err(ConfigError::EmptyTape);
        }
        self.alphabet()?;
        Ok(())
    }

    pub fn alphabet(&self) -> Result<Alphabet, LoadError> {
        Alphabet::with_extensions(&self.extensions)
    }

    /// Decode a loaded program.
    ///
    /// Headless runs fold instruction runs into counted ops; the interactive
    /// UI keeps one op per character so the code strip follows every step.
    pub fn build_program(&self, source: &[u8]) -> Result<Program, LoadError> {
        if self.encoded {
            Program::from_encoded(source)
        } else if self.headless {
            Ok(Program::compile(source))
        } else {
            Ok(Program::from_raw(source))
        }
    }

    /// Run-length encode a raw program, unless it already is encoded
    pub fn encode(&self, source: &[u8]) -> Vec<u8> {
        if self.encoded {
            source.to_vec()
        } else {
            encoder::encode(source)
        }
    }

    pub fn build_interpreter(&self, program: Program) -> Interpreter {
        let interpreter = Interpreter::new(program, Tape::new(self.cell_count, self.cell_width));
        match self.seed {
            Some(seed) => interpreter.with_seed(seed),
            None => interpreter,
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            delay: self.delay,
            start_paused: self.start_paused,
            output_capacity: self.output_capacity,
            echo_input: self.echo_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Op;

    #[test]
    fn test_delay_validation() {
        assert_eq!(Config::parse_delay(20).unwrap(), Duration::from_micros(20));
        assert_eq!(Config::parse_delay(9_000_000).unwrap(), MAX_DELAY);
        assert!(matches!(
            Config::parse_delay(15),
            Err(ConfigError::InvalidDelay(15))
        ));
        assert!(Config::parse_delay(0).is_err());
    }

    #[test]
    fn test_debug_headless_conflict() {
        let config = Config {
            headless: true,
            start_paused: true,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DebugWithoutCurses)
        ));
    }

    #[test]
    fn test_headless_programs_are_folded() {
        let config = Config {
            headless: true,
            ..Default::default()
        };
        let program = config.build_program(b"+++").unwrap();
        assert_eq!(program.ops(), &[Op::Add(3)]);

        let interactive = Config::default().build_program(b"+++").unwrap();
        assert_eq!(interactive.len(), 3);
    }

    #[test]
    fn test_encoded_input_is_decoded() {
        let config = Config {
            encoded: true,
            ..Default::default()
        };
        let program = config.build_program(b"\x0112.").unwrap();
        assert_eq!(program.ops(), &[Op::Add(12), Op::Output]);
        assert_eq!(config.encode(b"\x0112."), b"\x0112.");
    }
}
