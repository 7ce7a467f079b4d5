//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents the failures that can
//! stop a running program (as opposed to load errors or configuration errors),
//! and [`ControlError`], returned to the presentation layer when a control
//! request cannot be honoured.
//!
//! Runtime errors never cross the thread boundary as a `Result`: the execution
//! thread turns them into [`Status::Failed`](crate::snapshot::Status::Failed),
//! which the presentation layer polls.

use std::fmt;
use thiserror::Error;

/// Direction of a bracket scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Looking for the `]` that closes a `[`
    Forward,
    /// Looking for the `[` that opens a `]`
    Backward,
}

impl fmt::Display for ScanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanDirection::Forward => write!(f, "'[' has no matching ']'"),
            ScanDirection::Backward => write!(f, "']' has no matching '['"),
        }
    }
}

/// Fatal errors raised while executing a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A jump through a bracket that has no partner
    #[error("unmatched bracket at offset {offset}: {direction}")]
    UnmatchedBracket {
        offset: usize,
        direction: ScanDirection,
    },

    /// An instruction the headless engine cannot execute
    #[error("illegal instruction '{}' at offset {offset}", escaped(.byte))]
    IllegalInstruction { byte: u8, offset: usize },
}

impl RuntimeError {
    /// Process exit code used by headless mode
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::UnmatchedBracket { .. } => 3,
            RuntimeError::IllegalInstruction { .. } => 4,
        }
    }
}

fn escaped(byte: &u8) -> std::ascii::EscapeDefault {
    std::ascii::escape_default(*byte)
}

/// Errors returned by [`Controller`](crate::interpreter::control::Controller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("the program is not waiting for input")]
    NotAwaitingInput,

    #[error("the execution thread has stopped")]
    EngineStopped,
}
