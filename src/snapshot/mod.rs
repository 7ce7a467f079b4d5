// Read-only views of engine state for the presentation layer

use crate::interpreter::errors::RuntimeError;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Execution status as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    AwaitingInput,
    Completed,
    Failed(RuntimeError),
    /// The execution thread exited on a stop request
    Stopped,
}

impl Status {
    /// `Completed`, `Failed` and `Stopped` never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Failed(_) | Status::Stopped)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Running => write!(f, "Program is executing..."),
            Status::Paused => write!(f, "Paused"),
            Status::AwaitingInput => write!(f, "Waiting for input..."),
            Status::Completed => write!(f, "Execution completed."),
            Status::Failed(err) => write!(f, "Execution failed: {}", err),
            Status::Stopped => write!(f, "Execution stopped."),
        }
    }
}

/// Copy of engine state taken at an instruction boundary
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Index of the next op
    pub ip: usize,
    /// Text offset of the next op
    pub offset: usize,
    /// Instructions executed so far
    pub executed: u64,
    /// Tape cursor
    pub cursor: usize,
    /// Full tape contents
    pub cells: Vec<u32>,
    pub status: Status,
    /// Last instructions-per-second sample, if a full second has elapsed
    pub ips: Option<u64>,
    /// Current inter-instruction delay
    pub delay: Duration,
}

impl Snapshot {
    /// Value of the cell under the cursor
    pub fn current_cell(&self) -> u32 {
        self.cells.get(self.cursor).copied().unwrap_or(0)
    }
}

/// Bounded output ring
///
/// Keeps the most recent `capacity` bytes; the oldest byte is evicted when a
/// new one arrives at full capacity.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    bytes: VecDeque<u8>,
    capacity: usize,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        OutputBuffer {
            bytes: VecDeque::with_capacity(capacity.min(0x1_0000)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, byte: u8) {
        if self.bytes.len() == self.capacity {
            self.bytes.pop_front();
        }
        self.bytes.push_back(byte);
    }

    /// Retained bytes, oldest first
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.iter().copied().collect()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(crate::interpreter::constants::OUTPUT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_evicts_oldest() {
        let mut buffer = OutputBuffer::new(3);
        for byte in b"abcde" {
            buffer.push(*byte);
        }
        assert_eq!(buffer.to_vec(), b"cde");
    }

    #[test]
    fn test_terminal_states() {
        assert!(Status::Completed.is_terminal());
        assert!(Status::Stopped.is_terminal());
        assert!(!Status::Paused.is_terminal());
        assert!(!Status::AwaitingInput.is_terminal());
    }
}
