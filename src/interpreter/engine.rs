// Execution engine for the interpreter

use crate::interpreter::errors::{RuntimeError, ScanDirection};
use crate::memory::Tape;
use crate::parser::{Op, Program};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the environment answered to a `,` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// One byte to store in the current cell
    Byte(u8),
    /// No more input; the cell is left unchanged
    EndOfInput,
    /// The wait was abandoned because execution is being stopped
    Cancelled,
}

/// Byte I/O seen by the interpreter
///
/// Headless mode implements this over stdin/stdout; the interactive execution
/// thread implements it over the shared output buffer and the input hand-off.
pub trait Port {
    fn output(&mut self, byte: u8);
    fn input(&mut self) -> Input;
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More instructions follow
    Continue,
    /// The instruction pointer reached the end of the program
    Completed,
    /// An unsupported instruction was consumed
    Breakpoint { byte: u8, offset: usize },
    /// Input was cancelled; the `,` was not consumed
    Cancelled,
}

/// The main interpreter: a program, a tape and an instruction pointer
pub struct Interpreter {
    /// Decoded program
    program: Program,

    /// Cell memory, touched only by this struct
    tape: Tape,

    /// Index of the next op to execute
    ip: usize,

    /// Number of instructions executed so far
    executed: u64,

    /// Source of bytes for `?`
    rng: StdRng,
}

impl Interpreter {
    /// Create an interpreter positioned at the first instruction
    pub fn new(program: Program, tape: Tape) -> Self {
        Interpreter {
            program,
            tape,
            ip: 0,
            executed: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make `?` deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Text offset of the next instruction
    pub fn offset(&self) -> usize {
        self.program.offset_of(self.ip)
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    pub fn is_finished(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// The op that the next call to [`step`](Self::step) will execute
    pub fn next_op(&self) -> Option<Op> {
        self.program.get(self.ip)
    }

    /// Fetch, decode and execute a single instruction
    pub fn step(&mut self, port: &mut dyn Port) -> Result<Step, RuntimeError> {
        let Some(op) = self.program.get(self.ip) else {
            return Ok(Step::Completed);
        };
        let offset = self.program.offset_of(self.ip);
        let mut next = self.ip + 1;

        match op {
            Op::Add(n) => self.tape.add(n),
            Op::Sub(n) => self.tape.sub(n),
            Op::Left(n) => self.tape.move_left(n),
            Op::Right(n) => self.tape.move_right(n),
            Op::Output => port.output(self.tape.read() as u8),
            Op::Input => match port.input() {
                Input::Byte(byte) => self.tape.write(u32::from(byte)),
                Input::EndOfInput => {}
                Input::Cancelled => return Ok(Step::Cancelled),
            },
            Op::JumpIfZero(end) => {
                if self.tape.read() == 0 {
                    let end = end.ok_or(RuntimeError::UnmatchedBracket {
                        offset,
                        direction: ScanDirection::Forward,
                    })?;
                    next = end + 1;
                }
            }
            Op::JumpIfNonZero(start) => {
                if self.tape.read() != 0 {
                    let start = start.ok_or(RuntimeError::UnmatchedBracket {
                        offset,
                        direction: ScanDirection::Backward,
                    })?;
                    next = start + 1;
                }
            }
            Op::Random => {
                let byte: u8 = self.rng.gen();
                self.tape.write(u32::from(byte));
            }
            Op::Unsupported(byte) => {
                self.ip = next;
                self.executed += 1;
                return Ok(Step::Breakpoint { byte, offset });
            }
        }

        self.ip = next;
        self.executed += 1;

        if self.is_finished() {
            Ok(Step::Completed)
        } else {
            Ok(Step::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::CellWidth;

    /// Port backed by in-memory buffers
    #[derive(Default)]
    struct BufferPort {
        input: Vec<u8>,
        output: Vec<u8>,
    }

    impl Port for BufferPort {
        fn output(&mut self, byte: u8) {
            self.output.push(byte);
        }

        fn input(&mut self) -> Input {
            if self.input.is_empty() {
                Input::EndOfInput
            } else {
                Input::Byte(self.input.remove(0))
            }
        }
    }

    fn interpreter(source: &[u8]) -> Interpreter {
        Interpreter::new(Program::from_raw(source), Tape::new(16, CellWidth::Bits8))
    }

    fn run(interp: &mut Interpreter, port: &mut BufferPort) -> Result<(), RuntimeError> {
        loop {
            match interp.step(port)? {
                Step::Continue => {}
                _ => return Ok(()),
            }
        }
    }

    #[test]
    fn test_clear_loop() {
        let mut interp = interpreter(b"+++[-]");
        let mut port = BufferPort::default();
        run(&mut interp, &mut port).unwrap();
        assert!(interp.is_finished());
        assert_eq!(interp.tape().read(), 0);
    }

    #[test]
    fn test_multiplication_output() {
        let mut interp = interpreter(b"++++++++[>++++++++<-]>.");
        let mut port = BufferPort::default();
        run(&mut interp, &mut port).unwrap();
        assert_eq!(port.output, vec![64]);
    }

    #[test]
    fn test_skip_loop_when_zero() {
        let mut interp = interpreter(b"[+++.]+.");
        let mut port = BufferPort::default();
        run(&mut interp, &mut port).unwrap();
        assert_eq!(port.output, vec![1]);
    }

    #[test]
    fn test_unmatched_open_fails_only_when_jumping() {
        let mut interp = interpreter(b"[");
        let mut port = BufferPort::default();
        let err = run(&mut interp, &mut port).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnmatchedBracket {
                offset: 0,
                direction: ScanDirection::Forward
            }
        );

        // A non-zero cell falls into the body and never needs the partner
        let mut interp = interpreter(b"+[");
        run(&mut interp, &mut port).unwrap();
        assert!(interp.is_finished());
    }

    #[test]
    fn test_unmatched_close_fails_when_looping() {
        let mut interp = interpreter(b"+]");
        let mut port = BufferPort::default();
        let err = run(&mut interp, &mut port).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnmatchedBracket {
                offset: 1,
                direction: ScanDirection::Backward
            }
        ));
    }

    #[test]
    fn test_input_and_end_of_input() {
        let mut interp = interpreter(b",.,.");
        let mut port = BufferPort {
            input: vec![b'A'],
            ..Default::default()
        };
        run(&mut interp, &mut port).unwrap();
        // The second read hits end of input and leaves the cell alone
        assert_eq!(port.output, b"AA");
    }

    #[test]
    fn test_breakpoint_consumes_instruction() {
        let mut interp = interpreter(b"+#+");
        let mut port = BufferPort::default();
        assert_eq!(interp.step(&mut port).unwrap(), Step::Continue);
        assert_eq!(
            interp.step(&mut port).unwrap(),
            Step::Breakpoint {
                byte: b'#',
                offset: 1
            }
        );
        assert_eq!(interp.ip(), 2);
        assert_eq!(interp.step(&mut port).unwrap(), Step::Completed);
        assert_eq!(interp.tape().read(), 2);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let program = Program::from_raw(b"?>?>?");
        let mut a = Interpreter::new(program.clone(), Tape::new(4, CellWidth::Bits8)).with_seed(7);
        let mut b = Interpreter::new(program, Tape::new(4, CellWidth::Bits8)).with_seed(7);
        let mut port = BufferPort::default();
        run(&mut a, &mut port).unwrap();
        run(&mut b, &mut port).unwrap();
        assert_eq!(a.tape().cells(), b.tape().cells());
    }

    #[test]
    fn test_empty_program_completes_immediately() {
        let mut interp = interpreter(b"");
        let mut port = BufferPort::default();
        assert_eq!(interp.step(&mut port).unwrap(), Step::Completed);
        assert_eq!(interp.executed(), 0);
    }

    #[test]
    fn test_output_truncates_wide_cells() {
        let mut interp = Interpreter::new(
            Program::compile(&[b'+'; 0x141]),
            Tape::new(1, CellWidth::Bits16),
        );
        let mut port = BufferPort::default();
        assert_eq!(interp.step(&mut port).unwrap(), Step::Completed);
        let mut interp = Interpreter::new(
            Program::from_raw(b"."),
            interp.tape().clone(),
        );
        run(&mut interp, &mut port).unwrap();
        assert_eq!(port.output, vec![0x41]);
    }
}
