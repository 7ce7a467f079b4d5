//! Structured instruction list
//!
//! A [`Program`] is the immutable, decoded form of an instruction stream. It
//! can be built three ways, all behaviourally equivalent:
//!
//! - [`Program::from_raw`]: one op per source character
//! - [`Program::compile`]: runs of `+ - < >` folded into counted ops
//! - [`Program::from_encoded`]: decoded from the run-length text form
//!
//! Bracket partners are resolved once, with a single forward pass over an
//! explicit stack, so loop jumps cost O(1) at run time. A bracket without a
//! partner keeps `None`; it only becomes an error if execution actually has
//! to jump through it.

use super::encoder;
use super::errors::LoadError;

/// One decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Add to the current cell (`+`, possibly repeated)
    Add(u32),
    /// Subtract from the current cell (`-`, possibly repeated)
    Sub(u32),
    /// Move the cursor left (`<`, possibly repeated)
    Left(usize),
    /// Move the cursor right (`>`, possibly repeated)
    Right(usize),
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[` with the op index of its matching `]`
    JumpIfZero(Option<usize>),
    /// `]` with the op index of its matching `[`
    JumpIfNonZero(Option<usize>),
    /// `?`: fill the current cell with a random byte
    Random,
    /// Any other character that made it through the loader
    Unsupported(u8),
}

impl Op {
    /// Decode a single raw instruction character
    pub fn from_instruction(byte: u8) -> Self {
        match byte {
            b'+' => Op::Add(1),
            b'-' => Op::Sub(1),
            b'<' => Op::Left(1),
            b'>' => Op::Right(1),
            b'.' => Op::Output,
            b',' => Op::Input,
            b'[' => Op::JumpIfZero(None),
            b']' => Op::JumpIfNonZero(None),
            b'?' => Op::Random,
            other => Op::Unsupported(other),
        }
    }
}

/// An immutable program: decoded ops plus the text they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    ops: Vec<Op>,
    /// Byte offset into `text` of every op
    offsets: Vec<usize>,
    text: Vec<u8>,
}

impl Program {
    /// One op per character of a filtered raw stream
    pub fn from_raw(raw: &[u8]) -> Self {
        let ops = raw.iter().map(|&b| Op::from_instruction(b)).collect();
        let offsets = (0..raw.len()).collect();
        Self::link(ops, offsets, raw.to_vec())
    }

    /// Fold runs of `+ - < >` into counted ops, keeping the raw text
    pub fn compile(raw: &[u8]) -> Self {
        let mut ops = Vec::with_capacity(raw.len());
        let mut offsets = Vec::with_capacity(raw.len());
        let mut i = 0;

        while i < raw.len() {
            let byte = raw[i];
            let start = i;
            let op = if encoder::tag_for(byte).is_some() {
                let run = raw[i..].iter().take_while(|&&b| b == byte).count();
                i += run;
                // Cell arithmetic is modulo 2^width <= 2^32, so truncating the
                // count modulo 2^32 is exact.
                match byte {
                    b'+' => Op::Add(run as u32),
                    b'-' => Op::Sub(run as u32),
                    b'<' => Op::Left(run),
                    _ => Op::Right(run),
                }
            } else {
                i += 1;
                Op::from_instruction(byte)
            };
            ops.push(op);
            offsets.push(start);
        }

        Self::link(ops, offsets, raw.to_vec())
    }

    /// Decode the run-length text form produced by [`encoder::encode`]
    pub fn from_encoded(encoded: &[u8]) -> Result<Self, LoadError> {
        let (ops, offsets) = encoder::decode(encoded)?;
        Ok(Self::link(ops, offsets, encoded.to_vec()))
    }

    /// Resolve bracket partners in a single forward pass
    fn link(mut ops: Vec<Op>, offsets: Vec<usize>, text: Vec<u8>) -> Self {
        let mut open = Vec::new();
        for index in 0..ops.len() {
            match ops[index] {
                Op::JumpIfZero(_) => open.push(index),
                Op::JumpIfNonZero(_) => {
                    if let Some(start) = open.pop() {
                        ops[start] = Op::JumpIfZero(Some(index));
                        ops[index] = Op::JumpIfNonZero(Some(start));
                    }
                }
                _ => {}
            }
        }

        Program { ops, offsets, text }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn get(&self, index: usize) -> Option<Op> {
        self.ops.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text the program was built from (raw or encoded)
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Text offset of the op at `index`; the end of the text for the
    /// terminal position
    pub fn offset_of(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_are_linked() {
        let program = Program::from_raw(b"+[>[-]<]");
        assert_eq!(program.get(1), Some(Op::JumpIfZero(Some(7))));
        assert_eq!(program.get(3), Some(Op::JumpIfZero(Some(5))));
        assert_eq!(program.get(5), Some(Op::JumpIfNonZero(Some(3))));
        assert_eq!(program.get(7), Some(Op::JumpIfNonZero(Some(1))));
    }

    #[test]
    fn test_unmatched_brackets_stay_unlinked() {
        let program = Program::from_raw(b"][");
        assert_eq!(program.get(0), Some(Op::JumpIfNonZero(None)));
        assert_eq!(program.get(1), Some(Op::JumpIfZero(None)));
    }

    #[test]
    fn test_compile_folds_runs() {
        let program = Program::compile(b"+++>>[-]<");
        assert_eq!(
            program.ops(),
            &[
                Op::Add(3),
                Op::Right(2),
                Op::JumpIfZero(Some(4)),
                Op::Sub(1),
                Op::JumpIfNonZero(Some(2)),
                Op::Left(1),
            ]
        );
        assert_eq!(program.offset_of(1), 3);
        assert_eq!(program.offset_of(6), 9);
    }

    #[test]
    fn test_encoded_matches_compiled_ops() {
        let raw = b"++++++++[>++++++++<-]>.";
        let encoded = encoder::encode(raw);
        let decoded = Program::from_encoded(&encoded).unwrap();
        assert_eq!(decoded.ops(), Program::compile(raw).ops());
    }

    #[test]
    fn test_extension_characters() {
        let program = Program::from_raw(b"?#");
        assert_eq!(program.ops(), &[Op::Random, Op::Unsupported(b'#')]);
    }
}
