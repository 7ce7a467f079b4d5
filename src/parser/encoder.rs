//! Run-length encoding of instruction streams
//!
//! The encoded form replaces every maximal run of `+`, `-`, `<` or `>` with a
//! tag byte followed by the decimal run length:
//!
//! ```text
//! ++++++++[>++++++++<-]>.   →   \x018[\x041\x018\x031\x021]\x041.
//! ```
//!
//! All other instructions (brackets included) pass through untouched. The
//! encoded text is a persistable, denser program representation; it is
//! decoded once at load time into counted [`Op`]s rather than re-parsed while
//! running.

use super::errors::LoadError;
use super::program::Op;

pub const TAG_ADD: u8 = 0x01;
pub const TAG_SUB: u8 = 0x02;
pub const TAG_LEFT: u8 = 0x03;
pub const TAG_RIGHT: u8 = 0x04;

/// Tag byte for a run-length encodable instruction
pub fn tag_for(instruction: u8) -> Option<u8> {
    match instruction {
        b'+' => Some(TAG_ADD),
        b'-' => Some(TAG_SUB),
        b'<' => Some(TAG_LEFT),
        b'>' => Some(TAG_RIGHT),
        _ => None,
    }
}

/// Encode a raw instruction stream.
///
/// The output is never longer than twice the input: the worst case is a run
/// of length one, which becomes a tag plus a single digit.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let byte = raw[i];
        match tag_for(byte) {
            Some(tag) => {
                let run = raw[i..].iter().take_while(|&&b| b == byte).count();
                encoded.push(tag);
                encoded.extend_from_slice(run.to_string().as_bytes());
                i += run;
            }
            None => {
                encoded.push(byte);
                i += 1;
            }
        }
    }

    tracing::debug!(raw = raw.len(), encoded = encoded.len(), "encoded program");
    encoded
}

/// Decode an encoded stream into ops plus the text offset of each op
pub fn decode(encoded: &[u8]) -> Result<(Vec<Op>, Vec<usize>), LoadError> {
    let mut ops = Vec::with_capacity(encoded.len());
    let mut offsets = Vec::with_capacity(encoded.len());
    let mut i = 0;

    while i < encoded.len() {
        let byte = encoded[i];
        let start = i;
        i += 1;

        let op = match byte {
            TAG_ADD | TAG_SUB | TAG_LEFT | TAG_RIGHT => {
                let (count, consumed) = parse_count(&encoded[i..], start)?;
                if consumed == 0 {
                    return Err(LoadError::MalformedCount {
                        tag: byte,
                        offset: start,
                    });
                }
                i += consumed;
                match byte {
                    TAG_ADD => Op::Add(count),
                    TAG_SUB => Op::Sub(count),
                    TAG_LEFT => Op::Left(count as usize),
                    _ => Op::Right(count as usize),
                }
            }
            other => Op::from_instruction(other),
        };

        ops.push(op);
        offsets.push(start);
    }

    Ok((ops, offsets))
}

/// Parse leading decimal digits, stopping at the first non-digit.
/// Returns the value and the number of bytes consumed.
fn parse_count(text: &[u8], tag_offset: usize) -> Result<(u32, usize), LoadError> {
    let mut value: u32 = 0;
    let mut consumed = 0;

    for &byte in text.iter().take_while(|b| b.is_ascii_digit()) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or(LoadError::CountOverflow { offset: tag_offset })?;
        consumed += 1;
    }

    Ok((value, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_runs() {
        let encoded = encode(b"+++>>-.<");
        assert_eq!(encoded, b"\x013\x042\x021.\x031");
    }

    #[test]
    fn test_brackets_pass_through() {
        let encoded = encode(b"[->+<]");
        assert_eq!(encoded, b"[\x021\x041\x011\x031]");
    }

    #[test]
    fn test_long_run_uses_multiple_digits() {
        let raw = vec![b'+'; 300];
        assert_eq!(encode(&raw), b"\x01300");
    }

    #[test]
    fn test_worst_case_is_bounded() {
        let raw = b"+-+-<><>".repeat(50);
        assert!(encode(&raw).len() <= raw.len() * 2);
    }

    #[test]
    fn test_decode_counts() {
        let (ops, offsets) = decode(b"\x0112[\x0410]").unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Add(12),
                Op::JumpIfZero(None),
                Op::Right(10),
                Op::JumpIfNonZero(None)
            ]
        );
        assert_eq!(offsets, vec![0, 3, 4, 7]);
    }

    #[test]
    fn test_decode_missing_count() {
        let err = decode(b"\x01.").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedCount {
                tag: TAG_ADD,
                offset: 0
            }
        ));
    }

    #[test]
    fn test_decode_count_overflow() {
        let err = decode(b"+\x0299999999999").unwrap_err();
        assert!(matches!(err, LoadError::CountOverflow { offset: 1 }));
    }
}
