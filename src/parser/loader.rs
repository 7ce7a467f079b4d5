//! Source loading and alphabet filtering
//!
//! Programs are plain byte streams. Everything outside the configured
//! instruction alphabet is a comment and is dropped here, before the engine
//! ever sees the program.

use super::errors::LoadError;
use rustc_hash::FxHashSet;
use std::io::Read;

/// The eight core instructions
pub const CORE_INSTRUCTIONS: &[u8] = b"[]-+<>,.";

/// Set of bytes that survive loading
#[derive(Debug, Clone)]
pub struct Alphabet {
    allowed: FxHashSet<u8>,
}

impl Alphabet {
    /// Core instructions plus the given extension characters.
    ///
    /// Extensions must be printable ASCII and must not be decimal digits,
    /// since digits carry run lengths in the encoded form.
    pub fn with_extensions(extensions: &str) -> Result<Self, LoadError> {
        let mut allowed: FxHashSet<u8> = CORE_INSTRUCTIONS.iter().copied().collect();
        for &byte in extensions.as_bytes() {
            if !(0x20..=0x7E).contains(&byte) || byte.is_ascii_digit() {
                return Err(LoadError::InvalidExtension(byte));
            }
            allowed.insert(byte);
        }
        Ok(Alphabet { allowed })
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.allowed.contains(&byte)
    }

    /// Keep only the bytes of `source` that belong to the alphabet
    pub fn filter(&self, source: &[u8]) -> Vec<u8> {
        source
            .iter()
            .copied()
            .filter(|byte| self.contains(*byte))
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet {
            allowed: CORE_INSTRUCTIONS.iter().copied().collect(),
        }
    }
}

/// Read a whole program from `reader` and filter it through `alphabet`
pub fn load<R: Read>(mut reader: R, alphabet: &Alphabet) -> Result<Vec<u8>, LoadError> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    let filtered = alphabet.filter(&source);
    tracing::debug!(
        read = source.len(),
        kept = filtered.len(),
        "loaded program source"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_are_dropped() {
        let alphabet = Alphabet::default();
        let filtered = alphabet.filter(b"+ add one\n[-] clear? #");
        assert_eq!(filtered, b"+[-]");
    }

    #[test]
    fn test_extensions_are_kept() {
        let alphabet = Alphabet::with_extensions("?#").unwrap();
        assert_eq!(alphabet.filter(b"+?x#"), b"+?#");
    }

    #[test]
    fn test_digit_extension_rejected() {
        let err = Alphabet::with_extensions("?7").unwrap_err();
        assert!(matches!(err, LoadError::InvalidExtension(b'7')));
    }

    #[test]
    fn test_control_extension_rejected() {
        let err = Alphabet::with_extensions("\x01").unwrap_err();
        assert!(matches!(err, LoadError::InvalidExtension(0x01)));
    }

    #[test]
    fn test_load_from_reader() {
        let source: &[u8] = b"hello +++ world .";
        let program = load(source, &Alphabet::default()).unwrap();
        assert_eq!(program, b"+++.");
    }
}
