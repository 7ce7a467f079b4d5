//! Errors raised while loading or compiling a program
//!
//! These are all reported before execution starts. Runtime failures live in
//! [`crate::interpreter::errors`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the program source failed
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    /// An extension character cannot be part of the alphabet
    #[error("invalid extension character 0x{0:02x} (extensions must be printable and not digits)")]
    InvalidExtension(u8),

    /// A run-length tag in encoded input is not followed by any digits
    #[error("malformed encoded program: tag 0x{tag:02x} at offset {offset} has no repeat count")]
    MalformedCount { tag: u8, offset: usize },

    /// A run-length count does not fit the count type
    #[error("malformed encoded program: repeat count at offset {offset} is too large")]
    CountOverflow { offset: usize },
}
