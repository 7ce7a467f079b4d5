//! Program loading and compilation
//!
//! Turns a byte stream into an executable [`program::Program`]:
//!
//! ```text
//! bytes → loader (alphabet filter) → [encoder] → Program (ops + bracket links)
//! ```
//!
//! - [`loader`]: drops every byte outside the instruction alphabet
//! - [`encoder`]: run-length text form (`tag` + decimal count)
//! - [`program`]: decoded op list with precomputed bracket partners
//! - [`errors`]: load and decode errors

pub mod encoder;
pub mod errors;
pub mod loader;
pub mod program;

pub use errors::LoadError;
pub use loader::Alphabet;
pub use program::{Op, Program};
