//! Memory model for the interpreter
//!
//! This module provides the tape abstraction:
//! - [`tape`]: a fixed-size ring of cells with a wrapping cursor
//!
//! # Cell Widths
//!
//! Cells are unsigned integers of 8, 16 or 32 bits (8 by default). Every
//! arithmetic operation wraps modulo `2^width`:
//! ```text
//! 255 + 1  →  0      (8-bit)
//!   0 - 1  →  255    (8-bit)
//! ```
//!
//! Output and input always move a single byte. Output emits the low eight bits
//! of the current cell.

pub mod tape;

pub use tape::{CellWidth, Tape};
