//! # Introduction
//!
//! bftty runs brainfuck programs on a cyclic tape, either headless over
//! stdin/stdout or on a background thread watched by a live terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Loader → [Encoder] → Program → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`parser`]: filters the source down to the instruction alphabet,
//!    optionally run-length encodes it, and decodes it into a
//!    [`parser::Program`] with precomputed bracket partners.
//! 2. [`memory`]: the [`memory::Tape`], a fixed ring of wrapping cells.
//! 3. [`interpreter`]: the fetch–decode–execute loop, the headless runner, and
//!    the execution thread with its [`interpreter::control::Controller`].
//! 4. [`snapshot`]: read-only copies of engine state and the output ring.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 6. [`config`]: runtime options assembled by the binary.
//!
//! ## Instructions
//!
//! `+ -` change the current cell, `< >` move the cursor, `.` writes the cell
//! as a byte, `,` reads one, and `[ ]` loop while the cell is non-zero. With
//! extensions enabled, `?` fills the cell with a random byte and any other
//! extension character pauses the interactive engine like a breakpoint.

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
