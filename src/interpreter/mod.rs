//! Interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: fetch–decode–execute over a [`Program`](crate::parser::Program)
//! - [`headless`]: synchronous runner over stdin/stdout
//! - [`runner`]: background execution thread for the interactive UI
//! - [`control`]: shared state and the [`Controller`](control::Controller) handle
//! - [`telemetry`]: IPS sampling and delay throttling
//! - [`errors`]: runtime and control error types
//!
//! # Execution Model
//!
//! One instruction per iteration. The instruction pointer only moves forward,
//! except when a bracket jumps to the op after its partner. Reaching the end
//! of the program completes execution; jumping through an unmatched bracket
//! fails it.
//!
//! Unsupported instructions are an implicit breakpoint for the interactive
//! engine and a fatal error headless.

pub mod constants;
pub mod control;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod runner;
pub mod telemetry;
