//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, key-to-action mapping
//! - **[`panes`]**: stateless render functions for each visible pane (program
//!   strip, cells, output, status)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The UI never touches engine state directly. Each frame it takes a
//! [`Snapshot`] through the [`Controller`] and steers the engine only through
//! the controller's pause, step, delay and input calls.
//!
//! [`Snapshot`]: crate::snapshot::Snapshot
//! [`Controller`]: crate::interpreter::control::Controller

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
