//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over a [`Snapshot`] copy, so no
//! lock is held while drawing.
//!
//! # Pane Modules
//!
//! - [`code`]: instruction strip centred on the instruction pointer
//! - [`cells`]: tape contents with the current cell highlighted
//! - [`output`]: program output with a cursor block
//! - [`status`]: execution state line and the bottom status bar
//!
//! [`Snapshot`]: crate::snapshot::Snapshot

pub mod cells;
pub mod code;
pub mod output;
pub mod status;

// Re-export render functions for convenience
pub use cells::render_cells_pane;
pub use code::render_code_pane;
pub use output::render_output_pane;
pub use status::{render_state_line, render_status_bar};
