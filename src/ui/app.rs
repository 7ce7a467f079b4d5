//! Main TUI application state and logic

use crate::interpreter::control::Controller;
use crate::memory::CellWidth;
use crate::snapshot::{Snapshot, Status};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Terminals shorter than this only show the "too small" notice
const MIN_HEIGHT: u16 = 11;

/// Time between redraws while no key is pressed
const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Step,
    Faster,
    Slower,
    ScrollCells(isize),
    FollowCursor,
    ScrollOutput(isize),
    FollowOutput,
    /// A byte for a program waiting on `,`
    Input(u8),
    None,
}

/// Map a key press to an action. Control keys steer the engine; everything
/// else that maps to a byte is program input.
pub fn action_for(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('x') | KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('t') if ctrl => Action::TogglePause,
        KeyCode::Char(' ') | KeyCode::Char('@') | KeyCode::Char('n') if ctrl => Action::Step,
        KeyCode::Up if shift => Action::ScrollOutput(-1),
        KeyCode::Down if shift => Action::ScrollOutput(1),
        KeyCode::Up => Action::Faster,
        KeyCode::Down => Action::Slower,
        KeyCode::PageUp => Action::ScrollCells(-10),
        KeyCode::PageDown => Action::ScrollCells(10),
        KeyCode::Home => Action::FollowCursor,
        KeyCode::End => Action::FollowOutput,
        KeyCode::Enter => Action::Input(b'\n'),
        KeyCode::Tab => Action::Input(b'\t'),
        KeyCode::Backspace => Action::Input(0x7F),
        KeyCode::Esc => Action::Input(0x1B),
        KeyCode::Char(c) if c.is_ascii() && !ctrl => Action::Input(c as u8),
        _ => Action::None,
    }
}

/// The main application state
pub struct App {
    /// Handle to the execution thread
    pub controller: Controller,

    /// Program text shown in the code pane
    pub program_text: Vec<u8>,

    pub cell_width: CellWidth,

    /// Cells pane scroll offset
    pub cells_scroll: usize,

    /// Keep the current cell in view
    pub follow_cursor: bool,

    /// Output pane scroll offset
    pub output_scroll: usize,

    /// Keep the newest output in view
    pub follow_output: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(controller: Controller, program_text: Vec<u8>, cell_width: CellWidth) -> Self {
        App {
            controller,
            program_text,
            cell_width,
            cells_scroll: 0,
            follow_cursor: true,
            output_scroll: 0,
            follow_output: true,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let snapshot = self.controller.snapshot();
            terminal.draw(|f| self.render(f, &snapshot))?;

            if self.should_quit {
                break;
            }

            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_action(action_for(key), &snapshot.status);
                    }
                }
            }
        }

        self.controller.stop();
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot) {
        let size = frame.area();

        // Program strip on top, panes in the middle, status bar at the bottom
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(0)])
            .split(rows[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[1]);

        super::panes::render_code_pane(frame, rows[0], &self.program_text, snapshot);

        super::panes::render_cells_pane(
            frame,
            columns[0],
            snapshot,
            self.cell_width,
            self.follow_cursor,
            &mut self.cells_scroll,
        );

        super::panes::render_state_line(
            frame,
            right[0],
            &snapshot.status,
            size.height < MIN_HEIGHT,
        );

        let output = self.controller.output();
        super::panes::render_output_pane(
            frame,
            right[1],
            &output,
            self.follow_output,
            &mut self.output_scroll,
        );

        super::panes::render_status_bar(
            frame,
            rows[2],
            &self.status_message,
            &snapshot.status,
            snapshot.executed,
        );
    }

    /// Apply an action against the engine
    pub fn handle_action(&mut self, action: Action, status: &Status) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::TogglePause => {
                let paused = self.controller.toggle_pause();
                self.status_message = if paused { "Paused" } else { "Resumed" }.to_string();
            }
            Action::Step => {
                if self.controller.step() {
                    self.status_message = "Stepped".to_string();
                } else {
                    self.status_message = "Pause first (^T) to step".to_string();
                }
            }
            Action::Faster => {
                self.status_message = if self.controller.faster() {
                    format!("Delay {} usecs", self.controller.delay().as_micros())
                } else {
                    "Already at full speed".to_string()
                };
            }
            Action::Slower => {
                self.status_message = if self.controller.slower() {
                    format!("Delay {} usecs", self.controller.delay().as_micros())
                } else {
                    "Already at slowest speed".to_string()
                };
            }
            Action::ScrollCells(delta) => {
                self.follow_cursor = false;
                self.cells_scroll = self.cells_scroll.saturating_add_signed(delta);
            }
            Action::FollowCursor => {
                self.follow_cursor = true;
            }
            Action::ScrollOutput(delta) => {
                self.follow_output = false;
                self.output_scroll = self.output_scroll.saturating_add_signed(delta);
            }
            Action::FollowOutput => {
                self.follow_output = true;
            }
            Action::Input(byte) => {
                if *status == Status::AwaitingInput {
                    match self.controller.supply_input(byte) {
                        Ok(()) => {
                            self.status_message = "Input sent".to_string();
                            self.follow_output = true;
                        }
                        Err(err) => self.status_message = err.to_string(),
                    }
                }
            }
            Action::None => {}
        }
    }
}
