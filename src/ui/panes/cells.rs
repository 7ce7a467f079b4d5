//! Tape cells pane
//!
//! The first row always shows the cell under the cursor; the rest list the
//! tape from the scroll offset down.

use crate::memory::CellWidth;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Zero-padded decimal value sized for the cell width
pub(crate) fn format_cell(value: u32, width: CellWidth) -> String {
    match width {
        CellWidth::Bits8 => format!("{:03}", value),
        CellWidth::Bits16 => format!("{:05}", value),
        CellWidth::Bits32 => format!("{:010}", value),
    }
}

/// Scroll offset that keeps `cursor` visible in a list of `visible` rows
pub(crate) fn follow_cursor(scroll: usize, cursor: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if cursor < scroll {
        cursor
    } else if cursor >= scroll + visible {
        cursor + 1 - visible
    } else {
        scroll
    }
}

/// Render the cells pane
pub fn render_cells_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    width: CellWidth,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Cells ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    // Borders plus the current-cell header row
    let visible = area.height.saturating_sub(3).max(1) as usize;
    let total = snapshot.cells.len();

    if follow {
        *scroll_offset = follow_cursor(*scroll_offset, snapshot.cursor, visible);
    }
    *scroll_offset = (*scroll_offset).min(total.saturating_sub(visible));

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("#{:<6}", snapshot.cursor),
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_cell(snapshot.current_cell(), width),
            Style::default()
                .fg(DEFAULT_THEME.number)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    for (index, value) in snapshot
        .cells
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible)
    {
        let row_style = if index == snapshot.cursor {
            Style::default().bg(DEFAULT_THEME.current_line_bg)
        } else {
            Style::default()
        };
        lines.push(
            Line::from(vec![
                Span::styled(
                    format!("#{:<6}", index),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format_cell(*value, width),
                    Style::default().fg(if *value == 0 {
                        DEFAULT_THEME.comment
                    } else {
                        DEFAULT_THEME.fg
                    }),
                ),
            ])
            .style(row_style),
        );
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
