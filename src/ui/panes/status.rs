//! Status line and bottom status bar

use crate::snapshot::Status;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn status_color(status: &Status) -> Color {
    match status {
        Status::Running => DEFAULT_THEME.primary,
        Status::Paused | Status::AwaitingInput => DEFAULT_THEME.secondary,
        Status::Completed => DEFAULT_THEME.success,
        Status::Failed(_) => DEFAULT_THEME.error,
        Status::Stopped => DEFAULT_THEME.comment,
    }
}

fn status_badge(status: &Status) -> &'static str {
    match status {
        Status::Running => " ▶ RUNNING ",
        Status::Paused => " ⏸ PAUSED ",
        Status::AwaitingInput => " ⌨ INPUT ",
        Status::Completed => " END ",
        Status::Failed(_) => " FAILED ",
        Status::Stopped => " STOPPED ",
    }
}

/// Render the execution state line above the output pane
pub fn render_state_line(frame: &mut Frame, area: Rect, status: &Status, too_small: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let text = if too_small {
        Span::styled("Window too small", Style::default().fg(DEFAULT_THEME.error))
    } else {
        Span::styled(
            status.to_string(),
            Style::default()
                .fg(status_color(status))
                .add_modifier(Modifier::BOLD),
        )
    };

    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, status: &Status, executed: u64) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            status_badge(status),
            Style::default()
                .bg(status_color(status))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ops ", executed),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" ^T ", key_style),
        Span::styled(" pause ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ^␣ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" speed ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" cells ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇧↑/⇧↓ ", key_style),
        Span::styled(" output ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ^X ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
