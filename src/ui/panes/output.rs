//! Program output pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Split output text into lines; a trailing newline does not open an empty
/// line of its own
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|s| s.is_empty()) {
        lines.pop();
    }
    lines
}

/// Render the program output pane.
///
/// With `follow` set the view is pinned to the newest output; otherwise
/// `scroll_offset` is clamped to the content. Either way `scroll_offset` is
/// left at the first visible line. A reverse-video block marks where the next
/// byte goes.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &[u8],
    follow: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0));

    let text = String::from_utf8_lossy(output);
    let trailing_newline = output.last() == Some(&b'\n');
    let cursor = Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED));

    let mut lines: Vec<Line> = split_lines(&text)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(DEFAULT_THEME.fg))))
        .collect();

    match lines.last_mut() {
        Some(last) if !trailing_newline => last.spans.push(cursor),
        _ => lines.push(Line::from(cursor)),
    }

    // Calculate visible range for scrolling
    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let max_scroll = total_items.saturating_sub(visible_height);

    *scroll_offset = if follow {
        max_scroll
    } else {
        (*scroll_offset).min(max_scroll)
    };

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
