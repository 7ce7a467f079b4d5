//! Instruction strip pane
//!
//! Shows a single row of program text centred on the instruction pointer, a
//! caret under the current instruction, the 1-based offset, and the delay and
//! IPS line while the program is running freely.

use crate::parser::encoder::{TAG_ADD, TAG_LEFT, TAG_RIGHT, TAG_SUB};
use crate::snapshot::{Snapshot, Status};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Glyph and style for one byte of program text
fn instruction_glyph(byte: u8) -> (char, Style) {
    let style = Style::default();
    match byte {
        b'[' | b']' => (byte as char, style.fg(DEFAULT_THEME.bracket)),
        b'.' | b',' => (byte as char, style.fg(DEFAULT_THEME.io)),
        b'+' | b'-' => (byte as char, style.fg(DEFAULT_THEME.arith)),
        b'<' | b'>' => (byte as char, style.fg(DEFAULT_THEME.movement)),
        // Encoded runs show their instruction, underlined
        TAG_ADD => ('+', style.fg(DEFAULT_THEME.arith).add_modifier(Modifier::UNDERLINED)),
        TAG_SUB => ('-', style.fg(DEFAULT_THEME.arith).add_modifier(Modifier::UNDERLINED)),
        TAG_LEFT => ('<', style.fg(DEFAULT_THEME.movement).add_modifier(Modifier::UNDERLINED)),
        TAG_RIGHT => ('>', style.fg(DEFAULT_THEME.movement).add_modifier(Modifier::UNDERLINED)),
        b'0'..=b'9' => (byte as char, style.fg(DEFAULT_THEME.number)),
        0x20..=0x7E => (byte as char, style.fg(DEFAULT_THEME.extension)),
        _ => ('·', style.fg(DEFAULT_THEME.comment)),
    }
}

/// First visible text index and the number of blank columns before it, so
/// that `offset` lands in column `width / 2`
pub(crate) fn strip_window(offset: usize, width: usize) -> (usize, usize) {
    let center = width / 2;
    let start = offset.saturating_sub(center);
    let padding = center - (offset - start);
    (start, padding)
}

/// Render the instruction strip pane
pub fn render_code_pane(frame: &mut Frame, area: Rect, text: &[u8], snapshot: &Snapshot) {
    let block = Block::default()
        .title(" Program ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let width = area.width.saturating_sub(2) as usize;
    let (start, padding) = strip_window(snapshot.offset, width);

    let mut strip = vec![Span::raw(" ".repeat(padding))];
    for (index, &byte) in text.iter().enumerate().skip(start).take(width - padding) {
        let (glyph, mut style) = instruction_glyph(byte);
        if index == snapshot.offset {
            style = style
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD);
        }
        strip.push(Span::styled(glyph.to_string(), style));
    }

    let caret = Line::from(vec![
        Span::raw(" ".repeat(width / 2)),
        Span::styled("^", Style::default().fg(DEFAULT_THEME.border_focused)),
    ]);

    let position = Line::from(Span::styled(
        format!("Current character: {}", snapshot.offset + 1),
        Style::default().fg(DEFAULT_THEME.fg),
    ));

    let mut lines = vec![Line::from(strip), caret, position];

    if snapshot.status == Status::Running {
        if let Some(ips) = snapshot.ips {
            lines.push(Line::from(Span::styled(
                format!("Delay: {} usecs, {} IPS", snapshot.delay.as_micros(), ips),
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_centres_offset() {
        // Offset past the centre scrolls the text
        assert_eq!(strip_window(50, 20), (40, 0));
        // Near the start the text is padded instead
        assert_eq!(strip_window(3, 20), (0, 7));
        assert_eq!(strip_window(0, 21), (0, 10));
    }
}
