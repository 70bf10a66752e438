//! Active call stack, innermost frame on top.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{CAUTION_AMBER, HUD_CYAN, HUD_GREEN, INFO_DIM};
use crate::reconstruct::CallStackFrame;

pub fn render(f: &mut Frame, area: Rect, frames: &[CallStackFrame]) {
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = frames
        .iter()
        .enumerate()
        .rev()
        .take(visible)
        .map(|(depth, frame)| {
            let innermost = depth + 1 == frames.len();
            let style = if innermost {
                Style::default().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(HUD_GREEN)
            };
            Line::from(vec![
                Span::styled(if innermost { "▶" } else { " " }, Style::default().fg(CAUTION_AMBER)),
                Span::styled(format!("{depth:>3} "), Style::default().fg(HUD_CYAN)),
                Span::styled(frame.signature(), style),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(" (empty)", Style::default().fg(INFO_DIM))));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("[ STACK depth {} ]", frames.len()))
            .border_style(Style::default().fg(HUD_GREEN)),
    );

    f.render_widget(paragraph, area);
}
