//! Complexity chart: sampled call counts against the reference curve.
//!
//! ```text
//! [ COMPLEXITY O(2^n) ]
//! n  calls
//! 1  ▓░░░░░░░░░░░░░░░     1  ~ 0.5
//! 5  ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓    15  ~15.0
//! ```

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{gauge_bar, CAUTION_AMBER, HUD_GREEN, INFO_DIM};
use crate::analysis::{ComplexitySample, GrowthModel};

const BAR_WIDTH: usize = 16;

#[allow(clippy::cast_precision_loss)]
pub fn render(
    f: &mut Frame,
    area: Rect,
    samples: &[ComplexitySample],
    reference: &[f64],
    model: Option<GrowthModel>,
) {
    let mut lines = vec![];
    if samples.is_empty() {
        lines.push(Line::from(Span::styled(
            " No samples: first argument is not a number",
            Style::default().fg(INFO_DIM),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " n  calls",
            Style::default().fg(INFO_DIM).add_modifier(Modifier::BOLD),
        )));
        let max = samples.iter().map(|s| s.operation_count).max().unwrap_or(1).max(1) as f64;
        for (i, sample) in samples.iter().enumerate() {
            let pct = sample.operation_count as f64 / max * 100.0;
            let mut spans = vec![
                Span::styled(format!(" {:<2} ", sample.size), Style::default().fg(INFO_DIM)),
                Span::styled(gauge_bar(pct, BAR_WIDTH), Style::default().fg(HUD_GREEN)),
                Span::styled(format!(" {:>5}", sample.operation_count), Style::default().fg(HUD_GREEN)),
            ];
            if let Some(r) = reference.get(i) {
                spans.push(Span::styled(format!("  ~{r:>5.1}"), Style::default().fg(CAUTION_AMBER)));
            }
            lines.push(Line::from(spans));
        }
    }

    let title = model.map_or_else(|| "[ COMPLEXITY ]".to_string(), |m| format!("[ COMPLEXITY {m} ]"));
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(HUD_GREEN)),
    );

    f.render_widget(paragraph, area);
}
