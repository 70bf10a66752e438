use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{gauge_bar, warning_color, CAUTION_AMBER, CRITICAL_RED, HUD_GREEN, INFO_DIM};
use crate::analysis::TraceStats;
use crate::playback::PlaybackSpeed;

/// Step, run statistics and learner load
pub struct StatusPanel<'a> {
    pub step: Option<usize>,
    pub total: usize,
    pub description: Option<String>,
    pub stats: &'a TraceStats,
    pub failure: Option<&'a str>,
    pub load: u8,
    pub playing: bool,
    pub speed: PlaybackSpeed,
}

impl StatusPanel<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![];

        let (state, state_color) = if self.failure.is_some() {
            ("[!] FAILED", CRITICAL_RED)
        } else if self.playing {
            ("[>] PLAYING", CAUTION_AMBER)
        } else {
            ("[-] PAUSED", HUD_GREEN)
        };
        let step = self.step.map_or_else(|| "-".to_string(), |s| (s + 1).to_string());
        lines.push(Line::from(vec![
            Span::styled(format!(" {state}"), Style::default().fg(state_color).add_modifier(Modifier::BOLD)),
            Span::styled("  Step ", Style::default().fg(INFO_DIM)),
            Span::styled(format!("{step}/{}", self.total), Style::default().fg(HUD_GREEN)),
            Span::styled("  Speed ", Style::default().fg(INFO_DIM)),
            Span::styled(self.speed.to_string(), Style::default().fg(HUD_GREEN)),
        ]));

        if let Some(description) = &self.description {
            lines.push(Line::from(Span::styled(format!(" {description}"), Style::default().fg(CAUTION_AMBER))));
        }
        if let Some(failure) = self.failure {
            lines.push(Line::from(Span::styled(format!(" {failure}"), Style::default().fg(CRITICAL_RED))));
        }

        lines.push(Line::from(vec![
            Span::styled(" Calls ", Style::default().fg(INFO_DIM)),
            Span::styled(self.stats.total_calls.to_string(), Style::default().fg(HUD_GREEN)),
            Span::styled("  Base cases ", Style::default().fg(INFO_DIM)),
            Span::styled(self.stats.base_case_calls.to_string(), Style::default().fg(HUD_GREEN)),
            Span::styled("  Max depth ", Style::default().fg(INFO_DIM)),
            Span::styled(self.stats.max_depth.to_string(), Style::default().fg(HUD_GREEN)),
        ]));

        if self.stats.has_redundancy() {
            lines.push(Line::from(Span::styled(
                format!(
                    " Redundant computations detected! {} repeated call(s)",
                    self.stats.wasted_calls()
                ),
                Style::default().fg(CAUTION_AMBER),
            )));
        }

        let load = f64::from(self.load);
        let load_color = warning_color(load);
        lines.push(Line::from(vec![
            Span::styled(" Load ", Style::default().fg(INFO_DIM)),
            Span::styled(gauge_bar(load, 10), Style::default().fg(load_color)),
            Span::styled(format!(" {}%", self.load), Style::default().fg(load_color)),
        ]));

        let border_color = if self.failure.is_some() { CRITICAL_RED } else { HUD_GREEN };
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status")
                .border_style(Style::default().fg(border_color)),
        );

        f.render_widget(paragraph, area);
    }
}
