//! # Terminal User Interface (TUI)
//!
//! Interactive stepwise playback of one traced run using `ratatui`.
//!
//! ## Panels
//!
//! - **Call tree** - the tree as of the current step, current call in amber
//! - **Stack** - active frames, innermost on top
//! - **Complexity** - sampled call counts next to the reference curve
//! - **Status** - step, event description, run statistics, learner load
//!
//! ## Sub-Modules
//!
//! - `tree_view` - Call tree rows, selection and scrolling
//! - `stack_panel` - Call stack
//! - `complexity_view` - Complexity chart
//! - `status` - Summary panel
//! - `cognitive` - Learner load estimate
//! - `layout` - Responsive screen regions
//! - `theme` - Color scheme

#![allow(clippy::cast_possible_truncation, clippy::too_many_lines)]

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

mod cognitive;
mod complexity_view;
pub mod layout;
mod stack_panel;
mod status;
mod theme;
mod tree_view;

pub use cognitive::CognitiveLoad;

use status::StatusPanel;
use theme::{CAUTION_AMBER, CRITICAL_RED, HUD_GREEN, INFO_DIM};
use tree_view::TreeView;

use crate::domain::TraceEvent;
use crate::playback::{describe_step, PlaybackCursor, PlaybackSpeed};
use crate::report::{tree_rows, TreeRow};
use crate::session::Session;

// =============================================================================
// STYLE CONSTANTS
// =============================================================================

const STYLE_HEADING: Style = Style::new().fg(HUD_GREEN).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(INFO_DIM);
const STYLE_KEY: Style = Style::new().fg(CAUTION_AMBER);
const STYLE_TEXT: Style = Style::new().fg(ratatui::style::Color::White);

/// Longest wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewMode {
    Playback,
    /// Help overlay with keyboard shortcuts
    Help,
}

/// Playback of one [`Session`]
pub struct App {
    session: Session,
    cursor: PlaybackCursor,
    tree_view: TreeView,
    load: CognitiveLoad,
    speed: PlaybackSpeed,
    playing: bool,
    last_step: Instant,
    view_mode: ViewMode,
    should_quit: bool,
}

impl App {
    /// Start paused at the first event
    #[must_use]
    pub fn new(session: Session) -> Self {
        let cursor = PlaybackCursor::new(&session.trace);
        let mut load = CognitiveLoad::default();
        if session.failure.is_some() {
            load.record_failure();
        }
        Self {
            session,
            cursor,
            tree_view: TreeView::default(),
            load,
            speed: PlaybackSpeed::default(),
            playing: false,
            last_step: Instant::now(),
            view_mode: ViewMode::Playback,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    #[must_use]
    pub fn load(&self) -> u8 {
        self.load.value()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        self.handle_key_at(key, Instant::now());
    }

    /// Handle keyboard input received at `now`
    pub fn handle_key_at(&mut self, key: KeyCode, now: Instant) {
        if self.view_mode == ViewMode::Help {
            // Any key closes help
            self.view_mode = ViewMode::Playback;
            return;
        }

        match key {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right => {
                self.playing = false;
                self.load.record_move(now, false);
                self.cursor.step_forward();
            }
            KeyCode::Left => {
                self.playing = false;
                self.load.record_move(now, true);
                self.cursor.step_back();
            }
            KeyCode::Char(' ') => {
                if self.playing {
                    self.playing = false;
                } else if !self.cursor.is_empty() {
                    if self.cursor.is_at_end() {
                        self.cursor.reset();
                    }
                    self.playing = true;
                    self.last_step = now;
                }
            }
            KeyCode::Char('r' | 'R') | KeyCode::Home => {
                self.playing = false;
                self.cursor.reset();
            }
            KeyCode::End => {
                self.playing = false;
                self.cursor.to_end();
            }
            KeyCode::Char('+' | '=') => self.speed = self.speed.faster(),
            KeyCode::Char('-' | '_') => self.speed = self.speed.slower(),
            KeyCode::Up => self.tree_view.scroll_up(),
            KeyCode::Down => {
                let count = self.rows().len();
                self.tree_view.scroll_down(count);
            }
            KeyCode::Enter => {
                if let Some(id) = self.tree_view.selected_id(&self.rows()) {
                    self.playing = false;
                    self.cursor.seek_to_event(&self.session.trace, id);
                }
            }
            KeyCode::Char('?') => self.view_mode = ViewMode::Help,
            _ => {}
        }
    }

    /// Advance autoplay if a step is due
    pub fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        if now.saturating_duration_since(self.last_step) >= self.speed.interval() {
            self.cursor.step_forward();
            self.last_step = now;
            if self.cursor.is_at_end() {
                self.playing = false;
            }
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        if self.playing {
            let elapsed = now.saturating_duration_since(self.last_step);
            self.speed.interval().saturating_sub(elapsed).min(POLL_INTERVAL)
        } else {
            POLL_INTERVAL
        }
    }

    fn rows(&self) -> Vec<TreeRow> {
        self.cursor.tree(&self.session.trace).map(|root| tree_rows(&root)).unwrap_or_default()
    }

    /// Draw every panel into `f`
    pub fn draw(&mut self, f: &mut Frame) {
        let regions = layout::split(f.area());
        self.render_header(f, regions.header);

        let trace = &self.session.trace;
        let rows = self.rows();
        let current = self.cursor.event(trace).map(TraceEvent::id);
        self.tree_view.render(f, regions.tree, &rows, current);

        if let Some(area) = regions.status {
            let panel = StatusPanel {
                step: self.cursor.position(),
                total: self.cursor.len(),
                description: self.cursor.position().and_then(|p| describe_step(trace, p)),
                stats: &self.session.stats,
                failure: self.session.failure.as_deref(),
                load: self.load.value(),
                playing: self.playing,
                speed: self.speed,
            };
            panel.render(f, area);
        }
        if let Some(area) = regions.stack {
            stack_panel::render(f, area, &self.cursor.stack(trace));
        }
        if let Some(area) = regions.complexity {
            complexity_view::render(f, area, &self.session.samples, &self.session.reference(), self.session.model);
        }
        if let Some(area) = regions.key_bar {
            render_key_bar(f, area, self.view_mode);
        }

        if self.view_mode == ViewMode::Help {
            render_help_overlay(f, regions.body);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("RECURSCOPE", STYLE_HEADING),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(self.session.function_name.clone(), Style::new().fg(CAUTION_AMBER)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} evts", self.session.trace.len()), Style::new().fg(HUD_GREEN)),
        ];
        if let Some(model) = self.session.model {
            spans.push(Span::styled(" | ", STYLE_DIM));
            spans.push(Span::styled(model.to_string(), Style::new().fg(HUD_GREEN)));
        }
        let border = if self.session.failure.is_some() { CRITICAL_RED } else { HUD_GREEN };
        let header = Paragraph::new(vec![Line::from(spans)])
            .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(border)));
        f.render_widget(header, area);
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns an error if terminal setup or rendering fails
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.poll_timeout(Instant::now()))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
            self.tick(Instant::now());

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }
}

// =============================================================================
// OVERLAY RENDERERS
// =============================================================================

fn render_key_bar(f: &mut Frame, area: Rect, mode: ViewMode) {
    let line = match mode {
        ViewMode::Playback => Line::from(vec![
            Span::styled("←→", STYLE_KEY),
            Span::styled(":Step ", STYLE_DIM),
            Span::styled("Space", STYLE_KEY),
            Span::styled(":Play ", STYLE_DIM),
            Span::styled("R", STYLE_KEY),
            Span::styled(":Reset ", STYLE_DIM),
            Span::styled("+/-", STYLE_KEY),
            Span::styled(":Speed ", STYLE_DIM),
            Span::styled("Enter", STYLE_KEY),
            Span::styled(":Jump ", STYLE_DIM),
            Span::styled("?", STYLE_KEY),
            Span::styled(":Help ", STYLE_DIM),
            Span::styled("Q", STYLE_KEY),
            Span::styled(":Quit", STYLE_DIM),
        ]),
        ViewMode::Help => Line::from(vec![
            Span::styled("Any key", STYLE_KEY),
            Span::styled(":Close ", STYLE_DIM),
            Span::styled("[Help]", Style::default().fg(HUD_GREEN)),
        ]),
    };

    let bar = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(HUD_GREEN)));
    f.render_widget(bar, area);
}

/// Render the help overlay explaining the panels and keyboard shortcuts
fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_popup(area, 80, 22);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled(
            "  One run of a recursive function, replayed one call or return at a time.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  How to Read It", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Call tree   ", STYLE_LABEL),
            Span::styled("Every call so far. `…` marks calls still waiting on children.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Stack       ", STYLE_LABEL),
            Span::styled("Calls active right now. The top one is running.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Complexity  ", STYLE_LABEL),
            Span::styled("Calls needed for inputs 1..n against the expected curve.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Load        ", STYLE_LABEL),
            Span::styled("Rises as you step back, scrub quickly, or hit errors.", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  ←→", STYLE_KEY),
            Span::styled(" Step   ", STYLE_TEXT),
            Span::styled("Space", STYLE_KEY),
            Span::styled(" Play/Pause   ", STYLE_TEXT),
            Span::styled("R", STYLE_KEY),
            Span::styled(" Reset   ", STYLE_TEXT),
            Span::styled("Home/End", STYLE_KEY),
            Span::styled(" First/Last", STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("  ↑↓", STYLE_KEY),
            Span::styled(" Select call   ", STYLE_TEXT),
            Span::styled("Enter", STYLE_KEY),
            Span::styled(" Jump to it   ", STYLE_TEXT),
            Span::styled("+/-", STYLE_KEY),
            Span::styled(" Speed   ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(ratatui::style::Color::Black).fg(HUD_GREEN)),
    );

    f.render_widget(ratatui::widgets::Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
