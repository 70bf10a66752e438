//! Call tree panel.
//!
//! ```text
//! [ CALL TREE 5/5 ]
//!  fibonacci(3) = 2
//!  ├── fibonacci(2) = 1
//! <│   ├── fibonacci(1) = 1>      <- selected row
//!  │   └── fibonacci(0) …         <- still running at this step
//!  └── fibonacci(1) = 1
//! ```
//!
//! The row of the call the current event belongs to is drawn in amber;
//! pending calls are dim.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};

use super::theme::{CAUTION_AMBER, HUD_GREEN, INFO_DIM};
use crate::domain::CallId;
use crate::report::TreeRow;

const SEL_LEFT: &str = "<";
const SEL_RIGHT: &str = ">";

/// Calculate scroll offset to keep selected item visible
fn visible_scroll_offset(selected: usize, current_offset: usize, visible_count: usize) -> usize {
    if selected >= current_offset + visible_count {
        selected.saturating_sub(visible_count - 1)
    } else {
        current_offset.min(selected)
    }
}

/// Selection and scroll state over the rows of the current tree
#[derive(Debug, Default)]
pub struct TreeView {
    pub selected_index: usize,
    scroll_offset: usize,
}

impl TreeView {
    pub fn scroll_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, row_count: usize) {
        self.selected_index = (self.selected_index + 1).min(row_count.saturating_sub(1));
    }

    /// Call id of the selected row
    #[must_use]
    pub fn selected_id(&self, rows: &[TreeRow]) -> Option<CallId> {
        rows.get(self.selected_index.min(rows.len().saturating_sub(1))).map(|r| r.id)
    }

    /// Keep the selection inside a tree that may have shrunk
    pub fn clamp(&mut self, row_count: usize) {
        self.selected_index = self.selected_index.min(row_count.saturating_sub(1));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, rows: &[TreeRow], current: Option<CallId>) {
        self.clamp(rows.len());
        let visible = (area.height.saturating_sub(2) as usize).max(1);
        self.scroll_offset = visible_scroll_offset(self.selected_index, self.scroll_offset, visible);

        let lines: Vec<Line> = if rows.is_empty() {
            vec![Line::from(Span::styled(" (no calls yet)", Style::default().fg(INFO_DIM)))]
        } else {
            rows.iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(visible)
                .map(|(i, row)| render_row(row, i == self.selected_index, Some(row.id) == current))
                .collect()
        };

        let resolved = rows.iter().filter(|r| r.result.is_some()).count();
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .title(format!("[ CALL TREE {resolved}/{} ]", rows.len()))
                .border_style(Style::default().fg(HUD_GREEN)),
        );

        f.render_widget(paragraph, area);
    }
}

fn render_row(row: &TreeRow, is_selected: bool, is_current: bool) -> Line<'static> {
    let (sel_l, sel_r) = if is_selected { (SEL_LEFT, SEL_RIGHT) } else { (" ", " ") };
    let color = if is_current {
        CAUTION_AMBER
    } else if row.result.is_some() {
        HUD_GREEN
    } else {
        INFO_DIM
    };
    let mut style = Style::default().fg(color);
    if is_selected {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let mut spans = vec![
        Span::styled(sel_l, Style::default().fg(CAUTION_AMBER)),
        Span::styled(row.prefix.clone(), Style::default().fg(INFO_DIM)),
        Span::styled(row.signature.clone(), style),
    ];
    match &row.result {
        Some(value) => spans.push(Span::styled(format!(" = {value}"), Style::default().fg(color))),
        None => spans.push(Span::styled(" …", Style::default().fg(INFO_DIM))),
    }
    spans.push(Span::styled(sel_r, Style::default().fg(CAUTION_AMBER)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: u64) -> Vec<TreeRow> {
        (0..n)
            .map(|i| TreeRow {
                id: CallId(i),
                prefix: String::new(),
                signature: format!("f({i})"),
                result: None,
            })
            .collect()
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let rows = rows(3);
        let mut view = TreeView::default();
        view.scroll_up();
        assert_eq!(view.selected_index, 0);
        for _ in 0..5 {
            view.scroll_down(rows.len());
        }
        assert_eq!(view.selected_id(&rows), Some(CallId(2)));
        view.clamp(1);
        assert_eq!(view.selected_index, 0);
        assert_eq!(view.selected_id(&[]), None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        assert_eq!(visible_scroll_offset(0, 0, 5), 0);
        assert_eq!(visible_scroll_offset(7, 0, 5), 3);
        assert_eq!(visible_scroll_offset(1, 3, 5), 1);
    }
}
