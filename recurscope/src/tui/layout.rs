//! Responsive screen regions for the playback view.
//!
//! The terminal is carved into a header, the call tree, and whichever of the
//! status panel, stack, complexity chart and key bar still fit. Panels that
//! do not fit are `None` rather than squeezed to a few unreadable rows.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

// Width breakpoints
const WIDTH_TREE_ONLY: u16 = 60; // Below this: no side column
const WIDTH_NARROW: u16 = 100; // Up to this: give the side column more room

// Height breakpoints
const HEIGHT_MINIMAL: u16 = 16; // Below this: header + tree only
const HEIGHT_COMPACT: u16 = 24; // Up to this: no complexity chart

const HEADER_HEIGHT: u16 = 3;
const KEY_BAR_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 8;

/// How much of the view fits vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// Header and call tree
    Minimal,
    /// Everything but the complexity chart
    Compact,
    Full,
}

impl Density {
    #[must_use]
    pub fn for_height(height: u16) -> Self {
        if height < HEIGHT_MINIMAL {
            Density::Minimal
        } else if height <= HEIGHT_COMPACT {
            Density::Compact
        } else {
            Density::Full
        }
    }
}

/// Where each panel goes this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub density: Density,
    pub header: Rect,
    pub tree: Rect,
    pub status: Option<Rect>,
    pub stack: Option<Rect>,
    pub complexity: Option<Rect>,
    pub key_bar: Option<Rect>,
    /// Everything between header and key bar (help overlay anchor)
    pub body: Rect,
}

/// Tree / side column split, in percent
fn column_split(width: u16) -> (u16, u16) {
    if width <= WIDTH_NARROW {
        (55, 45)
    } else {
        (60, 40)
    }
}

/// Split `area` into panel regions.
///
/// | Terminal Size | Behavior |
/// |---------------|----------|
/// | Width < 60    | Tree and status only |
/// | Width 60-100  | Tree 55%, side column 45% |
/// | Width > 100   | Tree 60%, side column 40% |
/// | Height < 16   | Header + tree only |
/// | Height 16-24  | No complexity chart |
/// | Height > 24   | Every panel |
#[must_use]
pub fn split(area: Rect) -> Regions {
    let density = Density::for_height(area.height);
    let roomy = density != Density::Minimal;

    let mut rows = vec![Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)];
    if roomy {
        rows.push(Constraint::Length(KEY_BAR_HEIGHT));
    }
    let outer = Layout::default().direction(Direction::Vertical).constraints(rows).split(area);
    let body = outer[1];
    let key_bar = roomy.then(|| outer[2]);

    let (left, side) = if roomy && area.width >= WIDTH_TREE_ONLY {
        let (tree_pct, side_pct) = column_split(area.width);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(tree_pct), Constraint::Percentage(side_pct)])
            .split(body);
        (cols[0], Some(cols[1]))
    } else {
        (body, None)
    };

    let (tree, status) = if roomy {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .split(left);
        (parts[0], Some(parts[1]))
    } else {
        (left, None)
    };

    let (stack, complexity) = match (side, density) {
        (Some(side), Density::Full) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(side);
            (Some(parts[0]), Some(parts[1]))
        }
        (Some(side), _) => (Some(side), None),
        (None, _) => (None, None),
    };

    Regions { density, header: outer[0], tree, status, stack, complexity, key_bar, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(width: u16, height: u16) -> Regions {
        split(Rect::new(0, 0, width, height))
    }

    #[test]
    fn test_full_screen() {
        let regions = screen(120, 40);
        assert_eq!(regions.density, Density::Full);
        assert_eq!(regions.header.height, HEADER_HEIGHT);
        assert!(regions.status.is_some());
        assert!(regions.complexity.is_some());
        assert!(regions.key_bar.is_some());
        let stack = regions.stack.unwrap();
        assert_eq!(regions.tree.width + stack.width, 120);
        assert!(regions.tree.width > stack.width);
    }

    #[test]
    fn test_narrow_gives_side_column_more_room() {
        let wide = screen(120, 40);
        let narrow = screen(80, 40);
        let share = |r: &Regions| f64::from(r.tree.width) / f64::from(r.body.width);
        assert!(share(&narrow) < share(&wide));
        assert!(narrow.stack.is_some());
    }

    #[test]
    fn test_tree_only_width() {
        let regions = screen(50, 40);
        assert!(regions.stack.is_none());
        assert!(regions.complexity.is_none());
        assert!(regions.status.is_some());
        assert_eq!(regions.tree.width, 50);
    }

    #[test]
    fn test_minimal_height() {
        let regions = screen(120, 12);
        assert_eq!(regions.density, Density::Minimal);
        assert!(regions.status.is_none());
        assert!(regions.stack.is_none());
        assert!(regions.key_bar.is_none());
        assert_eq!(regions.tree.height, 12 - HEADER_HEIGHT);
    }

    #[test]
    fn test_compact_height() {
        let regions = screen(120, 20);
        assert_eq!(regions.density, Density::Compact);
        assert!(regions.complexity.is_none());
        assert_eq!(regions.stack.map(|r| r.height), Some(20 - HEADER_HEIGHT - KEY_BAR_HEIGHT));
    }
}
