//! TUI color theme
//!
//! HUD-inspired color scheme for the terminal interface

use ratatui::style::Color;

pub const HUD_GREEN: Color = Color::Rgb(0, 255, 0);
pub const HUD_CYAN: Color = Color::Rgb(0, 220, 220);
pub const CRITICAL_RED: Color = Color::Rgb(255, 0, 0);
pub const CAUTION_AMBER: Color = Color::Rgb(255, 191, 0);
pub const INFO_DIM: Color = Color::Rgb(0, 180, 0);

/// Color for a 0-100 load reading
/// - Above 80: Critical (Red)
/// - Above 60: Caution (Amber)
/// - Otherwise: Normal (Green)
#[must_use]
pub fn warning_color(percentage: f64) -> Color {
    if percentage > 80.0 {
        CRITICAL_RED
    } else if percentage > 60.0 {
        CAUTION_AMBER
    } else {
        HUD_GREEN
    }
}

/// `▓▓▓░░░░░░░` style bar, `width` cells wide
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn gauge_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_bar() {
        assert_eq!(gauge_bar(0.0, 4), "░░░░");
        assert_eq!(gauge_bar(50.0, 4), "▓▓░░");
        assert_eq!(gauge_bar(250.0, 4), "▓▓▓▓");
    }

    #[test]
    fn test_warning_color() {
        assert_eq!(warning_color(10.0), HUD_GREEN);
        assert_eq!(warning_color(70.0), CAUTION_AMBER);
        assert_eq!(warning_color(90.0), CRITICAL_RED);
    }
}
