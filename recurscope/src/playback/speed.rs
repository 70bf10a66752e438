//! Autoplay speed presets

use std::fmt;
use std::time::Duration;

/// Autoplay rate, one step per interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSpeed {
    Half,
    #[default]
    Normal,
    Double,
    Triple,
    Fivefold,
}

const ORDER: [PlaybackSpeed; 5] = [
    PlaybackSpeed::Half,
    PlaybackSpeed::Normal,
    PlaybackSpeed::Double,
    PlaybackSpeed::Triple,
    PlaybackSpeed::Fivefold,
];

impl PlaybackSpeed {
    /// Delay between automatic steps
    #[must_use]
    pub fn interval(self) -> Duration {
        Duration::from_millis(match self {
            PlaybackSpeed::Half => 2000,
            PlaybackSpeed::Normal => 1000,
            PlaybackSpeed::Double => 500,
            PlaybackSpeed::Triple => 300,
            PlaybackSpeed::Fivefold => 100,
        })
    }

    #[must_use]
    pub fn faster(self) -> Self {
        ORDER.get(self.rank() + 1).copied().unwrap_or(self)
    }

    #[must_use]
    pub fn slower(self) -> Self {
        self.rank().checked_sub(1).map_or(self, |i| ORDER[i])
    }

    fn rank(self) -> usize {
        ORDER.iter().position(|&s| s == self).unwrap_or(1)
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Normal => "1x",
            PlaybackSpeed::Double => "2x",
            PlaybackSpeed::Triple => "3x",
            PlaybackSpeed::Fivefold => "5x",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_steps_saturate() {
        assert_eq!(PlaybackSpeed::Fivefold.faster(), PlaybackSpeed::Fivefold);
        assert_eq!(PlaybackSpeed::Half.slower(), PlaybackSpeed::Half);
        assert_eq!(PlaybackSpeed::default().faster(), PlaybackSpeed::Double);
        assert_eq!(PlaybackSpeed::Double.interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Triple.to_string(), "3x");
    }
}
