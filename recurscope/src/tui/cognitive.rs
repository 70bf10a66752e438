//! Learner load estimate.
//!
//! A rough 0-100 signal of how much the viewer is struggling, driven purely
//! by how they move through the playback: stepping backwards, scrubbing in
//! quick bursts, and running code that fails all raise it. It never decays
//! within a session.

use std::time::{Duration, Instant};

const INITIAL: u8 = 10;
const MAX: u8 = 100;
const STEP_BACK_COST: u8 = 5;
const RAPID_MOVE_COST: u8 = 2;
const FAILURE_COST: u8 = 40;

/// Moves closer together than this count as scrubbing
const RAPID_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CognitiveLoad {
    value: u8,
    last_move: Option<Instant>,
}

impl Default for CognitiveLoad {
    fn default() -> Self {
        Self { value: INITIAL, last_move: None }
    }
}

impl CognitiveLoad {
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// A manual cursor move at `now`
    pub fn record_move(&mut self, now: Instant, backwards: bool) {
        if backwards {
            self.add(STEP_BACK_COST);
        }
        if self.last_move.is_some_and(|last| now.saturating_duration_since(last) < RAPID_WINDOW) {
            self.add(RAPID_MOVE_COST);
        }
        self.last_move = Some(now);
    }

    /// The traced run ended in an error
    pub fn record_failure(&mut self) {
        self.add(FAILURE_COST);
    }

    fn add(&mut self, amount: u8) {
        self.value = self.value.saturating_add(amount).min(MAX);
    }
}
