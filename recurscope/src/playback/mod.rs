//! Stepwise playback over a finished trace
//!
//! - `cursor`: the bounded position and the views derived from it
//! - `speed`: autoplay intervals

pub mod cursor;
pub mod speed;

pub use cursor::{describe_step, PlaybackCursor};
pub use speed::PlaybackSpeed;
