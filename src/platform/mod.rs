//! Platform abstraction layer
//!
//! Handles terminal-specific concerns for:
//! - Input events (keyboard -> per-tick snapshot)
//! - Time/ticks (fixed cadence pacing)

pub mod input;
pub mod time;

pub use input::{InputSnapshot, Key, KeyboardState};
pub use time::FramePacer;
