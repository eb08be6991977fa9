//! Frame pacing

use std::time::{Duration, Instant};

use crate::consts::TICK_MS;

/// Sleeps out the remainder of each fixed-length frame
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    started: Instant,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS))
    }
}

impl FramePacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            started: Instant::now(),
        }
    }

    /// Mark the start of a frame
    pub fn begin(&mut self) {
        self.started = Instant::now();
    }

    /// Time left in the current frame
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.started.elapsed())
    }

    /// Block until the frame's time is used up
    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_never_exceeds_frame() {
        let mut pacer = FramePacer::new(Duration::from_millis(16));
        pacer.begin();
        assert!(pacer.remaining() <= Duration::from_millis(16));
    }

    #[test]
    fn test_wait_uses_up_frame() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        pacer.begin();
        pacer.wait();
        assert!(pacer.remaining().is_zero());
    }
}
