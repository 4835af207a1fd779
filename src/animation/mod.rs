pub mod driver;
pub mod pulse;

pub use driver::{AnimationDriver, DriverStep};
pub use pulse::{PulseAnimation, PulsePhase};

use std::time::{Duration, Instant};

/// Default target frame rate
pub const TARGET_FPS: u32 = 60;

/// Frame pacing for the foreground loop
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    frame_duration: Duration,
    last_frame: Option<Instant>,
    frame_count: u64,
}

impl AnimationLoop {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_duration: Duration::from_micros(1_000_000 / target_fps as u64),
            last_frame: None,
            frame_count: 0,
        }
    }

    /// Forget the previous frame so the next check renders immediately
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Check if it's time for a new frame
    pub fn should_render(&self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) => now.saturating_duration_since(last) >= self.frame_duration,
            None => true,
        }
    }

    /// Mark frame as rendered
    pub fn frame_rendered(&mut self, now: Instant) {
        self.last_frame = Some(now);
        self.frame_count += 1;
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time until next frame
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => self
                .frame_duration
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_due_immediately() {
        let frames = AnimationLoop::new(60);
        let now = Instant::now();
        assert!(frames.should_render(now));
        assert_eq!(frames.time_until_next_frame(now), Duration::ZERO);
    }

    #[test]
    fn test_waits_one_frame_duration() {
        let mut frames = AnimationLoop::new(50);
        let start = Instant::now();
        frames.frame_rendered(start);

        assert!(!frames.should_render(start + Duration::from_millis(10)));
        assert_eq!(
            frames.time_until_next_frame(start + Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert!(frames.should_render(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_reset_makes_frame_due() {
        let mut frames = AnimationLoop::new(60);
        let start = Instant::now();
        frames.frame_rendered(start);
        frames.reset();
        assert!(frames.should_render(start));
    }

    #[test]
    fn test_counts_rendered_frames() {
        let mut frames = AnimationLoop::new(10);
        let start = Instant::now();
        for i in 0..=10 {
            frames.frame_rendered(start + Duration::from_millis(i * 100));
        }
        assert_eq!(frames.frame_count(), 11);
    }
}
