// src/clock.rs
use std::time::{Duration, Instant};

/// Frame-rate throttle. Each `tick()` sleeps out whatever remains of the
/// current frame so a loop that polls and repaints runs at the target rate
/// instead of spinning.
pub struct FrameClock {
    target_frame_time: Duration,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_frame_time: Duration::from_secs(1) / target_fps,
            last_frame: Instant::now(),
        }
    }

    /// Blocks until the frame budget is spent, then starts the next frame.
    /// Returns the wall time the whole frame took.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.target_frame_time {
            std::thread::sleep(self.target_frame_time - elapsed);
        }
        let frame_time = self.last_frame.elapsed();
        self.last_frame = Instant::now();
        frame_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_enforces_target_rate() {
        let mut clock = FrameClock::new(100);
        clock.tick();
        let frame = clock.tick();
        assert!(frame >= Duration::from_millis(10));
    }
}
