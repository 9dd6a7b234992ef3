//! Frame timing for the animation loop.
//!
//! The simulation itself is frame-based (velocities are in units per
//! frame), so nothing here feeds back into physics. [`FrameClock`] only
//! tracks how fast frames arrive, for logging and host overlays.

// std's Instant panics on wasm32-unknown-unknown
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Frame counter with delta time and a periodically refreshed FPS.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Clock whose FPS estimate refreshes twice a second.
    pub fn new() -> Self {
        Self::with_fps_interval(Duration::from_millis(500))
    }

    /// Clock whose FPS estimate refreshes every `interval`.
    pub fn with_fps_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
        }
    }

    /// Mark a frame. Returns `true` when the FPS estimate was refreshed.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let since = now.duration_since(self.fps_update_time);
        if since < self.fps_update_interval {
            return false;
        }

        let frames = self.frame_count - self.fps_frame_count;
        self.fps = frames as f32 / since.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Time between the last two ticks.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Frames per second over the last refresh interval.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.delta(), Duration::ZERO);
    }

    #[test]
    fn test_clock_tick() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        clock.tick();

        assert_eq!(clock.frame(), 1);
        assert!(clock.delta() >= Duration::from_millis(5));
    }

    #[test]
    fn test_fps_refresh() {
        let mut clock = FrameClock::with_fps_interval(Duration::from_millis(200));
        assert!(!clock.tick());

        thread::sleep(Duration::from_millis(250));
        assert!(clock.tick());
        assert!(clock.fps() > 0.0);
    }

    #[test]
    fn test_elapsed_covers_delta() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        clock.tick();

        assert!(clock.elapsed() >= clock.delta());
    }
}
