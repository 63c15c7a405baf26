//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks per-frame delta time and a windowed FPS display figure.
///
/// The FPS figure is an average over the display interval (frames elapsed /
/// wall time elapsed), refreshed once per interval. The benchmark harness
/// does not use it; it consumes the raw per-frame delta instead.
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    display_timer: Instant,
    display_frame_count: u32,
    display_interval: Duration,
    fps: f32,
}

impl FrameTimer {
    /// Create a new frame timer with the given FPS display refresh interval
    pub fn new(display_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            display_timer: now,
            display_frame_count: 0,
            display_interval,
            fps: 0.0,
        }
    }

    /// Call once per frame to update timing.
    ///
    /// Returns `true` when the FPS display figure was refreshed this frame,
    /// signalling the caller to update its liveness display (window title).
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
        self.display_frame_count += 1;

        let elapsed = now - self.display_timer;
        if elapsed >= self.display_interval {
            self.fps = self.display_frame_count as f32 / elapsed.as_secs_f32();
            self.display_frame_count = 0;
            self.display_timer = now;
            true
        } else {
            false
        }
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get delta time in milliseconds (benchmark sample unit)
    pub fn delta_ms(&self) -> f64 {
        self.delta.as_secs_f64() * 1000.0
    }

    /// Get the windowed FPS figure (refreshed once per display interval)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_counts_frame() {
        let mut timer = FrameTimer::default();
        timer.tick();
        assert_eq!(timer.frame_count(), 1);
        assert!(timer.delta_ms() >= 0.0);
    }

    #[test]
    fn test_display_refresh_after_interval() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(Duration::from_millis(100));
        timer.last_frame = start;
        timer.display_timer = start;

        // 10 frames at 20ms each crosses the 100ms display interval
        let mut refreshed = 0;
        for i in 1..=10u32 {
            if timer.tick_at(start + Duration::from_millis(20 * i as u64)) {
                refreshed += 1;
            }
        }
        assert!(refreshed >= 1);
        assert!(timer.fps() > 0.0);
    }

    #[test]
    fn test_delta_between_ticks() {
        let start = Instant::now();
        let mut timer = FrameTimer::default();
        timer.last_frame = start;
        timer.display_timer = start;

        timer.tick_at(start + Duration::from_millis(16));
        assert!((timer.delta_ms() - 16.0).abs() < 0.01);
        assert!((timer.delta_secs() - 0.016).abs() < 0.0001);
    }
}
