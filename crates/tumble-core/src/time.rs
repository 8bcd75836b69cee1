//! Time Management
//!
//! Frame timing for a variable-step loop:
//! - Clamped simulation deltas
//! - Sample-averaged frame rate for diagnostics
//! - Cooldowns and a wall-clock stopwatch

use std::time::{Duration, Instant};

/// Clamp a frame delta into `[0, max]`.
///
/// NaN and non-positive deltas become zero so time never runs backwards.
/// An infinite delta is capped like any other long frame.
pub fn clamp_step(dt: f32, max: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max.max(0.0))
}

/// Frame rate averaged over a fixed number of samples.
///
/// The displayed value only changes once per full batch, which keeps HUD
/// text readable.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    sample_size: u32,
    accumulator: f32,
    count: u32,
    fps: f32,
    frames: u64,
}

impl FrameCounter {
    /// Create a counter averaging over `sample_size` frames
    pub fn new(sample_size: u32) -> Self {
        Self {
            sample_size: sample_size.max(1),
            accumulator: 0.0,
            count: 0,
            fps: 0.0,
            frames: 0,
        }
    }

    /// Record one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        if dt > 0.0 {
            self.accumulator += 1.0 / dt;
            self.count += 1;
        }

        if self.count >= self.sample_size {
            self.fps = self.accumulator / self.count as f32;
            self.accumulator = 0.0;
            self.count = 0;
        }
    }

    /// Last completed average
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frames recorded
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Countdown gate for repeatable actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    duration: f32,
    remaining: f32,
}

impl Cooldown {
    /// Create a ready cooldown of `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Check whether the action may fire
    pub fn is_ready(&self) -> bool {
        self.remaining == 0.0
    }

    /// Fire if ready, restarting the countdown. Returns whether it fired.
    pub fn trigger(&mut self) -> bool {
        if self.is_ready() {
            self.remaining = self.duration;
            true
        } else {
            false
        }
    }

    /// Seconds until ready
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Make the cooldown ready immediately
    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Stopwatch for measuring elapsed time
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Instant,
    elapsed: Duration,
    running: bool,
}

impl Stopwatch {
    /// Create and start a new stopwatch
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Stop the stopwatch
    pub fn stop(&mut self) {
        if self.running {
            self.elapsed += self.start.elapsed();
            self.running = false;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.elapsed + self.start.elapsed()
        } else {
            self.elapsed
        }
    }

    /// Get the elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Check if the stopwatch is running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_step() {
        assert_eq!(clamp_step(0.01, 0.05), 0.01);
        assert_eq!(clamp_step(0.2, 0.05), 0.05);
        assert_eq!(clamp_step(-0.1, 0.05), 0.0);
        assert_eq!(clamp_step(f32::NAN, 0.05), 0.0);
        assert_eq!(clamp_step(f32::NEG_INFINITY, 0.05), 0.0);
        assert_eq!(clamp_step(f32::INFINITY, 0.05), 0.05);
    }

    #[test]
    fn test_frame_counter_averages_batches() {
        let mut counter = FrameCounter::new(4);
        for _ in 0..3 {
            counter.tick(0.01);
        }
        assert_eq!(counter.fps(), 0.0);

        counter.tick(0.01);
        assert!((counter.fps() - 100.0).abs() < 0.1);
        assert_eq!(counter.frame_count(), 4);

        // Zero-length frames are counted but not sampled
        counter.tick(0.0);
        assert_eq!(counter.frame_count(), 5);
        assert!((counter.fps() - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_cooldown() {
        let mut cd = Cooldown::new(0.15);
        assert!(cd.is_ready());
        assert!(cd.trigger());
        assert!(!cd.trigger());

        cd.tick(0.1);
        assert!(!cd.is_ready());
        cd.tick(0.1);
        assert!(cd.is_ready());
        assert_eq!(cd.remaining(), 0.0);
    }

    #[test]
    fn test_stopwatch() {
        let mut sw = Stopwatch::new();
        assert!(sw.is_running());

        std::thread::sleep(Duration::from_millis(5));
        sw.stop();

        assert!(!sw.is_running());
        assert!(sw.elapsed() >= Duration::from_millis(5));
    }
}
