//! Frame pacing.
//!
//! The loop asks a [`Clock`] how long the previous frame took, runs one
//! frame with that delta, then lets the clock hold it back until the
//! next frame is due.
//!
//! # Example
//!
//! ```ignore
//! use raincloud::time::{Clock, FrameClock};
//!
//! let mut clock = FrameClock::new(60);
//!
//! loop {
//!     let dt = clock.elapsed_since_last_frame();
//!     // input, update, render...
//!     clock.sleep_until_next_frame();
//! }
//! ```

use std::time::{Duration, Instant};

/// Source of frame deltas and frame-rate capping.
pub trait Clock {
    /// Seconds since the previous call. Call once per frame.
    fn elapsed_since_last_frame(&mut self) -> f32;

    /// Block until the next frame is due.
    fn sleep_until_next_frame(&mut self);
}

/// Wall-clock frame timer capped at a target rate.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame began.
    last_frame: Instant,
    /// Minimum time between frames.
    frame_interval: Duration,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock capped at `target_fps` frames per second.
    ///
    /// A target of 0 is treated as 1.
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            frame_interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Delta returned by the last call to `elapsed_since_last_frame`.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Restart frame timing from now, so the next delta excludes
    /// everything that happened before this call.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.last_frame = now;
        self.fps_update_time = now;
        self.fps_frame_count = self.frame_count;
    }

    /// Instant at which the next frame should start.
    pub fn next_frame_deadline(&self) -> Instant {
        self.last_frame + self.frame_interval
    }

    fn update_fps(&mut self, now: Instant) {
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Clock for FrameClock {
    fn elapsed_since_last_frame(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.update_fps(now);
        self.delta_secs
    }

    fn sleep_until_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_frame_deadline();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Clock that reports the same delta every frame and never sleeps.
///
/// Useful for deterministic stepping and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    delta: f32,
    frames: u64,
}

impl FixedClock {
    pub fn new(delta: f32) -> Self {
        Self { delta, frames: 0 }
    }

    /// Frames stepped so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for FixedClock {
    fn elapsed_since_last_frame(&mut self) -> f32 {
        self.frames += 1;
        self.delta
    }

    fn sleep_until_next_frame(&mut self) {}
}
