//! Frame Limiter
//!
//! Caps the loop at a target frame rate. The remainder of each frame is
//! waited out with a blocking sleep for all but the last [`SPIN_MARGIN`],
//! then a short spin on the clock.
//!
//! Also tracks the measured frame time and a once-per-second FPS figure.

use std::time::{Duration, Instant};

/// Slack left for spinning after the blocking sleep.
pub const SPIN_MARGIN: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct FrameLimiter {
    target: Option<Duration>,
    frame_start: Instant,
    last_frame_time: Duration,
    frame_count: u32,
    last_fps_update: Instant,
    fps: f32,
}

impl FrameLimiter {
    /// `target_fps` below 1 disables the cap.
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            target: Self::frame_duration(target_fps),
            frame_start: now,
            last_frame_time: Duration::ZERO,
            frame_count: 0,
            last_fps_update: now,
            fps: 0.0,
        }
    }

    fn frame_duration(target_fps: u32) -> Option<Duration> {
        (target_fps >= 1).then(|| Duration::from_secs_f64(1.0 / target_fps as f64))
    }

    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.target = Self::frame_duration(target_fps);
    }

    /// Target frame duration, `None` when uncapped.
    pub fn target(&self) -> Option<Duration> {
        self.target
    }

    /// Time left in the current frame, zero once the frame is over budget.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.target {
            Some(target) => target.saturating_sub(now.duration_since(self.frame_start)),
            None => Duration::ZERO,
        }
    }

    /// Wait out the current frame and start the next one.
    ///
    /// Returns the full duration of the frame just finished.
    pub fn sync(&mut self) -> Duration {
        let remaining = self.remaining(Instant::now());
        if remaining > SPIN_MARGIN {
            std::thread::sleep(remaining - SPIN_MARGIN);
        }
        if let Some(target) = self.target {
            while self.frame_start.elapsed() < target {
                std::hint::spin_loop();
            }
        }

        let now = Instant::now();
        self.last_frame_time = now.duration_since(self.frame_start);
        self.frame_start = now;

        self.frame_count += 1;
        let since_update = now.duration_since(self.last_fps_update).as_secs_f32();
        if since_update >= 1.0 {
            self.fps = self.frame_count as f32 / since_update;
            self.frame_count = 0;
            self.last_fps_update = now;
        }

        self.last_frame_time
    }

    /// Duration of the previous complete frame.
    pub fn frame_time(&self) -> Duration {
        self.last_frame_time
    }

    /// Frames per second averaged over the last full second.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
