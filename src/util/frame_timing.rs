use web_time::{Duration, Instant};

use super::smoothing::approach;

/// How often the frame statistics are logged.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame timing with smoothed FPS and periodic debug reporting.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time stats were logged
    last_report: Instant,
    /// Frames since the last report
    frames_since_report: u32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            frames_since_report: 0,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Call once per rendered frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frames_since_report += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            self.smoothed_fps =
                approach(self.smoothed_fps, 1.0 / frame_time, self.smoothing);
        }

        if now.duration_since(self.last_report) >= REPORT_INTERVAL {
            log::debug!(
                "{} frames in {:.1}s, {:.0} fps",
                self.frames_since_report,
                now.duration_since(self.last_report).as_secs_f32(),
                self.smoothed_fps
            );
            self.last_report = now;
            self.frames_since_report = 0;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
