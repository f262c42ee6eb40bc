//! Scroll-driven fly-through controller.
//!
//! Scroll events move a clamped target progress; each frame tick eases the
//! current progress toward it and evaluates [`FlightPath::pose`]. Input
//! handling never touches the pose directly, so scroll bursts between two
//! frames cost nothing.

use super::path::{FlightPath, Pose};
use crate::error::ConfigError;
use crate::options::Options;
use crate::util::smoothing::approach_settled;

/// Distance under which the smoothed progress lands on its target.
const SETTLE_EPSILON: f32 = 1e-4;

/// Anything that can be pointed by a [`Pose`] each frame.
pub trait CameraHandle {
    /// Move the look-at target and heading to `pose`.
    fn set_pose(&mut self, pose: &Pose);
}

/// Smoothed scroll progress along a [`FlightPath`].
#[derive(Debug, Clone)]
pub struct Flythrough {
    path: FlightPath,
    target_progress: f32,
    current_progress: f32,
    smooth_factor: f32,
    scroll_sensitivity: f32,
}

impl Flythrough {
    /// Controller at the entrance with nothing scrolled yet.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SmoothFactorOutOfRange`] unless
    /// `0 < smooth_factor < 1`, and
    /// [`ConfigError::InvalidScrollSensitivity`] for a non-finite or
    /// non-positive sensitivity.
    pub fn new(
        path: FlightPath,
        smooth_factor: f32,
        scroll_sensitivity: f32,
    ) -> Result<Self, ConfigError> {
        if !(smooth_factor > 0.0 && smooth_factor < 1.0) {
            return Err(ConfigError::SmoothFactorOutOfRange(smooth_factor));
        }
        if !(scroll_sensitivity.is_finite() && scroll_sensitivity > 0.0) {
            return Err(ConfigError::InvalidScrollSensitivity(
                scroll_sensitivity,
            ));
        }
        Ok(Self {
            path,
            target_progress: 0.0,
            current_progress: 0.0,
            smooth_factor,
            scroll_sensitivity,
        })
    }

    /// Build path and controller from options.
    ///
    /// # Errors
    ///
    /// Any validation error of [`FlightPath::from_options`] or
    /// [`Flythrough::new`].
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let path = FlightPath::from_options(options)?;
        Self::new(
            path,
            options.camera.smooth_factor,
            options.camera.scroll_sensitivity,
        )
    }

    /// The path being flown.
    #[must_use]
    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    /// Where scrolling wants the camera to be.
    #[must_use]
    pub fn target_progress(&self) -> f32 {
        self.target_progress
    }

    /// Where the camera is this frame.
    #[must_use]
    pub fn current_progress(&self) -> f32 {
        self.current_progress
    }

    /// Upper bound of both progress values.
    #[must_use]
    pub fn max_progress(&self) -> f32 {
        self.path.max_progress()
    }

    /// Accumulate a scroll delta in pixels (positive advances).
    ///
    /// Non-finite deltas are dropped and leave the state untouched; the
    /// return value says whether the delta was applied.
    pub fn on_scroll(&mut self, delta: f32) -> bool {
        if !delta.is_finite() {
            log::debug!("discarding non-finite scroll delta {delta}");
            return false;
        }
        self.target_progress = (self.target_progress
            + delta * self.scroll_sensitivity)
            .clamp(0.0, self.max_progress());
        true
    }

    /// Ease toward the target and return this frame's pose.
    pub fn on_frame_tick(&mut self) -> Pose {
        self.current_progress = approach_settled(
            self.current_progress,
            self.target_progress,
            self.smooth_factor,
            SETTLE_EPSILON,
        );
        self.path.pose(self.current_progress)
    }

    /// [`on_frame_tick`](Self::on_frame_tick), then point `camera` at the
    /// result.
    pub fn drive(&mut self, camera: &mut impl CameraHandle) -> Pose {
        let pose = self.on_frame_tick();
        camera.set_pose(&pose);
        pose
    }

    /// Jump straight to the entrance, discarding pending scroll.
    pub fn reset(&mut self) {
        self.target_progress = 0.0;
        self.current_progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn flythrough() -> Flythrough {
        Flythrough::from_options(&Options::default()).unwrap()
    }

    #[derive(Default)]
    struct RecordingCamera {
        poses: Vec<Pose>,
    }

    impl CameraHandle for RecordingCamera {
        fn set_pose(&mut self, pose: &Pose) {
            self.poses.push(*pose);
        }
    }

    #[test]
    fn starts_at_entrance() {
        let fly = flythrough();
        assert_eq!(fly.target_progress(), 0.0);
        assert_eq!(fly.current_progress(), 0.0);
        assert_eq!(fly.max_progress(), 6.0);
    }

    #[test]
    fn scroll_scales_by_sensitivity() {
        let mut fly = flythrough();
        assert!(fly.on_scroll(100.0));
        assert!((fly.target_progress() - 0.1).abs() < 1e-6);
        // Scrolling alone never moves the camera.
        assert_eq!(fly.current_progress(), 0.0);
    }

    #[test]
    fn target_stays_in_bounds_for_random_scrolls() {
        let mut fly = flythrough();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let delta = rng.random_range(-4_000.0..4_000.0_f32);
            let _ = fly.on_scroll(delta);
            let t = fly.target_progress();
            assert!((0.0..=fly.max_progress()).contains(&t), "target {t}");
            let _ = fly.on_frame_tick();
            let c = fly.current_progress();
            assert!((0.0..=fly.max_progress()).contains(&c), "current {c}");
        }
    }

    #[test]
    fn non_finite_scroll_is_ignored() {
        let mut fly = flythrough();
        let _ = fly.on_scroll(500.0);
        let before = fly.target_progress();
        assert!(!fly.on_scroll(f32::NAN));
        assert!(!fly.on_scroll(f32::INFINITY));
        assert!(!fly.on_scroll(f32::NEG_INFINITY));
        assert_eq!(fly.target_progress(), before);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut fly = flythrough();
        let _ = fly.on_scroll(3_000.0);
        let target = fly.target_progress();
        let mut distance = (target - fly.current_progress()).abs();
        for _ in 0..200 {
            let _ = fly.on_frame_tick();
            let current = fly.current_progress();
            assert!(current <= target);
            let next = (target - current).abs();
            assert!(next < distance || next == 0.0);
            distance = next;
        }
    }

    #[test]
    fn converges_downward_too() {
        let mut fly = flythrough();
        let _ = fly.on_scroll(6_000.0);
        for _ in 0..400 {
            let _ = fly.on_frame_tick();
        }
        let _ = fly.on_scroll(-2_500.0);
        let target = fly.target_progress();
        for _ in 0..200 {
            let _ = fly.on_frame_tick();
            assert!(fly.current_progress() >= target);
        }
    }

    #[test]
    fn scrolling_to_the_end_reaches_last_picture() {
        let mut fly = flythrough();
        let _ = fly.on_scroll(6_000.0);
        assert_eq!(fly.target_progress(), 6.0);

        let mut camera = RecordingCamera::default();
        for _ in 0..1_000 {
            let _ = fly.drive(&mut camera);
        }
        assert_eq!(fly.current_progress(), 6.0);
        assert!((fly.path().orbit_angle(6.0) - FRAC_PI_2).abs() < 1e-6);

        let last = camera.poses.last().unwrap();
        assert_eq!(*last, fly.path().pose(6.0));
        assert!((last.target.x + 1.814).abs() < 1e-5);
        assert!((last.target.z - 10.0).abs() < 1e-5);
        assert_eq!(camera.poses.len(), 1_000);
    }

    #[test]
    fn reset_returns_to_entrance() {
        let mut fly = flythrough();
        let _ = fly.on_scroll(2_000.0);
        let _ = fly.on_frame_tick();
        fly.reset();
        assert_eq!(fly.current_progress(), 0.0);
        assert_eq!(fly.on_frame_tick(), fly.path().pose(0.0));
    }

    #[test]
    fn rejects_bad_smoothing() {
        let path = FlightPath::from_options(&Options::default()).unwrap();
        for bad in [0.0, 1.0, -0.5, 1.5, f32::NAN] {
            assert!(matches!(
                Flythrough::new(path.clone(), bad, 0.001),
                Err(ConfigError::SmoothFactorOutOfRange(_))
            ));
        }
        assert!(matches!(
            Flythrough::new(path, 0.05, 0.0),
            Err(ConfigError::InvalidScrollSensitivity(_))
        ));
    }
}
