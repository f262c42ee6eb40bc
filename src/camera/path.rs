//! The scripted fly-through as a pure function of scroll progress.
//!
//! Progress `0..=1` flies from the entrance to the first picture, `1..=2`
//! dollies in, and everything past `2` slides along the picture arc, one
//! unit per picture gap.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::error::ConfigError;
use crate::options::Options;

/// Camera look-at target plus arc-rotate heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space point the camera looks at.
    pub target: Vec3,
    /// Heading around +Y; `π/2` looks down -Z.
    pub alpha: f32,
}

/// Which leg of the fly-through a progress value falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    /// Entrance to the first picture, turning a quarter turn.
    Approach,
    /// Straight dolly toward the zoomed-in x coordinate.
    Zoom,
    /// Sweep across the picture arc.
    Orbit,
}

impl FlightPhase {
    /// Classify a progress value. Boundaries belong to the earlier phase.
    #[must_use]
    pub fn of(progress: f32) -> Self {
        if progress <= 1.0 {
            Self::Approach
        } else if progress <= 2.0 {
            Self::Zoom
        } else {
            Self::Orbit
        }
    }
}

/// Validated geometry of the fly-through.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    start: Vec3,
    mid: Vec3,
    zoomed_x: f32,
    zoomed_radius: f32,
    orbit_radius: f32,
    arc_center: Vec3,
    picture_count: usize,
}

fn require_finite(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl FlightPath {
    /// Build a path from explicit waypoints.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooFewPictures`] for fewer than two pictures,
    /// [`ConfigError::NonFinite`] for a waypoint or zoom target with a NaN
    /// or infinite coordinate, and [`ConfigError::NonPositive`] for a
    /// non-positive zoom or orbit radius.
    pub fn new(
        start: Vec3,
        mid: Vec3,
        zoomed_x: f32,
        zoomed_radius: f32,
        orbit_radius: f32,
        arc_center: Vec3,
        picture_count: usize,
    ) -> Result<Self, ConfigError> {
        if picture_count < 2 {
            return Err(ConfigError::TooFewPictures(picture_count));
        }
        require_finite("start", start)?;
        require_finite("mid", mid)?;
        require_finite("arc_center", arc_center)?;
        if !zoomed_x.is_finite() {
            return Err(ConfigError::NonFinite { field: "zoomed_x" });
        }
        require_positive("zoomed_radius", zoomed_radius)?;
        require_positive("orbit_radius", orbit_radius)?;
        Ok(Self {
            start,
            mid,
            zoomed_x,
            zoomed_radius,
            orbit_radius,
            arc_center,
            picture_count,
        })
    }

    /// Derive the path from the church layout and camera options.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`FlightPath::new`].
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let church = &options.church;
        let camera = &options.camera;
        let height = options.pictures.height;
        let arc_center = Vec3::new(0.0, height, church.arc_center_z());
        Self::new(
            Vec3::new(0.0, camera.start_y, church.entrance_z()),
            Vec3::new(camera.mid_x, height, arc_center.z),
            camera.zoomed_x,
            camera.zoomed_radius,
            camera.orbit_radius,
            arc_center,
            options.pictures.count(),
        )
    }

    /// Number of pictures the orbit phase sweeps across.
    #[must_use]
    pub fn picture_count(&self) -> usize {
        self.picture_count
    }

    /// Total traversable progress: two legs plus one unit per picture gap.
    #[must_use]
    pub fn max_progress(&self) -> f32 {
        2.0 + (self.picture_count - 1) as f32
    }

    /// Entrance waypoint.
    #[must_use]
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// End of the approach leg.
    #[must_use]
    pub fn mid(&self) -> Vec3 {
        self.mid
    }

    /// Arc angle for an orbit-phase progress, `-π/2` at the first picture
    /// and `π/2` at the last.
    #[must_use]
    pub fn orbit_angle(&self, progress: f32) -> f32 {
        let t = (progress - 2.0) / (self.picture_count - 1) as f32;
        -FRAC_PI_2 + t * PI
    }

    /// Camera pose for `progress`, clamped to `[0, max_progress]`.
    #[must_use]
    pub fn pose(&self, progress: f32) -> Pose {
        let progress = progress.clamp(0.0, self.max_progress());
        match FlightPhase::of(progress) {
            FlightPhase::Approach => Pose {
                target: self.start.lerp(self.mid, progress),
                alpha: FRAC_PI_2 + FRAC_PI_2 * progress,
            },
            FlightPhase::Zoom => {
                let t = progress - 1.0;
                Pose {
                    target: Vec3::new(
                        self.mid.x + (self.zoomed_x - self.mid.x) * t,
                        self.mid.y,
                        self.mid.z,
                    ),
                    alpha: PI,
                }
            }
            FlightPhase::Orbit => {
                let angle = self.orbit_angle(progress);
                let (sin, cos) = angle.sin_cos();
                let anchor_x = -self.orbit_radius * sin;
                let anchor_z = self.arc_center.z + self.orbit_radius * cos;
                Pose {
                    target: Vec3::new(
                        anchor_x - self.zoomed_radius * sin,
                        self.arc_center.y,
                        anchor_z + self.zoomed_radius * cos,
                    ),
                    alpha: FRAC_PI_2 - angle,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn path() -> FlightPath {
        FlightPath::from_options(&Options::default()).unwrap()
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn default_waypoints() {
        let p = path();
        assert_eq!(p.start(), Vec3::new(0.0, 1.7, 20.0));
        assert_eq!(p.mid(), Vec3::new(-5.0, 2.5, 10.0));
        assert_eq!(p.max_progress(), 6.0);
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(FlightPhase::of(0.0), FlightPhase::Approach);
        assert_eq!(FlightPhase::of(1.0), FlightPhase::Approach);
        assert_eq!(FlightPhase::of(1.5), FlightPhase::Zoom);
        assert_eq!(FlightPhase::of(2.0), FlightPhase::Zoom);
        assert_eq!(FlightPhase::of(2.001), FlightPhase::Orbit);
    }

    #[test]
    fn pose_at_start() {
        let p = path();
        let pose = p.pose(0.0);
        assert!(close(pose.target, p.start()));
        assert!((pose.alpha - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn pose_at_end_of_approach() {
        let p = path();
        let pose = p.pose(1.0);
        assert!(close(pose.target, p.mid()));
        assert!((pose.alpha - PI).abs() < EPS);
    }

    #[test]
    fn pose_halfway_through_approach() {
        let p = path();
        let pose = p.pose(0.5);
        assert!(close(pose.target, Vec3::new(-2.5, 2.1, 15.0)));
        assert!((pose.alpha - 0.75 * PI).abs() < EPS);
    }

    #[test]
    fn pose_at_end_of_zoom() {
        let p = path();
        let pose = p.pose(2.0);
        assert!((pose.target.x - 2.0).abs() < EPS);
        assert_eq!(pose.target.y, 2.5);
        assert_eq!(pose.target.z, 10.0);
        assert!((pose.alpha - PI).abs() < EPS);
    }

    #[test]
    fn orbit_sweeps_half_turn() {
        let p = path();
        assert!((p.orbit_angle(2.0) + FRAC_PI_2).abs() < EPS);
        assert!(p.orbit_angle(4.0).abs() < EPS);
        assert!((p.orbit_angle(p.max_progress()) - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn pose_at_last_picture() {
        let p = path();
        let pose = p.pose(6.0);
        // Anchor at (-0.314, 2.5, 10); camera pushed a further 1.5 along -X.
        assert!(close(pose.target, Vec3::new(-1.814, 2.5, 10.0)));
        assert!(pose.alpha.abs() < EPS);
    }

    #[test]
    fn pose_at_middle_picture_faces_back_wall() {
        let p = path();
        let pose = p.pose(4.0);
        // theta = 0: anchor (0, 2.5, 10.314), camera 1.5 further toward +Z.
        assert!(close(pose.target, Vec3::new(0.0, 2.5, 11.814)));
        assert!((pose.alpha - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn pose_clamps_out_of_range_progress() {
        let p = path();
        assert_eq!(p.pose(-3.0), p.pose(0.0));
        assert_eq!(p.pose(99.0), p.pose(6.0));
    }

    #[test]
    fn rejects_single_picture() {
        let mut options = Options::default();
        options.pictures.entries.truncate(1);
        assert_eq!(
            FlightPath::from_options(&options),
            Err(ConfigError::TooFewPictures(1))
        );
    }

    #[test]
    fn two_pictures_sweep_in_one_unit() {
        let mut options = Options::default();
        options.pictures.entries.truncate(2);
        let p = FlightPath::from_options(&options).unwrap();
        assert_eq!(p.picture_count(), 2);
        assert_eq!(p.max_progress(), 3.0);
        assert!((p.orbit_angle(2.0) + FRAC_PI_2).abs() < EPS);
        assert!(p.orbit_angle(2.5).abs() < EPS);
        assert!((p.orbit_angle(3.0) - FRAC_PI_2).abs() < EPS);
        // Same end pose as the five-picture arc, reached one unit past zoom.
        assert!(close(p.pose(3.0).target, Vec3::new(-1.814, 2.5, 10.0)));
        assert_eq!(p.pose(10.0), p.pose(3.0));
    }

    #[test]
    fn rejects_non_finite_waypoints() {
        let mut options = Options::default();
        options.camera.zoomed_x = f32::NAN;
        assert_eq!(
            FlightPath::from_options(&options),
            Err(ConfigError::NonFinite { field: "zoomed_x" })
        );

        let mut options = Options::default();
        options.camera.start_y = f32::INFINITY;
        assert_eq!(
            FlightPath::from_options(&options),
            Err(ConfigError::NonFinite { field: "start" })
        );

        let mut options = Options::default();
        options.camera.mid_x = f32::NAN;
        assert_eq!(
            FlightPath::from_options(&options),
            Err(ConfigError::NonFinite { field: "mid" })
        );
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut options = Options::default();
        options.camera.zoomed_radius = 0.0;
        assert!(matches!(
            FlightPath::from_options(&options),
            Err(ConfigError::NonPositive {
                field: "zoomed_radius",
                ..
            })
        ));
    }
}
