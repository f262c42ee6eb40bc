use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec2, Vec3};

use super::flythrough::CameraHandle;
use super::path::Pose;
use crate::error::ConfigError;
use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
///
/// The scene is authored in a left-handed frame (+Y up, +Z into the
/// screen at the start heading), so view and projection use the `_lh`
/// builders.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix (`[0,1]` depth range).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_lh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position (w unused).
    pub position: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.extend(1.0).to_array();
    }
}

/// Arc-rotate camera: the eye sits on a tiny sphere around the look-at
/// target, placed by heading `alpha` and pitch `beta`.
///
/// The fly-through owns the target and heading through [`CameraHandle`];
/// mouse look only changes the pitch for longer than one frame.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Projection state handed to the renderer.
    pub camera: Camera,
    alpha: f32,
    beta: f32,
    radius: f32,
    min_beta: f32,
    max_beta: f32,
    angular_sensibility: f32,
}

impl OrbitCamera {
    /// Camera looking down -Z from `target`, level pitch.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PitchMarginOutOfRange`] unless `pitch_margin` lies in
    /// `[0, π/2)`, and [`ConfigError::NonPositive`] for an
    /// `angular_sensibility` or `arc_radius` that is not finite and
    /// positive.
    pub fn new(
        options: &CameraOptions,
        aspect: f32,
        target: Vec3,
    ) -> Result<Self, ConfigError> {
        let margin = options.pitch_margin;
        if !(margin.is_finite() && (0.0..FRAC_PI_2).contains(&margin)) {
            return Err(ConfigError::PitchMarginOutOfRange(margin));
        }
        for (field, value) in [
            ("angular_sensibility", options.angular_sensibility),
            ("arc_radius", options.arc_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let mut orbit = Self {
            camera: Camera {
                eye: target,
                target,
                up: Vec3::Y,
                aspect,
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
            },
            alpha: FRAC_PI_2,
            beta: FRAC_PI_2,
            radius: options.arc_radius,
            min_beta: margin,
            max_beta: PI - margin,
            angular_sensibility: options.angular_sensibility,
        };
        orbit.update_eye();
        Ok(orbit)
    }

    /// Heading angle around the Y axis.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Pitch angle measured from +Y.
    #[must_use]
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Mouse-drag look-around, `delta` in pixels.
    pub fn look(&mut self, delta: Vec2) {
        self.alpha -= delta.x / self.angular_sensibility;
        self.beta = (self.beta - delta.y / self.angular_sensibility)
            .clamp(self.min_beta, self.max_beta);
        self.update_eye();
    }

    fn update_eye(&mut self) {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        let offset = Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b);
        self.camera.eye = self.camera.target + offset * self.radius;
    }
}

impl CameraHandle for OrbitCamera {
    fn set_pose(&mut self, pose: &Pose) {
        self.camera.target = pose.target;
        self.alpha = pose.alpha;
        self.update_eye();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> OrbitCamera {
        OrbitCamera::new(&CameraOptions::default(), 1.5, Vec3::ZERO).unwrap()
    }

    #[test]
    fn start_heading_looks_down_negative_z() {
        let cam = orbit();
        let forward = cam.camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
        assert!((cam.camera.eye.length() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn pose_moves_target_and_heading() {
        let mut cam = orbit();
        cam.set_pose(&Pose {
            target: Vec3::new(-5.0, 2.5, 10.0),
            alpha: PI,
        });
        assert_eq!(cam.camera.target, Vec3::new(-5.0, 2.5, 10.0));
        // Heading pi puts the eye on -X, looking toward +X.
        assert!((cam.camera.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn look_clamps_pitch() {
        let mut cam = orbit();
        cam.look(Vec2::new(0.0, 10_000.0));
        assert!((cam.beta() - 0.3).abs() < 1e-6);
        cam.look(Vec2::new(0.0, -10_000.0));
        assert!((cam.beta() - (PI - 0.3)).abs() < 1e-6);
    }

    #[test]
    fn rejects_pitch_margins_that_close_the_range() {
        let mut options = CameraOptions::default();
        for margin in [FRAC_PI_2, 2.0, -0.1, f32::NAN] {
            options.pitch_margin = margin;
            assert!(matches!(
                OrbitCamera::new(&options, 1.5, Vec3::ZERO),
                Err(ConfigError::PitchMarginOutOfRange(_))
            ));
        }
        options.pitch_margin = 0.0;
        let mut cam = OrbitCamera::new(&options, 1.5, Vec3::ZERO).unwrap();
        cam.look(Vec2::new(0.0, 10_000.0));
        assert_eq!(cam.beta(), 0.0);
    }

    #[test]
    fn rejects_non_positive_look_sensitivity() {
        let mut options = CameraOptions::default();
        for value in [0.0, -500.0, f32::INFINITY] {
            options.angular_sensibility = value;
            assert!(matches!(
                OrbitCamera::new(&options, 1.5, Vec3::ZERO),
                Err(ConfigError::NonPositive { field: "angular_sensibility", .. })
            ));
        }
    }

    #[test]
    fn uniform_tracks_eye() {
        let cam = orbit();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam.camera);
        assert_eq!(uniform.position[3], 1.0);
        assert!((uniform.position[2] - 0.1).abs() < 1e-6);
    }
}
