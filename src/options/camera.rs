use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Fly-through path, smoothing and projection parameters.
pub struct CameraOptions {
    /// Eye height at the entrance, where the fly-through starts.
    #[schemars(title = "Start Height", range(min = 0.5, max = 5.0))]
    pub start_y: f32,
    /// X coordinate the approach phase ends at, facing the first picture.
    #[schemars(skip)]
    pub mid_x: f32,
    /// X coordinate the zoom phase dollies toward.
    #[schemars(skip)]
    pub zoomed_x: f32,
    /// Distance kept from the current picture while sliding along the arc.
    #[schemars(title = "Zoomed Radius", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub zoomed_radius: f32,
    /// Radius of the small circle the look-at anchor follows on the arc.
    #[schemars(skip)]
    pub orbit_radius: f32,
    /// Fraction of the remaining distance covered each frame.
    #[schemars(title = "Smoothing", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub smooth_factor: f32,
    /// Progress units per scrolled pixel.
    #[schemars(title = "Scroll Sensitivity", range(min = 0.0001, max = 0.01))]
    pub scroll_sensitivity: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance between the eye and the look-at target.
    #[schemars(skip)]
    pub arc_radius: f32,
    /// Pixels of mouse drag per radian of look-around.
    #[schemars(title = "Look Sensitivity", range(min = 100.0, max = 2000.0))]
    pub angular_sensibility: f32,
    /// Closest the pitch may come to straight up or down, in radians.
    #[schemars(skip)]
    pub pitch_margin: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            start_y: 1.7,
            mid_x: -5.0,
            zoomed_x: 2.0,
            zoomed_radius: 1.5,
            orbit_radius: 0.314,
            smooth_factor: 0.05,
            scroll_sensitivity: 0.001,
            fovy: 45.8,
            znear: 0.05,
            zfar: 200.0,
            arc_radius: 0.1,
            angular_sensibility: 500.0,
            pitch_margin: 0.3,
        }
    }
}
