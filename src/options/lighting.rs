use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of point lights the shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 4;

/// An omnidirectional light with no falloff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PointLightOptions {
    /// World-space position.
    pub position: [f32; 3],
    /// Scalar intensity multiplier.
    pub intensity: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Hemispheric ambient, one directional key light and a few point lights.
pub struct LightingOptions {
    /// Hemispheric ambient intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.5), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Ambient color for up-facing surfaces.
    #[schemars(skip)]
    pub sky_color: [f32; 3],
    /// Ambient color for down-facing surfaces.
    #[schemars(skip)]
    pub ground_color: [f32; 3],
    /// Direction the key light travels in.
    #[schemars(skip)]
    pub key_direction: [f32; 3],
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Key light color.
    #[schemars(skip)]
    pub key_color: [f32; 3],
    /// Atmospheric point lights; entries past the shader limit are ignored.
    #[schemars(skip)]
    pub point_lights: Vec<PointLightOptions>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        // Side lights sit a third of the default 20x50 nave off center.
        let side_x = 20.0 / 3.0;
        let side_z = 50.0 / 3.0;
        Self {
            ambient_intensity: 0.5,
            sky_color: [0.8, 0.8, 0.9],
            ground_color: [0.3, 0.3, 0.4],
            key_direction: [-1.0, -2.0, 1.0],
            key_intensity: 0.6,
            key_color: [1.0, 0.95, 0.8],
            point_lights: vec![
                PointLightOptions {
                    position: [0.0, 15.0, 0.0],
                    intensity: 0.3,
                    color: [1.0, 0.9, 0.7],
                },
                PointLightOptions {
                    position: [-side_x, 8.0, -side_z],
                    intensity: 0.2,
                    color: [0.9, 0.8, 1.0],
                },
                PointLightOptions {
                    position: [side_x, 8.0, side_z],
                    intensity: 0.2,
                    color: [1.0, 0.8, 0.9],
                },
            ],
        }
    }
}
