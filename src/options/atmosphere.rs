use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Atmosphere", inline)]
#[serde(default)]
/// Background color and squared-exponential fog.
pub struct AtmosphereOptions {
    /// Clear color behind all geometry.
    #[schemars(skip)]
    pub clear_color: [f32; 3],
    /// Fog density for `exp(-(d * density)^2)` falloff.
    #[schemars(title = "Fog Density", range(min = 0.0, max = 0.1), extend("step" = 0.005))]
    pub fog_density: f32,
    /// Fog color.
    #[schemars(skip)]
    pub fog_color: [f32; 3],
}

impl Default for AtmosphereOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.05, 0.05, 0.1],
            fog_density: 0.02,
            fog_color: [0.1, 0.1, 0.15],
        }
    }
}
