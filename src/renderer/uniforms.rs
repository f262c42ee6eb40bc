//! GPU uniform layouts for the gallery pipelines.

use glam::{Mat4, Vec3};

use crate::options::{AtmosphereOptions, LightingOptions, MAX_POINT_LIGHTS};
use crate::scene::{Material, TextureSlot};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Fog and light rig, shared by every draw.
pub struct AtmosphereUniform {
    /// Fog color (rgb) and exponential-squared density (w).
    pub fog: [f32; 4],
    /// Hemispheric sky color (rgb) and intensity (w).
    pub sky: [f32; 4],
    /// Hemispheric ground color (rgb, w unused).
    pub ground: [f32; 4],
    /// Direction the key light travels, normalized (w unused).
    pub key_direction: [f32; 4],
    /// Key light color (rgb) and intensity (w).
    pub key_color: [f32; 4],
    /// Point light positions (xyz) and intensity (w; 0 disables).
    pub point_positions: [[f32; 4]; MAX_POINT_LIGHTS],
    /// Point light colors (rgb, w unused).
    pub point_colors: [[f32; 4]; MAX_POINT_LIGHTS],
}

impl AtmosphereUniform {
    /// Pack fog and lights. Point lights beyond [`MAX_POINT_LIGHTS`] are
    /// dropped.
    #[must_use]
    pub fn new(atmosphere: &AtmosphereOptions, lighting: &LightingOptions) -> Self {
        if lighting.point_lights.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights configured, only {MAX_POINT_LIGHTS} are used",
                lighting.point_lights.len()
            );
        }
        let mut point_positions = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut point_colors = [[0.0; 4]; MAX_POINT_LIGHTS];
        for (i, light) in lighting.point_lights.iter().take(MAX_POINT_LIGHTS).enumerate() {
            point_positions[i] = Vec3::from(light.position).extend(light.intensity).to_array();
            point_colors[i] = Vec3::from(light.color).extend(0.0).to_array();
        }
        Self {
            fog: Vec3::from(atmosphere.fog_color)
                .extend(atmosphere.fog_density)
                .to_array(),
            sky: Vec3::from(lighting.sky_color)
                .extend(lighting.ambient_intensity)
                .to_array(),
            ground: Vec3::from(lighting.ground_color).extend(0.0).to_array(),
            key_direction: Vec3::from(lighting.key_direction)
                .normalize_or_zero()
                .extend(0.0)
                .to_array(),
            key_color: Vec3::from(lighting.key_color)
                .extend(lighting.key_intensity)
                .to_array(),
            point_positions,
            point_colors,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Per-draw transform and material.
pub struct ObjectUniform {
    /// Local-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model` for normals.
    pub normal_matrix: [[f32; 4]; 4],
    /// Diffuse color (rgb) and opacity (w).
    pub diffuse: [f32; 4],
    /// Emissive color (rgb, w unused).
    pub emissive: [f32; 4],
    /// Texture mode (x: 0 flat, 1 glyph rain, 2 label) and uv scale (y).
    pub texture: [f32; 4],
}

impl ObjectUniform {
    /// Pack one object's transform with its material.
    #[must_use]
    pub fn new(model: Mat4, material: &Material) -> Self {
        let (mode, uv_scale) = match material.texture {
            TextureSlot::None => (0.0, 1.0),
            TextureSlot::Glyph { uv_scale } => (1.0, uv_scale),
            TextureSlot::Label => (2.0, 1.0),
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            diffuse: material.diffuse.extend(material.alpha).to_array(),
            emissive: material.emissive.extend(0.0).to_array(),
            texture: [mode, uv_scale, 0.0, 0.0],
        }
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, &Material::flat("default", Vec3::ONE))
    }
}
