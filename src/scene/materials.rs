//! Surface materials of the cathedral.
//!
//! Lighting follows a simple fixed-function model: the diffuse color
//! (multiplied by the bound texture, if any) is lit by the light rig, and
//! the emissive color (also multiplied by the texture) is added unlit.

use glam::Vec3;

use super::{MaterialId, Scene};

/// Which procedural texture a material samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureSlot {
    /// Flat color.
    None,
    /// The animated glyph rain, tiled `uv_scale` times per face.
    Glyph {
        /// Repetitions across each face.
        uv_scale: f32,
    },
    /// The static placard label.
    Label,
}

/// Surface description consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Debug name.
    pub name: String,
    /// Lit base color.
    pub diffuse: Vec3,
    /// Unlit added color.
    pub emissive: Vec3,
    /// Opacity; anything below 1 is drawn in the blended pass.
    pub alpha: f32,
    /// Bound texture.
    pub texture: TextureSlot,
}

impl Material {
    /// Opaque, untextured, non-emissive material.
    #[must_use]
    pub fn flat(name: &str, diffuse: Vec3) -> Self {
        Self {
            name: name.to_owned(),
            diffuse,
            emissive: Vec3::ZERO,
            alpha: 1.0,
            texture: TextureSlot::None,
        }
    }

    /// Set the emissive color.
    #[must_use]
    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Bind a texture.
    #[must_use]
    pub fn with_texture(mut self, texture: TextureSlot) -> Self {
        self.texture = texture;
        self
    }

    /// Whether the material needs alpha blending.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }
}

/// Colors of the five stained-glass panels, bottom to top.
pub const STAINED_GLASS_COLORS: [Vec3; 5] = [
    Vec3::new(0.8, 0.2, 0.2),
    Vec3::new(0.2, 0.4, 0.8),
    Vec3::new(0.9, 0.7, 0.2),
    Vec3::new(0.3, 0.7, 0.3),
    Vec3::new(0.6, 0.2, 0.6),
];

/// Stand-in colors for picture canvases, cycled by picture index.
pub const PICTURE_COLORS: [Vec3; 5] = [
    Vec3::new(0.55, 0.25, 0.2),
    Vec3::new(0.2, 0.35, 0.55),
    Vec3::new(0.6, 0.5, 0.2),
    Vec3::new(0.25, 0.45, 0.3),
    Vec3::new(0.45, 0.25, 0.5),
];

/// Materials shared by the cathedral shell.
#[derive(Debug, Clone)]
pub struct CathedralMaterials {
    /// Walls: glyph rain tiled twice, green glow.
    pub stone: MaterialId,
    /// Arches: glyph rain tiled 1.5 times, dimmer glow.
    pub dark_stone: MaterialId,
    /// Floor.
    pub floor: MaterialId,
    /// Pillars and capitals.
    pub pillar: MaterialId,
    /// Vault panels.
    pub ceiling: MaterialId,
    /// Big window frames.
    pub window_frame: MaterialId,
    /// Big window panes.
    pub landscape: MaterialId,
    /// Stained-glass panels, bottom to top.
    pub stained_glass: [MaterialId; 5],
    /// Half-disc atop each stained-glass window.
    pub glass_arch: MaterialId,
    /// Rose window disc.
    pub rose_window: MaterialId,
    /// Rose window rings, innermost last.
    pub rose_rings: [MaterialId; 3],
}

impl CathedralMaterials {
    /// Create every shell material in `scene`.
    pub fn register(scene: &mut Scene) -> Self {
        let stone = scene.add_material(
            Material::flat("stone", Vec3::ONE)
                .with_emissive(Vec3::new(0.3, 0.8, 0.3))
                .with_texture(TextureSlot::Glyph { uv_scale: 2.0 }),
        );
        let dark_stone = scene.add_material(
            Material::flat("dark_stone", Vec3::ONE)
                .with_emissive(Vec3::new(0.2, 0.6, 0.2))
                .with_texture(TextureSlot::Glyph { uv_scale: 1.5 }),
        );
        let floor = scene.add_material(
            Material::flat("floor", Vec3::new(0.45, 0.3, 0.18))
                .with_emissive(Vec3::splat(0.1)),
        );
        let pillar = scene.add_material(Material::flat("pillar", Vec3::splat(0.92)));
        let ceiling = scene.add_material(Material::flat("ceiling", Vec3::splat(0.9)));
        let window_frame = scene
            .add_material(Material::flat("window_frame", Vec3::new(0.25, 0.2, 0.15)));
        let landscape = scene.add_material(
            Material::flat("landscape", Vec3::new(0.35, 0.5, 0.35))
                .with_emissive(Vec3::splat(0.6)),
        );
        let stained_glass = STAINED_GLASS_COLORS.map(|color| {
            scene.add_material(
                Material::flat("stained_glass", color)
                    .with_emissive(color * 0.5)
                    .with_alpha(0.7),
            )
        });
        let glass_arch = scene.add_material(
            Material::flat("glass_arch", Vec3::new(0.9, 0.8, 0.3))
                .with_emissive(Vec3::new(0.5, 0.4, 0.1))
                .with_alpha(0.7),
        );
        let rose_window = scene.add_material(
            Material::flat("rose_window", Vec3::ONE)
                .with_emissive(Vec3::new(0.6, 0.3, 0.5))
                .with_alpha(0.8),
        );
        let rose_rings = [1.0_f32, 2.0, 3.0].map(|r| {
            let hue = r * 0.3;
            scene.add_material(
                Material::flat("rose_ring", Vec3::ONE)
                    .with_emissive(Vec3::new(
                        0.5 + hue * 0.3,
                        0.2 + hue * 0.2,
                        0.6 - hue * 0.2,
                    ))
                    .with_alpha(0.75),
            )
        });
        Self {
            stone,
            dark_stone,
            floor,
            pillar,
            ceiling,
            window_frame,
            landscape,
            stained_glass,
            glass_arch,
            rose_window,
            rose_rings,
        }
    }
}

/// Canvas material for picture `index`.
#[must_use]
pub fn picture_material(index: usize) -> Material {
    Material::flat(
        &format!("picture_{index}"),
        PICTURE_COLORS[index % PICTURE_COLORS.len()],
    )
    .with_emissive(Vec3::splat(0.3))
}

/// Label material for placard `index`, glowing at rest strength.
#[must_use]
pub fn placard_material(index: usize, glow: f32) -> Material {
    Material::flat(&format!("placard_{index}"), Vec3::ONE)
        .with_emissive(Vec3::new(0.0, glow, 0.0))
        .with_texture(TextureSlot::Label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let m = Material::flat("m", Vec3::ONE)
            .with_alpha(1.5)
            .with_emissive(Vec3::X);
        assert_eq!(m.alpha, 1.0);
        assert!(!m.is_transparent());
        assert_eq!(m.emissive, Vec3::X);
        assert!(m.with_alpha(0.7).is_transparent());
    }

    #[test]
    fn shell_materials_registered() {
        let mut scene = Scene::new();
        let mats = CathedralMaterials::register(&mut scene);
        assert_eq!(scene.materials().len(), 17);
        let stone = scene.material(mats.stone).unwrap();
        assert_eq!(stone.texture, TextureSlot::Glyph { uv_scale: 2.0 });
        let ring = scene.material(mats.rose_rings[2]).unwrap();
        assert!((ring.emissive - Vec3::new(0.77, 0.38, 0.42)).length() < 1e-5);
        assert!(scene
            .material(mats.stained_glass[0])
            .unwrap()
            .is_transparent());
    }

    #[test]
    fn picture_colors_cycle() {
        assert_eq!(picture_material(0).diffuse, picture_material(5).diffuse);
        assert_eq!(placard_material(1, 0.5).emissive, Vec3::new(0.0, 0.5, 0.0));
    }
}
