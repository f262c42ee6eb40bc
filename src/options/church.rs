use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Church", inline)]
#[serde(default)]
/// Cathedral shell dimensions in world units.
pub struct ChurchOptions {
    /// Interior width along X.
    pub width: f32,
    /// Wall height.
    pub height: f32,
    /// Interior depth along Z.
    pub depth: f32,
    /// Height of the nave pillars.
    pub nave_height: f32,
    /// Side aisle width; the pillar rows sit one unit inside it.
    pub aisle_width: f32,
    /// Thickness of the outer walls.
    pub wall_thickness: f32,
    /// Pillars per side before the picture zone is cut out.
    pub pillar_count: u32,
    /// Open z interval kept free of pillars, arches and vaults so the
    /// picture arc has room.
    #[schemars(skip)]
    pub picture_zone: [f32; 2],
}

impl Default for ChurchOptions {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 18.0,
            depth: 50.0,
            nave_height: 12.0,
            aisle_width: 5.0,
            wall_thickness: 0.5,
            pillar_count: 6,
            picture_zone: [7.0, 23.0],
        }
    }
}

impl ChurchOptions {
    /// Z of the entrance viewpoint, five units inside the front wall.
    #[must_use]
    pub fn entrance_z(&self) -> f32 {
        self.depth / 2.0 - 5.0
    }

    /// Z of the center of the picture arc, ten units past the entrance.
    #[must_use]
    pub fn arc_center_z(&self) -> f32 {
        self.entrance_z() - 10.0
    }

    /// Spacing between consecutive pillars along the nave.
    #[must_use]
    pub fn pillar_spacing(&self) -> f32 {
        self.depth / (self.pillar_count as f32 + 1.0)
    }

    /// Distance of the pillar rows from the center line.
    #[must_use]
    pub fn pillar_offset(&self) -> f32 {
        self.aisle_width + 1.0
    }

    /// Whether `z` falls strictly inside the picture zone.
    #[must_use]
    pub fn in_picture_zone(&self, z: f32) -> bool {
        z > self.picture_zone[0] && z < self.picture_zone[1]
    }

    /// Z of pillar `i` (zero-based) along the nave.
    #[must_use]
    pub fn pillar_z(&self, i: u32) -> f32 {
        -self.depth / 2.0 + self.pillar_spacing() * (i as f32 + 1.0)
    }
}
