//! Picture arc layout and clickable placards.
//!
//! Pictures hang on a half circle in front of the entrance, facing its
//! center. Each has a small label placard 1.5 units in front of it and
//! 1.5 units lower, turned to face the picture's viewer.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

use crate::options::Options;
use crate::util::smoothing::approach;

/// Distance from a picture to its placard, toward the arc center.
pub const PLACARD_OFFSET: f32 = 1.5;
/// Placard drop below the picture center.
pub const PLACARD_DROP: f32 = 1.5;
/// Placard quad width.
pub const PLACARD_WIDTH: f32 = 1.2;
/// Placard quad height.
pub const PLACARD_HEIGHT: f32 = 0.3;

const HOVER_SCALE: f32 = 1.15;
const REST_EMISSIVE: f32 = 0.5;
const HOVER_EMISSIVE: f32 = 1.0;
const HOVER_RATE: f32 = 0.1;

/// Where one picture hangs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PicturePlacement {
    /// Position in the metadata table.
    pub index: usize,
    /// Angle on the arc, `-π/2` for the first picture, `π/2` for the last.
    pub angle: f32,
    /// Center of the picture quad.
    pub position: Vec3,
    /// Rotation about +Y.
    pub yaw: f32,
    /// Quad width.
    pub width: f32,
    /// Quad height.
    pub height: f32,
}

impl PicturePlacement {
    /// World transform of the unit-facing picture quad.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

/// Lay every configured picture out on the arc.
///
/// A single picture hangs at the left end of the arc.
#[must_use]
pub fn layout(options: &Options) -> Vec<PicturePlacement> {
    let pictures = &options.pictures;
    let count = pictures.count();
    let center_z = options.church.arc_center_z();
    (0..count)
        .map(|index| {
            let t = if count > 1 {
                index as f32 / (count - 1) as f32
            } else {
                0.0
            };
            let angle = -FRAC_PI_2 + t * PI;
            let (sin, cos) = angle.sin_cos();
            PicturePlacement {
                index,
                angle,
                position: Vec3::new(
                    sin * pictures.radius,
                    pictures.height,
                    center_z - cos * pictures.radius,
                ),
                yaw: -angle,
                width: pictures.width,
                height: pictures.image_height,
            }
        })
        .collect()
}

/// Eased hover feedback: the placard grows and glows while pointed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverAnim {
    scale: f32,
    emissive: f32,
    hovered: bool,
}

impl Default for HoverAnim {
    fn default() -> Self {
        Self {
            scale: 1.0,
            emissive: REST_EMISSIVE,
            hovered: false,
        }
    }
}

impl HoverAnim {
    /// Set whether the pointer is over the placard.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Whether the pointer is over the placard.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Ease scale and glow one frame toward their targets.
    pub fn on_frame_tick(&mut self) {
        let (scale, emissive) = if self.hovered {
            (HOVER_SCALE, HOVER_EMISSIVE)
        } else {
            (1.0, REST_EMISSIVE)
        };
        self.scale = approach(self.scale, scale, HOVER_RATE);
        self.emissive = approach(self.emissive, emissive, HOVER_RATE);
    }

    /// Uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Green emissive strength.
    #[must_use]
    pub fn emissive(&self) -> f32 {
        self.emissive
    }
}

/// Clickable label in front of a picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Placard {
    /// Picture this placard opens.
    pub index: usize,
    /// Center of the quad.
    pub center: Vec3,
    /// Rotation about +Y.
    pub yaw: f32,
    /// Hover animation state.
    pub hover: HoverAnim,
}

impl Placard {
    /// Placard for `picture`, pulled toward the arc center.
    #[must_use]
    pub fn for_picture(picture: &PicturePlacement) -> Self {
        let (sin, cos) = picture.angle.sin_cos();
        Self {
            index: picture.index,
            center: Vec3::new(
                picture.position.x - sin * PLACARD_OFFSET,
                picture.position.y - PLACARD_DROP,
                picture.position.z + cos * PLACARD_OFFSET,
            ),
            yaw: picture.yaw + PI,
            hover: HoverAnim::default(),
        }
    }

    /// World transform including the hover scale.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.hover.scale()),
            Quat::from_rotation_y(self.yaw),
            self.center,
        )
    }
}
