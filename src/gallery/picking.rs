//! Screen-space ray casting against placard quads.

use glam::{Mat4, Vec2, Vec3};

use super::pictures::{Placard, PLACARD_HEIGHT, PLACARD_WIDTH};

/// Half-line from the eye through a screen pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point, on the near plane.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray through pixel `screen` of a `viewport`-sized surface, by
    /// unprojecting the near and far plane points through the inverse of
    /// `view_proj` (`[0, 1]` depth range).
    ///
    /// Returns `None` for an empty viewport or a degenerate matrix.
    #[must_use]
    pub fn from_screen(screen: Vec2, viewport: Vec2, view_proj: Mat4) -> Option<Self> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let inverse = view_proj.inverse();
        if !inverse.is_finite() {
            return None;
        }
        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let direction = (far - near).try_normalize()?;
        Some(Self {
            origin: near,
            direction,
        })
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the hit on a `width` x `height` quad centered on the
    /// local origin in the XY plane and placed by `model`. Both faces count.
    #[must_use]
    pub fn intersect_quad(&self, model: &Mat4, width: f32, height: f32) -> Option<f32> {
        let inverse = model.inverse();
        let origin = inverse.transform_point3(self.origin);
        let direction = inverse.transform_vector3(self.direction);
        if direction.z.abs() < 1e-6 {
            return None;
        }
        let t_local = -origin.z / direction.z;
        if t_local <= 0.0 {
            return None;
        }
        let hit = origin + direction * t_local;
        if hit.x.abs() > width / 2.0 || hit.y.abs() > height / 2.0 {
            return None;
        }
        let world_hit = model.transform_point3(hit);
        Some((world_hit - self.origin).length())
    }
}

/// Index (into `placards`) of the nearest placard the ray hits.
#[must_use]
pub fn pick_placard(ray: &Ray, placards: &[Placard]) -> Option<usize> {
    placards
        .iter()
        .enumerate()
        .filter_map(|(i, placard)| {
            ray.intersect_quad(&placard.model(), PLACARD_WIDTH, PLACARD_HEIGHT)
                .map(|t| (i, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
