//! Primitive mesh builders.
//!
//! Shapes are generated in their local frame, centered on the origin, and
//! placed with a model matrix. Conventions: planes and discs lie in XY and
//! face -Z, grounds lie in XZ and face +Y, cylinders stand along +Y, and
//! tori lie in XZ around the Y axis. Winding is not consistent across
//! builders; the gallery pipelines draw both faces.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate, v = 0 at the top edge.
    pub uv: [f32; 2],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl Mesh {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
            uv: uv.to_array(),
        });
        index
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned box of the given full extents.
    #[must_use]
    pub fn cuboid(size: Vec3) -> Self {
        let half = size / 2.0;
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            let center = normal * half;
            let u_half = u * half;
            let v_half = v * half;
            let corner = |su: f32, sv: f32| center + u_half * su + v_half * sv;
            let a = mesh.push(corner(-1.0, 1.0), normal, Vec2::new(0.0, 0.0));
            let b = mesh.push(corner(1.0, 1.0), normal, Vec2::new(1.0, 0.0));
            let c = mesh.push(corner(1.0, -1.0), normal, Vec2::new(1.0, 1.0));
            let d = mesh.push(corner(-1.0, -1.0), normal, Vec2::new(0.0, 1.0));
            mesh.quad(a, b, c, d);
        }
        mesh
    }

    /// `width` x `height` rectangle in XY, facing -Z.
    #[must_use]
    pub fn plane(width: f32, height: f32) -> Self {
        let (w, h) = (width / 2.0, height / 2.0);
        let mut mesh = Self::default();
        let a = mesh.push(Vec3::new(-w, h, 0.0), Vec3::NEG_Z, Vec2::new(0.0, 0.0));
        let b = mesh.push(Vec3::new(w, h, 0.0), Vec3::NEG_Z, Vec2::new(1.0, 0.0));
        let c = mesh.push(Vec3::new(w, -h, 0.0), Vec3::NEG_Z, Vec2::new(1.0, 1.0));
        let d = mesh.push(Vec3::new(-w, -h, 0.0), Vec3::NEG_Z, Vec2::new(0.0, 1.0));
        mesh.quad(a, b, c, d);
        mesh
    }

    /// `width` x `depth` rectangle in XZ, facing +Y.
    #[must_use]
    pub fn ground(width: f32, depth: f32) -> Self {
        let (w, d) = (width / 2.0, depth / 2.0);
        let mut mesh = Self::default();
        let a = mesh.push(Vec3::new(-w, 0.0, d), Vec3::Y, Vec2::new(0.0, 0.0));
        let b = mesh.push(Vec3::new(w, 0.0, d), Vec3::Y, Vec2::new(1.0, 0.0));
        let c = mesh.push(Vec3::new(w, 0.0, -d), Vec3::Y, Vec2::new(1.0, 1.0));
        let e = mesh.push(Vec3::new(-w, 0.0, -d), Vec3::Y, Vec2::new(0.0, 1.0));
        mesh.quad(a, b, c, e);
        mesh
    }

    /// Capped (possibly tapered) cylinder standing on the Y axis, centered
    /// at half height.
    #[must_use]
    pub fn cylinder(
        diameter_top: f32,
        diameter_bottom: f32,
        height: f32,
        tessellation: u32,
    ) -> Self {
        let tess = tessellation.max(3);
        let (rt, rb) = (diameter_top / 2.0, diameter_bottom / 2.0);
        let half = height / 2.0;
        let slope = if height > 0.0 { (rb - rt) / height } else { 0.0 };
        let mut mesh = Self::default();

        // Side wall: one top/bottom pair per step, seam duplicated for uv.
        let mut previous: Option<(u32, u32)> = None;
        for i in 0..=tess {
            let u = i as f32 / tess as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = Vec3::new(cos, slope, sin);
            let top = mesh.push(
                Vec3::new(cos * rt, half, sin * rt),
                normal,
                Vec2::new(u, 0.0),
            );
            let bottom = mesh.push(
                Vec3::new(cos * rb, -half, sin * rb),
                normal,
                Vec2::new(u, 1.0),
            );
            if let Some((pt, pb)) = previous {
                mesh.quad(pt, top, bottom, pb);
            }
            previous = Some((top, bottom));
        }

        for (y, radius, normal) in [(half, rt, Vec3::Y), (-half, rb, Vec3::NEG_Y)] {
            let center = mesh.push(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
            let first = mesh.vertices.len() as u32;
            for i in 0..=tess {
                let (sin, cos) = (i as f32 / tess as f32 * TAU).sin_cos();
                let _ = mesh.push(
                    Vec3::new(cos * radius, y, sin * radius),
                    normal,
                    Vec2::new(0.5 + cos * 0.5, 0.5 - sin * 0.5),
                );
            }
            for i in 0..tess {
                mesh.indices
                    .extend_from_slice(&[center, first + i, first + i + 1]);
            }
        }
        mesh
    }

    /// UV sphere with `segments` latitude bands and twice as many
    /// longitude steps.
    #[must_use]
    pub fn sphere(diameter: f32, segments: u32) -> Self {
        let rings = segments.max(2);
        let sectors = rings * 2;
        let radius = diameter / 2.0;
        let mut mesh = Self::default();
        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let (sin_p, cos_p) = (v * PI).sin_cos();
            for sector in 0..=sectors {
                let u = sector as f32 / sectors as f32;
                let (sin_t, cos_t) = (u * TAU).sin_cos();
                let normal = Vec3::new(sin_p * cos_t, cos_p, sin_p * sin_t);
                let _ = mesh.push(normal * radius, normal, Vec2::new(u, v));
            }
        }
        let stride = sectors + 1;
        for ring in 0..rings {
            for sector in 0..sectors {
                let a = ring * stride + sector;
                let b = a + stride;
                mesh.quad(a, a + 1, b + 1, b);
            }
        }
        mesh
    }

    /// Filled circle (or circular sector when `arc < 1`) in XY, facing -Z.
    /// The sector sweeps counterclockwise from +X.
    #[must_use]
    pub fn disc(radius: f32, tessellation: u32, arc: f32) -> Self {
        let arc = arc.clamp(0.0, 1.0);
        let steps = ((tessellation as f32 * arc).ceil() as u32).max(1);
        let mut mesh = Self::default();
        let center = mesh.push(Vec3::ZERO, Vec3::NEG_Z, Vec2::splat(0.5));
        for i in 0..=steps {
            let angle = i as f32 / steps as f32 * arc * TAU;
            let (sin, cos) = angle.sin_cos();
            let _ = mesh.push(
                Vec3::new(cos * radius, sin * radius, 0.0),
                Vec3::NEG_Z,
                Vec2::new(0.5 + cos * 0.5, 0.5 - sin * 0.5),
            );
        }
        for i in 0..steps {
            mesh.indices
                .extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
        }
        mesh
    }

    /// Ring around the Y axis: `diameter` across the tube centers, tube
    /// `thickness` across.
    #[must_use]
    pub fn torus(diameter: f32, thickness: f32, tessellation: u32) -> Self {
        let tess = tessellation.max(3);
        let ring_radius = diameter / 2.0;
        let tube_radius = thickness / 2.0;
        let mut mesh = Self::default();
        for i in 0..=tess {
            let u = i as f32 / tess as f32;
            let (sin_u, cos_u) = (u * TAU).sin_cos();
            let center = Vec3::new(cos_u * ring_radius, 0.0, sin_u * ring_radius);
            for j in 0..=tess {
                let v = j as f32 / tess as f32;
                let (sin_v, cos_v) = (v * TAU).sin_cos();
                let normal = Vec3::new(cos_v * cos_u, sin_v, cos_v * sin_u);
                let _ = mesh.push(center + normal * tube_radius, normal, Vec2::new(u, v));
            }
        }
        let stride = tess + 1;
        for i in 0..tess {
            for j in 0..tess {
                let a = i * stride + j;
                let b = a + stride;
                mesh.quad(a, b, b + 1, a + 1);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &Mesh) {
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = Mesh::cuboid(Vec3::new(2.0, 4.0, 6.0));
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let max = mesh
            .vertices
            .iter()
            .fold(Vec3::splat(f32::MIN), |m, v| m.max(Vec3::from(v.position)));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn plane_faces_negative_z() {
        let mesh = Mesh::plane(2.5, 3.0);
        assert_well_formed(&mesh);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, -1.0]));
        assert!(mesh.vertices.iter().all(|v| v.position[2] == 0.0));
        assert_eq!(mesh.vertices[0].position, [-1.25, 1.5, 0.0]);
    }

    #[test]
    fn ground_is_flat() {
        let mesh = Mesh::ground(20.0, 50.0);
        assert_well_formed(&mesh);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn cylinder_extents() {
        let mesh = Mesh::cylinder(1.8, 1.2, 0.5, 24);
        assert_well_formed(&mesh);
        // Side quads plus two fans.
        assert_eq!(mesh.triangle_count(), 24 * 2 + 24 * 2);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            assert!(p.y.abs() <= 0.25 + 1e-6);
            let r = Vec2::new(p.x, p.z).length();
            if p.y > 0.0 {
                assert!(r <= 0.9 + 1e-5);
            } else {
                assert!(r <= 0.6 + 1e-5);
            }
        }
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let mesh = Mesh::sphere(0.48, 8);
        assert_well_formed(&mesh);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 0.24).abs() < 1e-5);
        }
    }

    #[test]
    fn half_disc_stays_above_axis() {
        let mesh = Mesh::disc(1.0, 32, 0.5);
        assert_well_formed(&mesh);
        assert_eq!(mesh.triangle_count(), 16);
        assert!(mesh.vertices.iter().all(|v| v.position[1] >= -1e-6));
    }

    #[test]
    fn torus_tube_radius() {
        let mesh = Mesh::torus(6.0, 0.3, 16);
        assert_well_formed(&mesh);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let ring = Vec3::new(p.x, 0.0, p.z).normalize() * 3.0;
            assert!(((p - ring).length() - 0.15).abs() < 1e-4);
        }
    }
}
