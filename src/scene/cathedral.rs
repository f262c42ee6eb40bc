//! The cathedral shell: floor, walls, pillar rows, pointed arches, vault
//! panels, and three kinds of windows.
//!
//! Everything that would crowd the picture arc (pillars, arches and vaults
//! whose z falls in [`ChurchOptions::picture_zone`]) is left out.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_8, PI};

use glam::{Vec2, Vec3};

use super::materials::CathedralMaterials;
use super::mesh::Mesh;
use super::{place, transform, MaterialId, MeshId, Scene};
use crate::options::ChurchOptions;

const PILLAR_DIAMETER: f32 = 1.2;
const CAPITAL_TOP_DIAMETER: f32 = 1.8;
const CAPITAL_HEIGHT: f32 = 0.5;
const ARCH_SEGMENTS: u32 = 12;
const ARCH_RISE: f32 = 1.3;
const SPHERE_SEGMENTS: u32 = 12;

const STAINED_GLASS_Y: f32 = 13.0;
const STAINED_GLASS_SIZE: Vec2 = Vec2::new(2.0, 3.0);
const BIG_WINDOW_Y: f32 = 5.0;
const BIG_WINDOW_SIZE: Vec2 = Vec2::new(5.0, 6.0);
const WINDOW_WALL_INSET: f32 = 0.3;
const FRAME_THICKNESS: f32 = 0.25;
const FRAME_DEPTH: f32 = 0.15;
const FRAME_ARCH_SEGMENTS: u32 = 16;
const FRAME_ARCH_RISE: f32 = 0.8;

const ROSE_Y: f32 = 11.0;
const ROSE_RADIUS: f32 = 4.0;

/// Add the whole shell to `scene`.
pub fn build(scene: &mut Scene, church: &ChurchOptions, mats: &CathedralMaterials) {
    build_floor_and_walls(scene, church, mats);
    build_pillars(scene, church, mats);
    build_arches(scene, church, mats.dark_stone);
    build_vaults(scene, church, mats.ceiling);
    build_stained_glass(scene, church, mats);
    build_big_windows(scene, church, mats);
    build_rose_window(scene, church, mats);
}

fn build_floor_and_walls(scene: &mut Scene, c: &ChurchOptions, mats: &CathedralMaterials) {
    let floor = scene.add_mesh(Mesh::ground(c.width, c.depth));
    let _ = scene.add_object("floor", floor, mats.floor, place(Vec3::ZERO, 0.0));

    let side = scene.add_mesh(Mesh::cuboid(Vec3::new(c.wall_thickness, c.height, c.depth)));
    let end = scene.add_mesh(Mesh::cuboid(Vec3::new(c.width, c.height, c.wall_thickness)));
    let y = c.height / 2.0;
    let walls = [
        ("wall_left", side, Vec3::new(-c.width / 2.0, y, 0.0)),
        ("wall_right", side, Vec3::new(c.width / 2.0, y, 0.0)),
        ("wall_back", end, Vec3::new(0.0, y, -c.depth / 2.0)),
        ("wall_front", end, Vec3::new(0.0, y, c.depth / 2.0)),
    ];
    for (name, mesh, position) in walls {
        let _ = scene.add_object(name, mesh, mats.stone, place(position, 0.0));
    }
}

fn build_pillars(scene: &mut Scene, c: &ChurchOptions, mats: &CathedralMaterials) {
    let shaft = scene.add_mesh(Mesh::cylinder(
        PILLAR_DIAMETER,
        PILLAR_DIAMETER,
        c.nave_height,
        24,
    ));
    let capital = scene.add_mesh(Mesh::cylinder(
        CAPITAL_TOP_DIAMETER,
        PILLAR_DIAMETER,
        CAPITAL_HEIGHT,
        24,
    ));
    let offset = c.pillar_offset();
    for i in 0..c.pillar_count {
        let z = c.pillar_z(i);
        if c.in_picture_zone(z) {
            continue;
        }
        for x in [-offset, offset] {
            let _ = scene.add_object(
                "pillar",
                shaft,
                mats.pillar,
                place(Vec3::new(x, c.nave_height / 2.0, z), 0.0),
            );
            let _ = scene.add_object(
                "pillar_capital",
                capital,
                mats.pillar,
                place(
                    Vec3::new(x, c.nave_height + CAPITAL_HEIGHT / 2.0, z),
                    0.0,
                ),
            );
        }
    }
}

/// Stone positions along an arch of span `width` springing at height
/// `spring`, with x relative to the arch center. The curve is stretched
/// vertically by [`ARCH_RISE`] to point it.
fn arch_points(width: f32, spring: f32) -> Vec<Vec2> {
    let radius = width / 2.0;
    (0..=ARCH_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ARCH_SEGMENTS as f32;
            if t <= 0.5 {
                let angle = PI * t * 2.0;
                Vec2::new(
                    -width / 2.0 + radius * (1.0 - angle.cos()),
                    spring + radius * angle.sin() * ARCH_RISE,
                )
            } else {
                let angle = PI * (t - 0.5) * 2.0;
                Vec2::new(
                    radius * angle.cos(),
                    spring + radius * (PI - angle).sin() * ARCH_RISE,
                )
            }
        })
        .collect()
}

/// Meshes shared by every arch of one thickness.
struct ArchKit {
    leg: MeshId,
    stone: MeshId,
}

fn arch_kit(scene: &mut Scene, height: f32, depth: f32) -> ArchKit {
    ArchKit {
        leg: scene.add_mesh(Mesh::cylinder(depth, depth, height * 0.6, 16)),
        stone: scene.add_mesh(Mesh::sphere(depth * 0.8, SPHERE_SEGMENTS)),
    }
}

fn add_arch(
    scene: &mut Scene,
    kit: &ArchKit,
    material: MaterialId,
    center: Vec3,
    width: f32,
    height: f32,
) {
    for x in [center.x - width / 2.0, center.x + width / 2.0] {
        let _ = scene.add_object(
            "arch_leg",
            kit.leg,
            material,
            place(Vec3::new(x, height * 0.3, center.z), 0.0),
        );
    }
    for point in arch_points(width, height * 0.6) {
        let _ = scene.add_object(
            "arch_stone",
            kit.stone,
            material,
            place(Vec3::new(center.x + point.x, point.y, center.z), 0.0),
        );
    }
}

fn build_arches(scene: &mut Scene, c: &ChurchOptions, material: MaterialId) {
    let spacing = c.pillar_spacing();
    let offset = c.pillar_offset();

    // Nave arcades between consecutive pillars.
    let nave = arch_kit(scene, c.nave_height, 0.6);
    for i in 0..c.pillar_count.saturating_sub(1) {
        let z = (c.pillar_z(i) + c.pillar_z(i + 1)) / 2.0;
        if c.in_picture_zone(z) {
            continue;
        }
        for x in [-offset, offset] {
            add_arch(
                scene,
                &nave,
                material,
                Vec3::new(x, 0.0, z),
                spacing * 0.8,
                c.nave_height,
            );
        }
    }

    // Transverse arches spanning the nave at each pillar pair.
    let height = c.nave_height + 2.0;
    let transverse = arch_kit(scene, height, 0.5);
    for i in 0..c.pillar_count {
        let z = c.pillar_z(i);
        if c.in_picture_zone(z) {
            continue;
        }
        add_arch(scene, &transverse, material, Vec3::new(0.0, 0.0, z), offset * 2.0, height);
    }
}

fn build_vaults(scene: &mut Scene, c: &ChurchOptions, material: MaterialId) {
    let offset = c.pillar_offset();
    let panel = scene.add_mesh(Mesh::plane(offset + 1.0, c.pillar_spacing()));
    let y = c.height - 2.0;
    for i in 0..c.pillar_count.saturating_sub(1) {
        let z = (c.pillar_z(i) + c.pillar_z(i + 1)) / 2.0;
        if c.in_picture_zone(z) {
            continue;
        }
        for (x, roll) in [(-offset / 2.0, -FRAC_PI_8), (offset / 2.0, FRAC_PI_8)] {
            let _ = scene.add_object(
                "vault",
                panel,
                material,
                transform(
                    Vec3::new(x, y, z),
                    Vec3::new(FRAC_PI_2, 0.0, roll),
                    Vec3::ONE,
                ),
            );
        }
    }
}

/// Z of the window bay between pillars `i` and `i + 1`.
fn bay_z(c: &ChurchOptions, i: u32) -> f32 {
    -c.depth / 2.0 + c.pillar_spacing() * (i as f32 + 1.5)
}

/// Both side-wall mounting points (position x, facing yaw) for windows.
fn wall_mounts(c: &ChurchOptions) -> [(f32, f32); 2] {
    [
        (-c.width / 2.0 + WINDOW_WALL_INSET, FRAC_PI_2),
        (c.width / 2.0 - WINDOW_WALL_INSET, -FRAC_PI_2),
    ]
}

fn build_stained_glass(scene: &mut Scene, c: &ChurchOptions, mats: &CathedralMaterials) {
    let size = STAINED_GLASS_SIZE;
    let panel_height = size.y / 5.0;
    let panel = scene.add_mesh(Mesh::plane(size.x * 0.8, panel_height * 0.9));
    let top = scene.add_mesh(Mesh::disc(size.x / 2.0, 32, 0.5));
    for i in 0..c.pillar_count.saturating_sub(1) {
        let z = bay_z(c, i);
        for (x, yaw) in wall_mounts(c) {
            for (k, material) in mats.stained_glass.iter().enumerate() {
                let y = STAINED_GLASS_Y - size.y / 2.0 + panel_height * (k as f32 + 0.5);
                let _ = scene.add_object(
                    "stained_glass",
                    panel,
                    *material,
                    place(Vec3::new(x, y, z), yaw),
                );
            }
            let _ = scene.add_object(
                "stained_glass_top",
                top,
                mats.glass_arch,
                transform(
                    Vec3::new(x, STAINED_GLASS_Y + size.y / 2.0, z),
                    Vec3::new(0.0, yaw, FRAC_PI_2),
                    Vec3::ONE,
                ),
            );
        }
    }
}

fn build_big_windows(scene: &mut Scene, c: &ChurchOptions, mats: &CathedralMaterials) {
    let size = BIG_WINDOW_SIZE;
    let glass = scene.add_mesh(Mesh::plane(size.x, size.y));
    let rail = scene.add_mesh(Mesh::cuboid(Vec3::new(
        size.x + FRAME_THICKNESS * 2.0,
        FRAME_THICKNESS,
        FRAME_DEPTH,
    )));
    let mullion = scene.add_mesh(Mesh::cuboid(Vec3::new(
        FRAME_THICKNESS * 0.5,
        size.y,
        FRAME_DEPTH,
    )));
    let transom = scene.add_mesh(Mesh::cuboid(Vec3::new(
        size.x,
        FRAME_THICKNESS * 0.5,
        FRAME_DEPTH,
    )));
    let tracery = scene.add_mesh(Mesh::cuboid(Vec3::new(
        FRAME_THICKNESS * 0.6,
        FRAME_THICKNESS * 0.6,
        FRAME_DEPTH,
    )));
    let frame = mats.window_frame;
    let radius = size.x / 2.0;

    for i in 0..c.pillar_count.saturating_sub(1) {
        let z = bay_z(c, i);
        for (x, yaw) in wall_mounts(c) {
            let center = Vec3::new(x, BIG_WINDOW_Y, z);
            // Horizontal direction across the pane.
            let across = Vec3::new(yaw.cos(), 0.0, yaw.sin());
            let rail_dy = size.y / 2.0 + FRAME_THICKNESS / 2.0;

            let _ = scene.add_object("window_glass", glass, mats.landscape, place(center, yaw));
            for dy in [rail_dy, -rail_dy] {
                let _ = scene.add_object(
                    "window_rail",
                    rail,
                    frame,
                    place(center + Vec3::Y * dy, yaw),
                );
            }
            for k in 1..3 {
                let offset = -size.x / 2.0 + size.x / 3.0 * k as f32;
                let _ = scene.add_object(
                    "window_mullion",
                    mullion,
                    frame,
                    place(center + across * offset, yaw),
                );
            }
            let _ = scene.add_object("window_transom", transom, frame, place(center, yaw));

            for step in 0..=FRAME_ARCH_SEGMENTS {
                let t = step as f32 / FRAME_ARCH_SEGMENTS as f32;
                let angle = PI * if t <= 0.5 { t * 2.0 } else { (t - 0.5) * 2.0 };
                let (h, v) = if t <= 0.5 {
                    (-radius * angle.cos(), radius * angle.sin())
                } else {
                    (radius * angle.cos(), radius * (PI - angle).sin())
                };
                let position = center
                    + across * h
                    + Vec3::Y * (size.y / 2.0 + v * FRAME_ARCH_RISE);
                let _ = scene.add_object("window_tracery", tracery, frame, place(position, yaw));
            }
        }
    }
}

fn build_rose_window(scene: &mut Scene, c: &ChurchOptions, mats: &CathedralMaterials) {
    let back = -c.depth / 2.0;
    let disc = scene.add_mesh(Mesh::disc(ROSE_RADIUS, 64, 1.0));
    let _ = scene.add_object(
        "rose_window",
        disc,
        mats.rose_window,
        place(Vec3::new(0.0, ROSE_Y, back + 0.3), PI),
    );
    for (r, material) in mats.rose_rings.iter().enumerate() {
        let diameter = ROSE_RADIUS * 2.0 - (r as f32 + 1.0) * 2.0;
        let ring = scene.add_mesh(Mesh::torus(diameter, 0.3, 48));
        let _ = scene.add_object(
            "rose_ring",
            ring,
            *material,
            transform(
                Vec3::new(0.0, ROSE_Y, back + 0.35),
                Vec3::new(FRAC_PI_2, 0.0, 0.0),
                Vec3::ONE,
            ),
        );
    }
}
