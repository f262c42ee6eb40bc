//! Declarative scene: meshes, materials and placed objects.
//!
//! The scene is built once from [`Options`] and never changes shape; only
//! placard transforms and glow are rewritten each frame. The renderer
//! uploads each [`Mesh`] once and draws every [`SceneObject`] with its own
//! model matrix and material.

/// Cathedral shell assembly.
pub mod cathedral;
/// Surface materials.
pub mod materials;
/// Primitive mesh builders.
pub mod mesh;

use glam::{EulerRot, Mat4, Quat, Vec3};
pub use materials::{CathedralMaterials, Material, TextureSlot};
pub use mesh::{Mesh, Vertex};

use crate::gallery::Gallery;
use crate::gallery::pictures::{PLACARD_HEIGHT, PLACARD_WIDTH};
use crate::options::Options;

/// Index of a mesh in [`Scene::meshes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Index of a material in [`Scene::materials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Index of an object in [`Scene::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// One drawable: a mesh placed in the world with a material.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Debug name.
    pub name: String,
    /// Shared geometry.
    pub mesh: MeshId,
    /// Surface.
    pub material: MaterialId,
    /// Local-to-world transform.
    pub model: Mat4,
}

/// Model matrix from a position, an XYZ Euler rotation (applied yaw, then
/// pitch, then roll) and a scale.
#[must_use]
pub fn transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        scale,
        Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z),
        position,
    )
}

/// Model matrix from a position and a rotation about +Y.
#[must_use]
pub fn place(position: Vec3, yaw: f32) -> Mat4 {
    Mat4::from_rotation_translation(Quat::from_rotation_y(yaw), position)
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Flat storage of meshes, materials and objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a mesh for sharing between objects.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Store a material.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Place `mesh` with `material` at `model`.
    pub fn add_object(
        &mut self,
        name: &str,
        mesh: MeshId,
        material: MaterialId,
        model: Mat4,
    ) -> ObjectId {
        self.objects.push(SceneObject {
            name: name.to_owned(),
            mesh,
            material,
            model,
        });
        ObjectId(self.objects.len() - 1)
    }

    /// All meshes.
    #[must_use]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// All materials.
    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up a material.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Look up a material for editing.
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// Look up an object.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Look up an object for editing.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    /// Objects whose name starts with `prefix`.
    pub fn objects_named<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a SceneObject> + 'a {
        self.objects.iter().filter(move |o| o.name.starts_with(prefix))
    }
}

// ---------------------------------------------------------------------------
// Gallery assembly
// ---------------------------------------------------------------------------

/// Scene handles of one placard, rewritten every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacardHandle {
    /// The placard quad.
    pub object: ObjectId,
    /// Its private label material.
    pub material: MaterialId,
}

/// The complete gallery scene plus the handles the engine animates.
#[derive(Debug, Clone)]
pub struct GalleryScene {
    /// Everything to draw.
    pub scene: Scene,
    /// Placard handles, in placard order.
    pub placards: Vec<PlacardHandle>,
}

impl GalleryScene {
    /// Build the cathedral, pictures and placards.
    #[must_use]
    pub fn build(options: &Options, gallery: &Gallery) -> Self {
        let mut scene = Scene::new();
        let shell = CathedralMaterials::register(&mut scene);
        cathedral::build(&mut scene, &options.church, &shell);

        let picture_mesh =
            scene.add_mesh(Mesh::plane(options.pictures.width, options.pictures.image_height));
        for picture in gallery.pictures() {
            let material =
                scene.add_material(materials::picture_material(picture.index));
            let _ = scene.add_object(
                &format!("picture_{}", picture.index),
                picture_mesh,
                material,
                picture.model(),
            );
        }

        let placard_mesh = scene.add_mesh(Mesh::plane(PLACARD_WIDTH, PLACARD_HEIGHT));
        let placards = gallery
            .placards()
            .iter()
            .map(|placard| {
                let material = scene.add_material(materials::placard_material(
                    placard.index,
                    placard.hover.emissive(),
                ));
                let object = scene.add_object(
                    &format!("placard_{}", placard.index),
                    placard_mesh,
                    material,
                    placard.model(),
                );
                PlacardHandle { object, material }
            })
            .collect();

        log::info!(
            "scene built: {} objects, {} meshes, {} materials",
            scene.objects().len(),
            scene.meshes().len(),
            scene.materials().len()
        );
        Self { scene, placards }
    }

    /// Copy placard hover state into the scene.
    pub fn sync_placards(&mut self, gallery: &Gallery) {
        for (handle, placard) in self.placards.iter().zip(gallery.placards()) {
            if let Some(object) = self.scene.object_mut(handle.object) {
                object.model = placard.model();
            }
            if let Some(material) = self.scene.material_mut(handle.material) {
                material.emissive = Vec3::new(0.0, placard.hover.emissive(), 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::gallery::Ray;

    #[test]
    fn ids_index_storage() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(Mesh::plane(1.0, 1.0));
        let mat = scene.add_material(Material::flat("m", Vec3::ONE));
        let a = scene.add_object("a", mesh, mat, Mat4::IDENTITY);
        let b = scene.add_object("ab", mesh, mat, Mat4::IDENTITY);
        assert_eq!((a, b), (ObjectId(0), ObjectId(1)));
        assert_eq!(scene.object(b).unwrap().name, "ab");
        assert_eq!(scene.objects_named("a").count(), 2);
        assert!(scene.material(MaterialId(5)).is_none());
    }

    #[test]
    fn transform_applies_yaw_before_pitch() {
        // A quarter yaw turns +Z onto +X.
        let m = transform(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ONE);
        assert!((m.transform_vector3(Vec3::Z) - Vec3::X).length() < 1e-6);
        let p = place(Vec3::new(1.0, 2.0, 3.0), 0.0);
        assert_eq!(p.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn gallery_scene_has_pictures_and_placards() {
        let options = Options::default();
        let gallery = Gallery::from_options(&options);
        let built = GalleryScene::build(&options, &gallery);
        assert_eq!(built.scene.objects_named("picture_").count(), 5);
        assert_eq!(built.scene.objects_named("placard_").count(), 5);
        assert_eq!(built.placards.len(), 5);
        let material = built.scene.material(built.placards[0].material).unwrap();
        assert_eq!(material.texture, TextureSlot::Label);
    }

    #[test]
    fn sync_copies_hover_glow() {
        let options = Options::default();
        let mut gallery = Gallery::from_options(&options);
        let mut built = GalleryScene::build(&options, &gallery);
        let ray = Ray {
            origin: Vec3::new(-3.0, 1.0, 10.0),
            direction: Vec3::NEG_X,
        };
        assert!(gallery.hover(Some(&ray)));
        gallery.on_frame_tick();
        built.sync_placards(&gallery);

        let glow = |i: usize| {
            built.scene.material(built.placards[i].material).unwrap().emissive.y
        };
        assert!(glow(0) > 0.5);
        assert_eq!(glow(1), 0.5);
        let model = built.scene.object(built.placards[0].object).unwrap().model;
        assert_eq!(model, gallery.placards()[0].model());
    }
}
