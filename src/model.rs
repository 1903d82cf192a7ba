//! Renderable models.
//!
//! A [`Model`] owns immutable geometry plus the two pieces of per-frame
//! state the game mutates: its model-to-world matrix and its draw flag.

use std::path::Path;
use std::rc::Rc;

use log::{info, warn};

use crate::error::LoadError;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{self, MeshData};
use crate::texture::Texture;
use crate::transform::Transform;
use crate::triangle::Face;

pub struct Model {
    name: String,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    faces: Vec<Face>,
    modelview: Mat4,
    active: bool,
}

impl Model {
    /// Create an active model at the origin from mesh data.
    pub fn new(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            vertices: mesh.vertices,
            normals: mesh.normals,
            texcoords: mesh.texcoords,
            faces: mesh.faces,
            modelview: Mat4::identity(),
            active: true,
        }
    }

    /// The built-in -1..1 cube.
    pub fn cube(name: impl Into<String>) -> Self {
        Self::new(name, mesh::cube())
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects in the file are merged; each face's texture slot is its
    /// material index.
    pub fn from_obj(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let model = Self::new(name, mesh::load_obj(path.as_ref())?);
        info!(
            "model {}: {} vertices, {} faces",
            model.name,
            model.vertices.len(),
            model.faces.len()
        );
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ============ Geometry ============

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    // ============ Per-frame state ============

    pub fn modelview(&self) -> &Mat4 {
        &self.modelview
    }

    pub fn set_modelview(&mut self, modelview: Mat4) {
        self.modelview = modelview;
    }

    /// Set the model-to-world matrix from a transform.
    pub fn set_transform(&mut self, transform: &Transform) {
        self.modelview = transform.to_matrix();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    // ============ Texture ============

    /// Resolve each face's texture slot into `textures`.
    ///
    /// Faces whose slot has no texture are left untextured and are not drawn.
    /// Geometry storage copies faces, so bind before preparing it.
    pub fn bind_textures(&mut self, textures: &[Rc<Texture>]) {
        let mut unbound = 0;
        for face in &mut self.faces {
            face.texture = textures.get(face.texture_slot as usize).cloned();
            unbound += face.texture.is_none() as usize;
        }
        if unbound > 0 {
            warn!(
                "model {}: {unbound} faces reference missing texture slots",
                self.name
            );
        }
    }

    /// Use one texture for every face.
    pub fn set_texture(&mut self, texture: Rc<Texture>) {
        for face in &mut self.faces {
            face.texture = Some(Rc::clone(&texture));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::int_to_fixed;

    #[test]
    fn cube_starts_active_at_origin() {
        let cube = Model::cube("cube");
        assert_eq!(cube.name(), "cube");
        assert!(cube.is_active());
        assert_eq!(*cube.modelview(), Mat4::identity());
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
    }

    #[test]
    fn bind_textures_resolves_slots() {
        let mut cube = Model::cube("cube");
        let tex = Rc::new(Texture::solid(2, 0xE0));
        cube.bind_textures(&[Rc::clone(&tex)]);
        assert!(cube.faces().iter().all(|f| f.texture.as_deref() == Some(&*tex)));

        cube.bind_textures(&[]);
        assert!(cube.faces().iter().all(|f| f.texture.is_none()));
    }

    #[test]
    fn set_transform_updates_modelview() {
        let mut cube = Model::cube("cube");
        let mut t = Transform::new();
        t.set_position_xyz(0, 0, int_to_fixed(5));
        cube.set_transform(&t);
        assert_eq!(*cube.modelview(), Mat4::translation(0, 0, int_to_fixed(5)));
    }
}
