//! Scene-wide scratch buffers for transformed vertices and sorted faces.
//!
//! Buffers only grow: the high-water mark is kept for the lifetime of the
//! storage so that frames after a scene shrink allocate nothing.

use log::debug;

use crate::clipper::TransformedVertex;
use crate::model::Model;
use crate::sorting::{self, DepthOrder};
use crate::triangle::Face;

#[derive(Default)]
pub struct GeometryStorage {
    vertices: Vec<TransformedVertex>,
    faces: Vec<Face>,
    /// Draw order, as indices into `faces`.
    order: Vec<u32>,
    /// First global vertex index of each model.
    vertex_offsets: Vec<usize>,
    vertex_count: usize,
    face_count: usize,
}

impl GeometryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the buffers for `models` and copy their faces in.
    ///
    /// Face vertex indices are rebased onto the global vertex array and each
    /// face is stamped with its model's index. Call again whenever the model
    /// list or any model's geometry changes.
    pub fn prepare(&mut self, models: &[Model]) {
        let vertex_count: usize = models.iter().map(|m| m.vertices().len()).sum();
        let face_count: usize = models.iter().map(|m| m.faces().len()).sum();

        if vertex_count > self.vertices.len() {
            debug!(
                "growing vertex storage {} -> {vertex_count}",
                self.vertices.len()
            );
            self.vertices.resize(vertex_count, TransformedVertex::default());
        }
        if face_count > self.faces.len() {
            debug!("growing face storage {} -> {face_count}", self.faces.len());
            self.faces.resize(face_count, Face::default());
        }

        self.vertex_offsets.clear();
        let mut vertex_offset = 0;
        let mut slots = self.faces.iter_mut();
        for (model_id, model) in models.iter().enumerate() {
            self.vertex_offsets.push(vertex_offset);
            for (face, slot) in model.faces().iter().zip(slots.by_ref()) {
                *slot = Face {
                    vertices: face.vertices.map(|v| v + vertex_offset as u32),
                    model_id: model_id as u32,
                    ..face.clone()
                };
            }
            vertex_offset += model.vertices().len();
        }

        self.order.clear();
        self.order.extend(0..face_count as u32);
        self.vertex_count = vertex_count;
        self.face_count = face_count;
    }

    /// Release both buffers.
    pub fn free(&mut self) {
        debug!(
            "freeing geometry storage ({} vertices, {} faces)",
            self.vertices.len(),
            self.faces.len()
        );
        *self = Self::default();
    }

    /// Whether the last `prepare` matches the shape of `models`.
    pub fn is_prepared_for(&self, models: &[Model]) -> bool {
        self.vertex_offsets.len() == models.len()
            && self.vertex_count == models.iter().map(|m| m.vertices().len()).sum::<usize>()
            && self.face_count == models.iter().map(|m| m.faces().len()).sum::<usize>()
    }

    pub fn vertex_offset(&self, model: usize) -> usize {
        self.vertex_offsets[model]
    }

    /// Transformed vertices of the current scene.
    pub fn vertices(&self) -> &[TransformedVertex] {
        &self.vertices[..self.vertex_count]
    }

    pub fn vertices_mut(&mut self) -> &mut [TransformedVertex] {
        &mut self.vertices[..self.vertex_count]
    }

    /// Faces of the current scene in model order, with global vertex indices.
    pub fn faces(&self) -> &[Face] {
        &self.faces[..self.face_count]
    }

    /// Face indices in draw order.
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Re-sort the draw order against the current transformed vertices.
    pub fn sort(&mut self, depth_order: DepthOrder) {
        sorting::sort_back_to_front(
            &mut self.order,
            &self.faces[..self.face_count],
            &self.vertices[..self.vertex_count],
            depth_order,
        );
    }

    /// Allocated vertex slots (the high-water mark).
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_capacity(&self) -> usize {
        self.faces.len()
    }
}
