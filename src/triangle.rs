use std::rc::Rc;

use crate::texture::Texture;

/// A triangle of a model, as indices into the model's attribute arrays.
///
/// `vertices` index the position array (rebased to the global vertex array
/// once copied into geometry storage), `normal` indexes the per-face normal
/// array and `texcoords` the texture coordinate array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    pub vertices: [u32; 3],
    pub normal: u32,
    pub texcoords: [u32; 3],
    /// Texture slot, resolved into `texture` by `Model::bind_textures`.
    pub texture_slot: u32,
    /// Owning model, stamped in when the face is copied into geometry storage.
    pub model_id: u32,
    pub texture: Option<Rc<Texture>>,
}

impl Face {
    pub fn new(vertices: [u32; 3], normal: u32, texcoords: [u32; 3], texture_slot: u32) -> Self {
        Self {
            vertices,
            normal,
            texcoords,
            texture_slot,
            model_id: 0,
            texture: None,
        }
    }
}
