//! Triangle rasterization.
//!
//! Triangles arrive projected, clipped and shaded; the rasterizer only fills
//! pixels. There is no depth test: callers submit triangles back to front.

mod scanline;

pub use scanline::ScanlineRasterizer;

use super::framebuffer::FrameBuffer;
use crate::clipper::ScreenVertex;
use crate::math::fixed::Fixed;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// A triangle ready for rasterization in screen space.
///
/// `points` hold pixel x, y (Q12) and clip depth; `texcoords` are Q12 texture
/// coordinates interpolated affinely across the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub texcoords: [Vec2; 3],
    /// Flat shade factor in `[0, 1]`.
    pub shade: Fixed,
}

impl Triangle {
    pub fn new(points: [Vec3; 3], texcoords: [Vec2; 3], shade: Fixed) -> Self {
        Self {
            points,
            texcoords,
            shade,
        }
    }

    pub fn from_vertices(vertices: &[ScreenVertex; 3], shade: Fixed) -> Self {
        Self::new(
            vertices.map(|v| v.position),
            vertices.map(|v| v.texcoord),
            shade,
        )
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how textured triangles are filled into a pixel buffer.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to rasterize
    /// * `texture` - Texture sampled with the triangle's texture coordinates
    /// * `buffer` - The frame buffer to draw into
    fn fill_triangle(&self, triangle: &Triangle, texture: &Texture, buffer: &mut FrameBuffer);
}
