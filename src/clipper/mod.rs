//! Vertex classification and near-plane clipping.
//!
//! Everything happens in homogeneous clip space, after projection and before
//! the perspective divide. See [`clip_space`] for the rules.

pub mod clip_space;

pub use clip_space::{
    classify_floor_vertex, clip_triangle, is_back_facing, is_fully_clipped, signed_area, viewport,
    Clipped, ScreenVertex, TransformedVertex, VertexClip,
};
