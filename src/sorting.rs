//! Painter's-algorithm face ordering.
//!
//! Faces are drawn back to front, so the sort puts the farthest face first.
//! Depth is the clip-space z of each transformed vertex, which grows with
//! distance from the camera. It is read from the clip position rather than
//! the screen position, so vertices behind the near plane keep their
//! (negative) depth.

use std::cmp::Reverse;

use crate::clipper::TransformedVertex;
use crate::triangle::Face;

/// Depth key used to order faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthOrder {
    /// Sum of the three vertex depths (the average, unscaled).
    #[default]
    SumDepth,
    /// Depth of the vertex closest to the camera.
    ClosestVertex,
}

impl DepthOrder {
    /// Larger keys are farther away. Summed in 64 bits so three large depths
    /// cannot wrap.
    #[inline]
    fn key(self, face: &Face, vertices: &[TransformedVertex]) -> i64 {
        let [a, b, c] = face
            .vertices
            .map(|i| vertices[i as usize].clip_pos.z as i64);
        match self {
            DepthOrder::SumDepth => a + b + c,
            DepthOrder::ClosestVertex => a.min(b).min(c),
        }
    }
}

/// Sorts `order` (indices into `faces`) farthest first.
///
/// Equal depths keep scene order: the face index is the tie-break, so the
/// result does not depend on the initial permutation.
pub fn sort_back_to_front(
    order: &mut [u32],
    faces: &[Face],
    vertices: &[TransformedVertex],
    depth_order: DepthOrder,
) {
    order.sort_unstable_by_key(|&i| {
        (
            Reverse(depth_order.key(&faces[i as usize], vertices)),
            i,
        )
    });
}
