//! Clip-space classification and near-plane clipping.
//!
//! Vertices are classified after projection, before the perspective divide.
//! The visible volume is:
//!
//! ```text
//! 0 < z < w
//! -w < x < w
//! -w < y < w
//! ```
//!
//! Only the near plane is clipped geometrically. A vertex beyond the far
//! plane weighs three times a near-clipped one, so any triangle touching the
//! far plane is rejected outright. Vertices outside the x/y bounds are still
//! projected (the rasterizer clamps to the screen) but count toward rejection.

use crate::math::fixed::{fixed_div, fixed_mul, int_to_fixed, Fixed, FIXED_ONE};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Combined weight at which a triangle is rejected without clipping.
const REJECT_WEIGHT: u32 = 3;

/// Depth classification of a single vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VertexClip {
    #[default]
    Unclipped,
    /// Behind the near plane (`z <= 0`).
    Near,
    /// Beyond the far plane (`z >= w`).
    Far,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipState {
    pub clip: VertexClip,
    /// Outside the x/y frustum bounds. Only set on depth-unclipped vertices.
    pub outside_xy: bool,
}

impl ClipState {
    pub const UNCLIPPED: Self = Self {
        clip: VertexClip::Unclipped,
        outside_xy: false,
    };

    /// Near = 1, far = 3, outside x/y = 1.
    pub fn weight(&self) -> u32 {
        match self.clip {
            VertexClip::Unclipped => self.outside_xy as u32,
            VertexClip::Near => 1,
            VertexClip::Far => 3,
        }
    }

    pub fn is_projected(&self) -> bool {
        self.clip == VertexClip::Unclipped
    }
}

/// Classifies a model vertex.
pub fn classify_vertex(p: Vec4) -> ClipState {
    if p.z <= 0 {
        return ClipState {
            clip: VertexClip::Near,
            outside_xy: false,
        };
    }
    if p.z >= p.w {
        return ClipState {
            clip: VertexClip::Far,
            outside_xy: false,
        };
    }
    ClipState {
        clip: VertexClip::Unclipped,
        outside_xy: p.x >= p.w || p.y >= p.w || p.x <= -p.w || p.y <= -p.w,
    }
}

/// Classifies a floor or ceiling vertex.
///
/// With `harsh` set, a vertex behind the near plane weighs like a far one and
/// rejects its triangle; used when the camera is far enough from the plane
/// that clipped floor cells would only be slivers. The x/y bounds are ignored.
pub fn classify_floor_vertex(p: Vec4, harsh: bool) -> ClipState {
    let clip = if p.z <= 0 {
        if harsh {
            VertexClip::Far
        } else {
            VertexClip::Near
        }
    } else if p.z >= p.w {
        VertexClip::Far
    } else {
        VertexClip::Unclipped
    };
    ClipState {
        clip,
        outside_xy: false,
    }
}

/// Sum of the three vertex weights.
pub fn clip_weight(states: &[ClipState; 3]) -> u32 {
    states.iter().map(ClipState::weight).sum()
}

/// True when the triangle must be dropped without clipping.
pub fn is_fully_clipped(states: &[ClipState; 3]) -> bool {
    clip_weight(states) >= REJECT_WEIGHT
}

/// Maps one clip coordinate to screen space: `(x / w + 1) * size / 2`.
///
/// `w` must be non-zero.
#[inline]
pub fn viewport(x: Fixed, w: Fixed, size: usize) -> Fixed {
    fixed_mul(
        fixed_div(x, w).wrapping_add(FIXED_ONE),
        int_to_fixed((size / 2) as i32),
    )
}

/// Screen position of a clip-space point; z keeps the clip depth.
#[inline]
pub fn project(p: Vec4, width: usize, height: usize) -> Vec3 {
    Vec3::new(viewport(p.x, p.w, width), viewport(p.y, p.w, height), p.z)
}

/// A vertex after the model-view-projection transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformedVertex {
    pub clip_pos: Vec4,
    /// Pixel x, y and clip-space z. Only meaningful when `state.is_projected()`.
    pub screen: Vec3,
    pub state: ClipState,
    pub uv: Vec2,
}

impl TransformedVertex {
    /// Classifies a model vertex and projects it if it is in depth range.
    pub fn new(clip_pos: Vec4, width: usize, height: usize) -> Self {
        Self::with_state(clip_pos, classify_vertex(clip_pos), width, height)
    }

    pub fn with_state(clip_pos: Vec4, state: ClipState, width: usize, height: usize) -> Self {
        let screen = if state.is_projected() {
            project(clip_pos, width, height)
        } else {
            Vec3::ZERO
        };
        Self {
            clip_pos,
            screen,
            state,
            uv: Vec2::ZERO,
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    fn to_screen(self) -> ScreenVertex {
        ScreenVertex {
            position: self.screen,
            texcoord: self.uv,
        }
    }
}

/// A projected vertex ready for the rasterizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenVertex {
    pub position: Vec3,
    pub texcoord: Vec2,
}

/// Intersects segment `a`-`b` with the near plane (`z = 0`).
///
/// `a` is the clipped end. Position and texture coordinate are interpolated
/// with the same fraction `a.z / (a.z - b.z)`.
pub fn clip_line(a: &TransformedVertex, b: &TransformedVertex) -> (Vec4, Vec2) {
    let t = fixed_div(a.clip_pos.z, a.clip_pos.z - b.clip_pos.z);
    (a.clip_pos.lerp(b.clip_pos, t), a.uv.lerp(b.uv, t))
}

/// Clips a to the near plane and projects it; `None` if the result has `w = 0`.
fn clip_to_screen(
    a: &TransformedVertex,
    b: &TransformedVertex,
    width: usize,
    height: usize,
) -> Option<ScreenVertex> {
    let (p, uv) = clip_line(a, b);
    if p.w == 0 {
        return None;
    }
    Some(ScreenVertex {
        position: project(p, width, height),
        texcoord: uv,
    })
}

/// Result of clipping one triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clipped {
    Rejected,
    One([ScreenVertex; 3]),
    Two([[ScreenVertex; 3]; 2]),
}

impl Clipped {
    pub fn triangles(&self) -> &[[ScreenVertex; 3]] {
        match self {
            Clipped::Rejected => &[],
            Clipped::One(tri) => std::slice::from_ref(tri),
            Clipped::Two(tris) => tris,
        }
    }
}

/// Rejects, passes through, or near-clips a triangle.
///
/// One near vertex turns the triangle into a quad, emitted as two triangles
/// sharing the first clipped point; two near vertices shrink it to one
/// triangle. Vertex order (and so winding) is preserved.
pub fn clip_triangle(tri: &[TransformedVertex; 3], width: usize, height: usize) -> Clipped {
    let states = tri.map(|v| v.state);
    if is_fully_clipped(&states) {
        return Clipped::Rejected;
    }

    // Near-clipped vertices fill `a` then `b`; the others fill `c` then `b`.
    let (mut a, mut b, mut c) = (None, None, None);
    for (i, v) in tri.iter().enumerate() {
        if v.state.clip == VertexClip::Near {
            if a.is_none() {
                a = Some(i);
            } else {
                b = Some(i);
            }
        } else if c.is_none() {
            c = Some(i);
        } else {
            b = Some(i);
        }
    }

    let mut out = tri.map(TransformedVertex::to_screen);
    match (a, b, c) {
        (None, _, _) => Clipped::One(out),
        (Some(a), Some(b), Some(c)) if tri[b].state.clip == VertexClip::Near => {
            let (Some(pa), Some(pb)) = (
                clip_to_screen(&tri[a], &tri[c], width, height),
                clip_to_screen(&tri[b], &tri[c], width, height),
            ) else {
                return Clipped::Rejected;
            };
            out[a] = pa;
            out[b] = pb;
            Clipped::One(out)
        }
        (Some(a), Some(b), Some(c)) => {
            let Some(p1) = clip_to_screen(&tri[a], &tri[b], width, height) else {
                return Clipped::Rejected;
            };
            out[a] = p1;
            let first = out;

            out[b] = out[c];
            let Some(p2) = clip_to_screen(&tri[a], &tri[c], width, height) else {
                return Clipped::One(first);
            };
            out[c] = p2;
            Clipped::Two([first, out])
        }
        // Three near vertices weigh 3 and were rejected above.
        _ => Clipped::Rejected,
    }
}

/// Twice the signed screen area; positive for counter-clockwise winding.
///
/// Computed in 64 bits on raw Q12 values so large coordinates cannot wrap.
#[inline]
pub fn signed_area(p0: Vec3, p1: Vec3, p2: Vec3) -> i64 {
    (p1.x as i64 - p0.x as i64) * (p2.y as i64 - p0.y as i64)
        - (p2.x as i64 - p0.x as i64) * (p1.y as i64 - p0.y as i64)
}

#[inline]
pub fn is_back_facing(tri: &[ScreenVertex; 3]) -> bool {
    signed_area(tri[0].position, tri[1].position, tri[2].position) < 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{float_to_fixed, FIXED_HALF};

    const W: usize = 320;
    const H: usize = 200;

    fn clip(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4::new(
            float_to_fixed(x),
            float_to_fixed(y),
            float_to_fixed(z),
            float_to_fixed(w),
        )
    }

    fn state(c: VertexClip, outside_xy: bool) -> ClipState {
        ClipState { clip: c, outside_xy }
    }

    #[test]
    fn classifies_depth_before_xy() {
        assert_eq!(classify_vertex(clip(0.0, 0.0, 0.0, 1.0)).clip, VertexClip::Near);
        assert_eq!(classify_vertex(clip(5.0, 0.0, -1.0, 1.0)).clip, VertexClip::Near);
        assert_eq!(classify_vertex(clip(0.0, 0.0, 1.0, 1.0)).clip, VertexClip::Far);

        let outside = classify_vertex(clip(1.0, 0.0, 0.5, 1.0));
        assert_eq!(outside, state(VertexClip::Unclipped, true));
        assert_eq!(classify_vertex(clip(0.5, -0.5, 0.5, 1.0)), ClipState::UNCLIPPED);
    }

    #[test]
    fn floor_vertices_ignore_xy_and_clip_harshly() {
        let p = clip(3.0, 0.0, -0.5, 1.0);
        assert_eq!(classify_floor_vertex(p, false).clip, VertexClip::Near);
        assert_eq!(classify_floor_vertex(p, true).clip, VertexClip::Far);
        assert_eq!(
            classify_floor_vertex(clip(3.0, 0.0, 0.5, 1.0), true),
            ClipState::UNCLIPPED
        );
    }

    #[test]
    fn rejection_weights() {
        use VertexClip::*;
        let u = ClipState::UNCLIPPED;
        assert!(is_fully_clipped(&[state(Far, false), u, u]));
        assert!(is_fully_clipped(&[state(Near, false); 3]));
        assert!(is_fully_clipped(&[state(Near, false), state(Unclipped, true), state(Unclipped, true)]));
        assert!(!is_fully_clipped(&[state(Near, false), state(Near, false), u]));
        assert!(!is_fully_clipped(&[state(Unclipped, true), state(Unclipped, true), u]));
        assert_eq!(clip_weight(&[state(Near, false), state(Unclipped, true), u]), 2);
    }

    #[test]
    fn viewport_maps_ndc_to_pixels() {
        assert_eq!(viewport(0, FIXED_ONE, W), int_to_fixed(160));
        assert_eq!(viewport(-FIXED_ONE, FIXED_ONE, W), 0);
        assert_eq!(viewport(FIXED_HALF, FIXED_ONE, H), int_to_fixed(150));
        let v = TransformedVertex::new(clip(0.0, 0.0, 0.5, 1.0), W, H);
        assert_eq!(v.screen, Vec3::new(int_to_fixed(160), int_to_fixed(100), FIXED_HALF));
    }

    #[test]
    fn clip_line_lands_on_near_plane() {
        let a = TransformedVertex::with_state(clip(0.0, 0.0, -1.0, 1.0), ClipState::default(), W, H)
            .with_uv(Vec2::new(0, 0));
        let b = TransformedVertex::with_state(clip(2.0, 0.0, 1.0, 3.0), ClipState::default(), W, H)
            .with_uv(Vec2::new(FIXED_ONE, 0));
        let (p, uv) = clip_line(&a, &b);
        assert_eq!(p, clip(1.0, 0.0, 0.0, 2.0));
        assert_eq!(uv, Vec2::new(FIXED_HALF, 0));
    }

    fn vertex(x: f32, y: f32, z: f32) -> TransformedVertex {
        TransformedVertex::new(clip(x, y, z, 1.0), W, H)
    }

    #[test]
    fn unclipped_triangle_passes_through() {
        let tri = [vertex(-0.5, -0.5, 0.5), vertex(0.5, -0.5, 0.5), vertex(0.0, 0.5, 0.5)];
        let out = clip_triangle(&tri, W, H);
        assert_eq!(out.triangles().len(), 1);
        assert_eq!(out.triangles()[0][1].position, tri[1].screen);
    }

    #[test]
    fn one_near_vertex_makes_two_triangles_with_same_winding() {
        let tri = [vertex(-0.5, -0.5, -1.0), vertex(0.5, -0.5, 0.5), vertex(0.0, 0.5, 0.5)];
        let out = clip_triangle(&tri, W, H);
        assert!(matches!(out, Clipped::Two(_)));
        for t in out.triangles() {
            assert!(!is_back_facing(t));
            assert!(t.iter().all(|v| v.position.z.abs() <= 4 || v.position.z == FIXED_HALF));
        }
    }

    #[test]
    fn two_near_vertices_make_one_triangle() {
        let tri = [vertex(-0.5, -0.5, -1.0), vertex(0.5, -0.5, -1.0), vertex(0.0, 0.5, 0.5)];
        let out = clip_triangle(&tri, W, H);
        let Clipped::One(t) = out else {
            panic!("expected a single triangle, got {out:?}");
        };
        assert!(!is_back_facing(&t));
        assert_eq!(t[2].position, tri[2].screen);
    }

    #[test]
    fn far_vertex_rejects() {
        let tri = [vertex(-0.5, -0.5, 2.0), vertex(0.5, -0.5, 0.5), vertex(0.0, 0.5, 0.5)];
        assert_eq!(clip_triangle(&tri, W, H), Clipped::Rejected);
    }

    #[test]
    fn winding_sign() {
        let a = Vec3::new(0, 0, 0);
        let b = Vec3::new(int_to_fixed(10), 0, 0);
        let c = Vec3::new(0, int_to_fixed(10), 0);
        assert!(signed_area(a, b, c) > 0);
        assert!(signed_area(a, c, b) < 0);
    }
}
