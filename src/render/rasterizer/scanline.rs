//! Scanline-based triangle rasterization.
//!
//! This module implements the classic top/middle/bottom edge walk with affine
//! texture mapping, entirely in Q12 fixed point.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate into upper, center and lower
//! 2. **Upper half**: walk rows from the upper vertex to the center vertex
//!    between the short edge (upper to center) and the long edge (upper to lower)
//! 3. **Lower half**: replace the short edge by center to lower and keep
//!    walking down to the lower vertex
//!
//! ```text
//!        upper
//!        /\
//!       /  \
//!      /    \  <- upper half
//!  center ---\
//!       \     \  <- lower half
//!        \     \
//!         \_____\
//!              lower
//! ```
//!
//! A flat upper edge skips the upper half entirely.
//!
//! # Texture Gradients
//!
//! Texture coordinates change by a constant amount per pixel across the whole
//! triangle. The per-pixel step is computed once from the horizontal span at
//! the center vertex's row; each row starts from the left edge's coordinate,
//! which steps once per row. Only additions happen per pixel.
//!
//! Edge and coordinate accumulators use wrapping arithmetic: vertices that
//! were near-clipped can project far outside the screen.

use super::{Rasterizer, Triangle};
use crate::colors;
use crate::math::fixed::{fixed_div, fixed_mul, fixed_round_to_int, Fixed};
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Scanline-based triangle rasterizer.
///
/// Vertices may come in any order. Pixels are written for every row from
/// the rounded upper y up to (not including) the rounded lower y, and for
/// every column from the rounded left x through the rounded right x, clamped
/// to the buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

/// One vertex, flattened for the edge walk.
#[derive(Clone, Copy)]
struct EdgeVertex {
    x: Fixed,
    y: Fixed,
    u: Fixed,
    v: Fixed,
}

/// Left and right edge positions plus the texture coordinate on the left edge.
#[derive(Clone, Copy, Default)]
struct EdgeWalk {
    left_x: Fixed,
    left_dx: Fixed,
    right_x: Fixed,
    right_dx: Fixed,
    left_u: Fixed,
    left_du: Fixed,
    left_v: Fixed,
    left_dv: Fixed,
}

impl EdgeWalk {
    #[inline]
    fn step(&mut self) {
        self.advance(1);
    }

    /// Steps `rows` times at once.
    #[inline]
    fn advance(&mut self, rows: i32) {
        self.left_x = self.left_x.wrapping_add(self.left_dx.wrapping_mul(rows));
        self.right_x = self.right_x.wrapping_add(self.right_dx.wrapping_mul(rows));
        self.left_u = self.left_u.wrapping_add(self.left_du.wrapping_mul(rows));
        self.left_v = self.left_v.wrapping_add(self.left_dv.wrapping_mul(rows));
    }

    /// Starts the left edge at `from`, heading for `to` over `dy`.
    fn set_left(&mut self, from: &EdgeVertex, to: &EdgeVertex, dy: Fixed) {
        self.left_x = from.x;
        self.left_dx = fixed_div(from.x.wrapping_sub(to.x), dy);
        self.left_u = from.u;
        self.left_du = fixed_div(from.u.wrapping_sub(to.u), dy);
        self.left_v = from.v;
        self.left_dv = fixed_div(from.v.wrapping_sub(to.v), dy);
    }

    fn set_right(&mut self, from: &EdgeVertex, to: &EdgeVertex, dy: Fixed) {
        self.right_x = from.x;
        self.right_dx = fixed_div(from.x.wrapping_sub(to.x), dy);
    }
}

/// Per-pixel texture steps and the texture/shade to write with.
struct SpanPainter<'t> {
    texture: &'t Texture,
    shade: Fixed,
    du_dx: Fixed,
    dv_dx: Fixed,
}

impl SpanPainter<'_> {
    #[inline]
    fn paint(&self, row: &mut [u8], edges: &EdgeWalk) {
        let x_max = fixed_round_to_int(edges.right_x).min(row.len() as i32 - 1);
        if x_max < 0 {
            return;
        }

        let mut x = fixed_round_to_int(edges.left_x);
        let mut u = edges.left_u;
        let mut v = edges.left_v;
        if x < 0 {
            // Keep the coordinates in step with the hidden pixels.
            u = u.wrapping_add(self.du_dx.wrapping_mul(-x));
            v = v.wrapping_add(self.dv_dx.wrapping_mul(-x));
            x = 0;
        }
        if x > x_max {
            return;
        }

        for pixel in &mut row[x as usize..=x_max as usize] {
            *pixel = colors::modulate(self.texture.sample(u, v), self.shade);
            u = u.wrapping_add(self.du_dx);
            v = v.wrapping_add(self.dv_dx);
        }
    }

    /// Fills rows `round(from_y)..round(to_y)`, stepping the edges per row.
    fn walk(&self, edges: &mut EdgeWalk, from_y: Fixed, to_y: Fixed, buffer: &mut FrameBuffer) {
        let mut row = fixed_round_to_int(from_y);
        let end = fixed_round_to_int(to_y).min(buffer.height() as i32);

        if row < 0 {
            let hidden = end.min(0) - row;
            if hidden > 0 {
                edges.advance(hidden);
                row += hidden;
            }
        }

        while row < end {
            self.paint(buffer.row_mut(row as usize), edges);
            edges.step();
            row += 1;
        }
    }
}

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts the triangle's vertices by Y: `upper.y <= center.y <= lower.y`.
    fn sort_vertices(triangle: &Triangle) -> [EdgeVertex; 3] {
        let [a, b, c] = [0, 1, 2].map(|i| EdgeVertex {
            x: triangle.points[i].x,
            y: triangle.points[i].y,
            u: triangle.texcoords[i].u,
            v: triangle.texcoords[i].v,
        });

        let (upper, lower) = if a.y < b.y { (a, b) } else { (b, a) };
        if c.y < upper.y {
            [c, upper, lower]
        } else if c.y > lower.y {
            [upper, lower, c]
        } else {
            [upper, c, lower]
        }
    }

    /// Walks the upper half and returns whether the short edge (through the
    /// center vertex) is on the left.
    fn rasterize_upper_half(
        painter: &SpanPainter,
        edges: &mut EdgeWalk,
        [upper, center, lower]: &[EdgeVertex; 3],
        buffer: &mut FrameBuffer,
    ) -> bool {
        let upper_diff = upper.y.wrapping_sub(center.y);
        let lower_diff = upper.y.wrapping_sub(lower.y);

        let upper_center = fixed_div(upper.x.wrapping_sub(center.x), upper_diff);
        let upper_lower = fixed_div(upper.x.wrapping_sub(lower.x), lower_diff);
        let center_on_left = upper_center < upper_lower;

        if center_on_left {
            edges.set_left(upper, center, upper_diff);
            edges.set_right(upper, lower, lower_diff);
        } else {
            edges.set_left(upper, lower, lower_diff);
            edges.set_right(upper, center, upper_diff);
        }

        painter.walk(edges, upper.y, center.y, buffer);
        center_on_left
    }

    /// Swaps the short edge for center-to-lower and walks the lower half.
    fn rasterize_lower_half(
        painter: &SpanPainter,
        edges: &mut EdgeWalk,
        center_on_left: bool,
        [_, center, lower]: &[EdgeVertex; 3],
        buffer: &mut FrameBuffer,
    ) {
        let center_diff = center.y.wrapping_sub(lower.y);
        if center_diff == 0 {
            return;
        }
        if center_on_left {
            edges.set_left(center, lower, center_diff);
        } else {
            edges.set_right(center, lower, center_diff);
        }
        painter.walk(edges, center.y, lower.y, buffer);
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, texture: &Texture, buffer: &mut FrameBuffer) {
        let sorted = Self::sort_vertices(triangle);
        let [upper, center, lower] = &sorted;

        let upper_diff = upper.y.wrapping_sub(center.y);
        let lower_diff = upper.y.wrapping_sub(lower.y);
        if upper_diff == 0 && lower_diff == 0 {
            return;
        }

        // Span at the center row: from the center vertex to the long edge.
        let t = fixed_div(center.y.wrapping_sub(upper.y), lower.y.wrapping_sub(upper.y));
        let across = |a: Fixed, b: Fixed, c: Fixed| {
            fixed_mul(t, c.wrapping_sub(a))
                .wrapping_add(a)
                .wrapping_sub(b)
        };
        let width = across(upper.x, center.x, lower.x);
        if width == 0 {
            return;
        }

        let painter = SpanPainter {
            texture,
            shade: triangle.shade,
            du_dx: fixed_div(across(upper.u, center.u, lower.u), width),
            dv_dx: fixed_div(across(upper.v, center.v, lower.v), width),
        };
        let mut edges = EdgeWalk::default();

        if upper_diff == 0 {
            // Flat upper edge: both edges start on the upper row.
            let (left, right) = if upper.x < center.x {
                (upper, center)
            } else {
                (center, upper)
            };
            edges.set_left(left, lower, lower_diff);
            edges.set_right(right, lower, lower_diff);
            painter.walk(&mut edges, center.y, lower.y, buffer);
            return;
        }

        let center_on_left = Self::rasterize_upper_half(&painter, &mut edges, &sorted, buffer);
        Self::rasterize_lower_half(&painter, &mut edges, center_on_left, &sorted, buffer);
    }
}
