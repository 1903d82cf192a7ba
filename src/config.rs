//! Render settings.

use crate::colors;
use crate::light::HemisphereLight;
use crate::math::fixed::{float_to_fixed, int_to_fixed, Fixed};
use crate::sorting::DepthOrder;

/// Per-engine rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub depth_order: DepthOrder,
    pub light: HemisphereLight,
    pub arena: ArenaConfig,
}

/// Floor, ceiling and border rings drawn when a floor texture is supplied.
///
/// Heights and cell size are world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    pub cell_size: i32,
    /// Cells farther than this from the origin (in cells) are skipped.
    pub radius_cells: i32,
    pub floor_height: i32,
    pub ceiling_height: i32,
    /// Above this camera distance from a plane, near-clipped plane vertices
    /// reject their triangle outright.
    pub harsh_clip_height: i32,
    pub border: bool,
    pub border_rings: i32,
    pub border_ring_spacing: i32,
    /// Ring radius is `1 << border_radius_shift`.
    pub border_radius_shift: u32,
    /// Angle between dots along a ring, in turns.
    pub border_step: Fixed,
    pub border_color: u8,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            cell_size: 8,
            radius_cells: 32,
            floor_height: 0,
            ceiling_height: 200,
            harsh_clip_height: 20,
            border: true,
            border_rings: 20,
            border_ring_spacing: 10,
            border_radius_shift: 8,
            border_step: float_to_fixed(0.0125),
            border_color: colors::WHITE,
        }
    }
}

impl ArenaConfig {
    /// Plane heights in Q12, floor first.
    pub fn plane_heights(&self) -> [Fixed; 2] {
        [
            int_to_fixed(self.floor_height),
            int_to_fixed(self.ceiling_height),
        ]
    }
}
