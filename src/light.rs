//! Lighting for the renderer.

use crate::math::fixed::{fixed_max, fixed_min, float_to_fixed, Fixed, FIXED_HALF, FIXED_ONE};
use crate::math::vec3::Vec3;

/// A fixed sky light for flat shading.
///
/// Faces turned toward `direction` get full diffuse light; faces turned away
/// keep the ambient floor. The result is capped at `max_shade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HemisphereLight {
    /// Normalized direction *toward* the light.
    pub direction: Vec3,
    pub ambient: Fixed,
    pub max_shade: Fixed,
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self::new(Vec3::new(FIXED_HALF, FIXED_ONE, FIXED_HALF))
    }
}

impl HemisphereLight {
    /// Create a light shining from the given direction (normalized here),
    /// with an ambient floor of 0.1.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            ambient: float_to_fixed(0.1),
            max_shade: FIXED_ONE,
        }
    }

    /// Shade factor in `[ambient, max_shade]` for a world-space face normal.
    pub fn shade(&self, normal: Vec3) -> Fixed {
        let diffuse = fixed_max(0, self.direction.dot(normal.normalize()));
        fixed_min(self.max_shade, self.ambient + diffuse)
    }
}
