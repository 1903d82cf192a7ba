//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the perspective
//! parameters (FOV, aspect ratio, near/far planes) and generates the Q12
//! projection matrix.

use crate::math::fixed::{fixed_div, float_to_fixed, int_to_fixed, Fixed, QUARTER_TURN};
use crate::math::mat4::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// Vertical field of view in turns.
    fov: Fixed,
    /// Aspect ratio (width / height).
    aspect_ratio: Fixed,
    z_near: Fixed,
    z_far: Fixed,
}

impl Default for Projection {
    /// 90° vertical field of view over a 320x200 screen.
    fn default() -> Self {
        Self::new(
            QUARTER_TURN,
            fixed_div(int_to_fixed(320), int_to_fixed(200)),
            float_to_fixed(0.1),
            int_to_fixed(1024),
        )
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov` - Vertical field of view in turns (must be below half a turn)
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov: Fixed, aspect_ratio: Fixed, z_near: Fixed, z_far: Fixed) -> Self {
        Self {
            fov,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Aspect ratio of a `width` x `height` screen.
    pub fn for_screen(fov: Fixed, width: usize, height: usize, z_near: Fixed, z_far: Fixed) -> Self {
        let aspect = fixed_div(int_to_fixed(width as i32), int_to_fixed(height as i32));
        Self::new(fov, aspect, z_near, z_far)
    }

    pub fn fov(&self) -> Fixed {
        self.fov
    }

    pub fn aspect_ratio(&self) -> Fixed {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> Fixed {
        self.z_near
    }

    pub fn z_far(&self) -> Fixed {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: Fixed) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{fixed_to_float, FIXED_ONE};
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_matches_screen() {
        let proj = Projection::default();
        assert_eq!(proj.fov(), QUARTER_TURN);
        assert_abs_diff_eq!(fixed_to_float(proj.aspect_ratio()), 1.6, epsilon = 1e-3);
        assert_eq!(
            proj,
            Projection::for_screen(QUARTER_TURN, 320, 200, proj.z_near(), proj.z_far())
        );
    }

    #[test]
    fn ninety_degrees_has_unit_focal_length() {
        let m = Projection::new(QUARTER_TURN, FIXED_ONE, FIXED_ONE, int_to_fixed(100)).matrix();
        assert_eq!(m.get(0, 0), FIXED_ONE);
        assert_eq!(m.get(1, 1), FIXED_ONE);
        assert_eq!(m.get(3, 2), -FIXED_ONE);
    }
}
