//! Transform component for models.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (per-axis, in turns), and scale. All values are Q12.

use crate::math::fixed::{Fixed, FIXED_ONE};
use crate::math::{mat4::Mat4, vec3::Vec3};

/// A 3D transform with position, rotation (Euler angles in turns), and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(int_to_fixed(5), 0, int_to_fixed(10))
///     .rotate_y(QUARTER_TURN)
///     .set_scale_uniform(int_to_fixed(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Turns: x=pitch, y=yaw, z=roll
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: Fixed, y: Fixed, z: Fixed) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    /// Get the rotation (turns around each axis).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Rotate around the X axis. Angles wrap at one turn.
    pub fn rotate_x(&mut self, angle: Fixed) -> &mut Self {
        self.rotation.x = wrap_turn(self.rotation.x + angle);
        self
    }

    pub fn rotate_y(&mut self, angle: Fixed) -> &mut Self {
        self.rotation.y = wrap_turn(self.rotation.y + angle);
        self
    }

    pub fn rotate_z(&mut self, angle: Fixed) -> &mut Self {
        self.rotation.z = wrap_turn(self.rotation.z + angle);
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: Fixed) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    /// Generate the model-to-world matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ * Scale
    /// (Scale applied first, then rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

fn wrap_turn(angle: Fixed) -> Fixed {
    angle.rem_euclid(FIXED_ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{int_to_fixed, QUARTER_TURN};
    use crate::math::vec4::Vec4;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(int_to_fixed(1), int_to_fixed(2), int_to_fixed(3))
            .rotate_y(QUARTER_TURN)
            .set_scale_uniform(int_to_fixed(2));

        assert_eq!(
            t.position(),
            Vec3::new(int_to_fixed(1), int_to_fixed(2), int_to_fixed(3))
        );
        assert_eq!(t.rotation().y, QUARTER_TURN);
        assert_eq!(t.scale(), Vec3::new(int_to_fixed(2), int_to_fixed(2), int_to_fixed(2)));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut t = Transform::new();
        t.rotate_z(3 * QUARTER_TURN).rotate_z(2 * QUARTER_TURN);
        assert_eq!(t.rotation().z, QUARTER_TURN);
        t.rotate_z(-2 * QUARTER_TURN);
        assert_eq!(t.rotation().z, 3 * QUARTER_TURN);
    }

    #[test]
    fn test_to_matrix_identity() {
        let m = Transform::default().to_matrix();
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn test_to_matrix_scales_then_translates() {
        let mut t = Transform::new();
        t.set_position_xyz(0, 0, int_to_fixed(10))
            .set_scale_uniform(int_to_fixed(2));
        let p = t.to_matrix() * Vec4::point(FIXED_ONE, 0, 0);
        assert_eq!(p, Vec4::point(int_to_fixed(2), 0, int_to_fixed(10)));
    }
}
