//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system with Y up. The view matrix comes
//! from [`Mat4::look_at`], so the camera looks down -Z in view space.
//!
//! # Orientation
//!
//! - **Yaw**: heading around the Y axis in turns. Yaw 0 looks along +Z,
//!   a quarter turn looks along +X.
//! - **Pitch**: vertical offset of the look target one unit ahead, so
//!   `pitch = 1.0` looks 45° up. Kept as a height rather than an angle, the
//!   way a mouse-look offset accumulates.

use crate::math::fixed::{icos, int_to_fixed, isin, Fixed, FIXED_ONE};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// First-person camera with position, yaw and pitch.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    yaw: Fixed,   // Turns around Y
    pitch: Fixed, // Look target height one unit ahead

    pitch_min: Fixed,
    pitch_max: Fixed,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FpsCamera {
    /// Creates a new FPS camera at the given position, looking along +Z axis.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0,
            pitch: 0,
            pitch_min: -int_to_fixed(2),
            pitch_max: int_to_fixed(2),
        }
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Rotates the camera horizontally. Positive values turn from +Z toward +X.
    pub fn rotate_yaw(&mut self, delta: Fixed) {
        self.yaw = (self.yaw + delta).rem_euclid(FIXED_ONE);
    }

    /// Raises or lowers the look target. Clamped to the pitch limits.
    pub fn rotate_pitch(&mut self, delta: Fixed) {
        self.pitch = (self.pitch + delta).clamp(self.pitch_min, self.pitch_max);
    }

    pub fn set_yaw(&mut self, yaw: Fixed) {
        self.yaw = yaw.rem_euclid(FIXED_ONE);
    }

    pub fn set_pitch_limits(&mut self, min: Fixed, max: Fixed) {
        self.pitch_min = min;
        self.pitch_max = max;
        self.pitch = self.pitch.clamp(self.pitch_min, self.pitch_max);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its horizontal heading. Pitch does not lift it.
    pub fn move_forward(&mut self, distance: Fixed) {
        self.position = self.position + self.heading().scale(distance);
    }

    /// Strafes along the screen's right direction.
    pub fn move_right(&mut self, distance: Fixed) {
        self.position = self.position + self.right().scale(distance);
    }

    /// Moves the camera along world +Y.
    pub fn move_up(&mut self, distance: Fixed) {
        self.position.y += distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> Fixed {
        self.yaw
    }

    pub fn pitch(&self) -> Fixed {
        self.pitch
    }

    /// Unit vector along the horizontal heading.
    fn heading(&self) -> Vec3 {
        Vec3::new(isin(self.yaw), 0, icos(self.yaw))
    }

    /// Normalized viewing direction, pitch included.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(isin(self.yaw), self.pitch, icos(self.yaw)).normalize()
    }

    /// Screen-right direction in world space (horizontal).
    pub fn right(&self) -> Vec3 {
        Vec3::new(-icos(self.yaw), 0, isin(self.yaw))
    }

    /// Point the camera looks at, one unit ahead plus the pitch offset.
    pub fn target(&self) -> Vec3 {
        self.position + Vec3::new(isin(self.yaw), self.pitch, icos(self.yaw))
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target(), Vec3::UP)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::QUARTER_TURN;
    use crate::math::vec4::Vec4;

    #[test]
    fn camera_starts_looking_forward() {
        let camera = FpsCamera::new(Vec3::ZERO);
        assert_eq!(camera.forward(), Vec3::FORWARD);
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate_yaw(QUARTER_TURN);
        assert_eq!(camera.forward(), Vec3::RIGHT);
    }

    #[test]
    fn yaw_wraps_around() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate_yaw(-QUARTER_TURN);
        assert_eq!(camera.yaw(), 3 * QUARTER_TURN);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate_pitch(int_to_fixed(10));
        assert_eq!(camera.pitch(), int_to_fixed(2));
        assert!(camera.forward().y > 0);
    }

    #[test]
    fn move_forward_ignores_pitch() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate_pitch(FIXED_ONE);
        camera.move_forward(int_to_fixed(5));
        assert_eq!(camera.position(), Vec3::new(0, 0, int_to_fixed(5)));
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let camera = FpsCamera::new(Vec3::new(0, 0, -int_to_fixed(5)));
        let view = camera.view_matrix();
        let origin = view * Vec4::point(0, 0, 0);
        assert_eq!(origin.z, -int_to_fixed(5));
        assert_eq!(origin.x, 0);
    }

    #[test]
    fn right_matches_view_x_axis() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.rotate_yaw(QUARTER_TURN / 2);
        let view = camera.view_matrix();
        let right = view * Vec4::from_vec3(camera.right(), 0);
        assert!(right.x > FIXED_ONE - 8);
        assert!(right.z.abs() < 8);
    }
}
