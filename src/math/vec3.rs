use std::ops::{Add, Div, Mul, Neg, Sub};

use super::fixed::{fixed_div, fixed_mul, fixed_sqrt_wide, Fixed, FIXED_ONE};

/// Three Q12 components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3 {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
    pub const ONE: Self = Self {
        x: FIXED_ONE,
        y: FIXED_ONE,
        z: FIXED_ONE,
    };
    pub const RIGHT: Self = Self {
        x: FIXED_ONE,
        y: 0,
        z: 0,
    };
    pub const UP: Self = Self {
        x: 0,
        y: FIXED_ONE,
        z: 0,
    };
    pub const FORWARD: Self = Self {
        x: 0,
        y: 0,
        z: FIXED_ONE,
    };

    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    /// Sum of three vectors.
    pub fn add3(a: Self, b: Self, c: Self) -> Self {
        Self::new(a.x + b.x + c.x, a.y + b.y + c.y, a.z + b.z + c.z)
    }

    pub fn scale(&self, scalar: Fixed) -> Self {
        Self::new(
            fixed_mul(self.x, scalar),
            fixed_mul(self.y, scalar),
            fixed_mul(self.z, scalar),
        )
    }

    pub fn dot(&self, other: Self) -> Fixed {
        fixed_mul(self.x, other.x)
            .wrapping_add(fixed_mul(self.y, other.y))
            .wrapping_add(fixed_mul(self.z, other.z))
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: fixed_mul(self.y, other.z) - fixed_mul(self.z, other.y),
            y: fixed_mul(self.z, other.x) - fixed_mul(self.x, other.z),
            z: fixed_mul(self.x, other.y) - fixed_mul(self.y, other.x),
        }
    }

    /// Euclidean length. The squared length is accumulated in 64 bits.
    pub fn length(&self) -> Fixed {
        let squared = [self.x, self.y, self.z]
            .iter()
            .map(|&c| (c as i64 * c as i64) >> super::fixed::FIXED_SHIFT)
            .sum::<i64>();
        fixed_sqrt_wide(squared)
    }

    /// Unit vector in the same direction, or the zero vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0 {
            return Self::ZERO;
        }
        *self / length
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication by a Q12 factor.
impl Mul<Fixed> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Fixed) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar division by a Q12 divisor. The divisor must not be zero.
impl Div<Fixed> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: Fixed) -> Self::Output {
        Self {
            x: fixed_div(self.x, rhs),
            y: fixed_div(self.y, rhs),
            z: fixed_div(self.z, rhs),
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{float_to_fixed, int_to_fixed};

    fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(float_to_fixed(x), float_to_fixed(y), float_to_fixed(z))
    }

    #[test]
    fn add_sub_and_three_operand_add() {
        let a = v(1.0, 2.0, 3.0);
        let b = v(0.5, -1.0, 2.0);
        assert_eq!(a + b, v(1.5, 1.0, 5.0));
        assert_eq!(a - b, v(0.5, 3.0, 1.0));
        assert_eq!(Vec3::add3(a, b, Vec3::ONE), v(2.5, 2.0, 6.0));
    }

    #[test]
    fn cross_of_axes() {
        assert_eq!(Vec3::RIGHT.cross(Vec3::UP), Vec3::FORWARD);
        assert_eq!(Vec3::UP.cross(Vec3::RIGHT), -Vec3::FORWARD);
    }

    #[test]
    fn dot_and_length() {
        let a = v(3.0, 4.0, 0.0);
        assert_eq!(a.dot(a), int_to_fixed(25));
        assert_eq!(a.length(), int_to_fixed(5));
    }

    #[test]
    fn length_does_not_overflow_for_large_vectors() {
        let a = Vec3::new(int_to_fixed(3000), int_to_fixed(4000), 0);
        assert_eq!(a.length(), int_to_fixed(5000));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn normalize_unit_is_idempotent() {
        for unit in [Vec3::RIGHT, Vec3::UP, -Vec3::FORWARD] {
            assert_eq!(unit.normalize(), unit);
        }
        let n = v(1.0, 2.0, -2.0).normalize();
        let again = n.normalize();
        assert!((n.x - again.x).abs() <= 2);
        assert!((n.y - again.y).abs() <= 2);
        assert!((n.z - again.z).abs() <= 2);
        assert!((n.length() - FIXED_ONE).abs() <= 3);
    }
}
