//! 4D vector for homogeneous coordinates.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::fixed::{fixed_div, fixed_mul, fixed_sqrt_wide, Fixed, FIXED_ONE, FIXED_SHIFT};
use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec4 {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
    pub w: Fixed,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: Fixed, y: Fixed, z: Fixed, w: Fixed) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self::new(x, y, z, FIXED_ONE)
    }

    /// Create a direction vector (w=0) from x, y, z coordinates.
    pub const fn direction(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self::new(x, y, z, 0)
    }

    /// Create a Vec4 from a Vec3 with specified w component.
    pub const fn from_vec3(v: Vec3, w: Fixed) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn add3(a: Self, b: Self, c: Self) -> Self {
        Self::new(
            a.x + b.x + c.x,
            a.y + b.y + c.y,
            a.z + b.z + c.z,
            a.w + b.w + c.w,
        )
    }

    pub fn scale(&self, scalar: Fixed) -> Self {
        Self::new(
            fixed_mul(self.x, scalar),
            fixed_mul(self.y, scalar),
            fixed_mul(self.z, scalar),
            fixed_mul(self.w, scalar),
        )
    }

    pub fn dot(&self, other: Self) -> Fixed {
        fixed_mul(self.x, other.x)
            .wrapping_add(fixed_mul(self.y, other.y))
            .wrapping_add(fixed_mul(self.z, other.z))
            .wrapping_add(fixed_mul(self.w, other.w))
    }

    pub fn length(&self) -> Fixed {
        let squared = [self.x, self.y, self.z, self.w]
            .iter()
            .map(|&c| (c as i64 * c as i64) >> FIXED_SHIFT)
            .sum::<i64>();
        fixed_sqrt_wide(squared)
    }

    /// Unit vector, or zero when the length is zero.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0 {
            return Self::ZERO;
        }
        *self / length
    }

    /// Linearly interpolate between two vectors; `t` is a Q12 fraction.
    pub fn lerp(self, other: Self, t: Fixed) -> Self {
        Self::new(
            self.x + fixed_mul(t, other.x - self.x),
            self.y + fixed_mul(t, other.y - self.y),
            self.z + fixed_mul(t, other.z - self.z),
            self.w + fixed_mul(t, other.w - self.w),
        )
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<Fixed> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Fixed) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<Fixed> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: Fixed) -> Self::Output {
        Self::new(
            fixed_div(self.x, rhs),
            fixed_div(self.y, rhs),
            fixed_div(self.z, rhs),
            fixed_div(self.w, rhs),
        )
    }
}

impl Neg for Vec4 {
    type Output = Vec4;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}

impl From<Vec4> for Vec3 {
    /// Convert Vec4 to Vec3, discarding w.
    fn from(v: Vec4) -> Self {
        v.to_vec3()
    }
}
