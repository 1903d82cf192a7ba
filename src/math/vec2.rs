use std::ops::{Add, Sub};

use super::fixed::{fixed_mul, Fixed};

/// A texture coordinate pair in Q12; `FIXED_ONE` spans the texture once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub u: Fixed,
    pub v: Fixed,
}

impl Vec2 {
    pub const ZERO: Self = Self { u: 0, v: 0 };

    pub const fn new(u: Fixed, v: Fixed) -> Self {
        Self { u, v }
    }

    /// Linear interpolation with a Q12 fraction.
    pub fn lerp(self, other: Self, t: Fixed) -> Self {
        Self {
            u: self.u + fixed_mul(t, other.u - self.u),
            v: self.v + fixed_mul(t, other.v - self.v),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.u + rhs.u, self.v + rhs.v)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.u - rhs.u, self.v - rhs.v)
    }
}
