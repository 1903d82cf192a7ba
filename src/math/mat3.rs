//! 3x3 rotation matrix, stored column-major.

use std::ops::Mul;

use super::fixed::{fixed_mul, icos, isin, Fixed, FIXED_ONE};
use super::vec3::Vec3;

/// 3x3 matrix of Q12 scalars, column-major: element `(row, col)` lives at `m[col * 3 + row]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mat3 {
    m: [Fixed; 9],
}

impl Mat3 {
    /// Builds a matrix from its rows, the way it is written on paper.
    pub const fn from_rows(rows: [[Fixed; 3]; 3]) -> Self {
        Self {
            m: [
                rows[0][0], rows[1][0], rows[2][0], //
                rows[0][1], rows[1][1], rows[2][1], //
                rows[0][2], rows[1][2], rows[2][2],
            ],
        }
    }

    pub const fn identity() -> Self {
        Self::from_rows([[FIXED_ONE, 0, 0], [0, FIXED_ONE, 0], [0, 0, FIXED_ONE]])
    }

    /// Rotation about the X axis; `angle` is in turns.
    pub fn rotation_x(angle: Fixed) -> Self {
        let (s, c) = (isin(angle), icos(angle));
        Self::from_rows([[FIXED_ONE, 0, 0], [0, c, -s], [0, s, c]])
    }

    /// Rotation about the Y axis; `angle` is in turns.
    pub fn rotation_y(angle: Fixed) -> Self {
        let (s, c) = (isin(angle), icos(angle));
        Self::from_rows([[c, 0, s], [0, FIXED_ONE, 0], [-s, 0, c]])
    }

    /// Rotation about the Z axis; `angle` is in turns.
    pub fn rotation_z(angle: Fixed) -> Self {
        let (s, c) = (isin(angle), icos(angle));
        Self::from_rows([[c, -s, 0], [s, c, 0], [0, 0, FIXED_ONE]])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Fixed {
        self.m[col * 3 + row]
    }

    /// Column-major backing array.
    pub fn as_array(&self) -> &[Fixed; 9] {
        &self.m
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition: `(A * B) * v == A * (B * v)`.
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut m = [0; 9];
        for col in 0..3 {
            for row in 0..3 {
                m[col * 3 + row] = (0..3)
                    .map(|k| fixed_mul(self.get(row, k), rhs.get(k, col)))
                    .sum();
            }
        }
        Mat3 { m }
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let m = &self.m;
        Vec3::new(
            fixed_mul(v.x, m[0]) + fixed_mul(v.y, m[3]) + fixed_mul(v.z, m[6]),
            fixed_mul(v.x, m[1]) + fixed_mul(v.y, m[4]) + fixed_mul(v.z, m[7]),
            fixed_mul(v.x, m[2]) + fixed_mul(v.y, m[5]) + fixed_mul(v.z, m[8]),
        )
    }
}
