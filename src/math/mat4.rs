//! 4x4 transformation matrix using column-major storage.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Storage is a flat `[Fixed; 16]` where element `(row, col)` lives at `m[col * 4 + row]`
//!
//! # Example
//! ```ignore
//! let mvp = projection * (camera * modelview);
//! let clip = mvp * Vec4::from_vec3(vertex, FIXED_ONE);
//! ```

use std::ops::Mul;

use super::fixed::{fixed_div, fixed_mul, itan, Fixed, FIXED_ONE};
use super::mat3::Mat3;
use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix of Q12 scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mat4 {
    m: [Fixed; 16],
}

impl Mat4 {
    /// Wraps a column-major array.
    pub const fn from_cols_array(m: [Fixed; 16]) -> Self {
        Mat4 { m }
    }

    /// Builds a matrix from its rows, the way it is written on paper.
    pub const fn from_rows(r: [[Fixed; 4]; 4]) -> Self {
        Mat4 {
            m: [
                r[0][0], r[1][0], r[2][0], r[3][0], //
                r[0][1], r[1][1], r[2][1], r[3][1], //
                r[0][2], r[1][2], r[2][2], r[3][2], //
                r[0][3], r[1][3], r[2][3], r[3][3],
            ],
        }
    }

    pub const fn identity() -> Self {
        Mat4::from_rows([
            [FIXED_ONE, 0, 0, 0],
            [0, FIXED_ONE, 0, 0],
            [0, 0, FIXED_ONE, 0],
            [0, 0, 0, FIXED_ONE],
        ])
    }

    /// Embeds a 3x3 linear part with no translation.
    pub fn from_mat3(r: Mat3) -> Self {
        Mat4::from_rows([
            [r.get(0, 0), r.get(0, 1), r.get(0, 2), 0],
            [r.get(1, 0), r.get(1, 1), r.get(1, 2), 0],
            [r.get(2, 0), r.get(2, 1), r.get(2, 2), 0],
            [0, 0, 0, FIXED_ONE],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translation(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Mat4::from_rows([
            [FIXED_ONE, 0, 0, x],
            [0, FIXED_ONE, 0, y],
            [0, 0, FIXED_ONE, z],
            [0, 0, 0, FIXED_ONE],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Mat4::from_rows([
            [x, 0, 0, 0],
            [0, y, 0, 0],
            [0, 0, z, 0],
            [0, 0, 0, FIXED_ONE],
        ])
    }

    /// Creates a rotation matrix around the X axis. `angle` is in turns.
    pub fn rotation_x(angle: Fixed) -> Self {
        Mat4::from_mat3(Mat3::rotation_x(angle))
    }

    /// Creates a rotation matrix around the Y axis. `angle` is in turns.
    pub fn rotation_y(angle: Fixed) -> Self {
        Mat4::from_mat3(Mat3::rotation_y(angle))
    }

    /// Creates a rotation matrix around the Z axis. `angle` is in turns.
    pub fn rotation_z(angle: Fixed) -> Self {
        Mat4::from_mat3(Mat3::rotation_z(angle))
    }

    /// Creates a right-handed perspective matrix looking down -Z.
    ///
    /// `fov` is the full vertical field of view in turns; `aspect` is width / height.
    /// Points in front of the camera end up with `0 < z < w` in clip space.
    pub fn perspective(fov: Fixed, aspect: Fixed, near: Fixed, far: Fixed) -> Self {
        let f = fixed_div(FIXED_ONE, itan(fov / 2));
        let depth = near - far;
        Mat4::from_rows([
            [fixed_div(f, aspect), 0, 0, 0],
            [0, f, 0, 0],
            [
                0,
                0,
                fixed_div(near + far, depth),
                fixed_div(fixed_mul(2 * FIXED_ONE, fixed_mul(near, far)), depth),
            ],
            [0, 0, -FIXED_ONE, 0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let sideways = forward.cross(up).normalize();
        let real_up = sideways.cross(forward).normalize();

        Mat4::from_rows([
            [sideways.x, sideways.y, sideways.z, -eye.dot(sideways)],
            [real_up.x, real_up.y, real_up.z, -eye.dot(real_up)],
            [-forward.x, -forward.y, -forward.z, eye.dot(forward)],
            [0, 0, 0, FIXED_ONE],
        ])
    }

    /// Inverse of a rotation/scale plus translation matrix.
    ///
    /// Ignores the bottom row. Returns `None` if the 3x3 part is singular.
    pub fn affine_inverse(&self) -> Option<Mat4> {
        let m = &self.m;
        let det = fixed_mul(fixed_mul(m[0], m[5]), m[10]) - fixed_mul(fixed_mul(m[0], m[6]), m[9])
            + fixed_mul(fixed_mul(m[1], m[6]), m[8])
            - fixed_mul(fixed_mul(m[1], m[4]), m[10])
            + fixed_mul(fixed_mul(m[2], m[4]), m[9])
            - fixed_mul(fixed_mul(m[2], m[5]), m[8]);

        if det == 0 {
            return None;
        }

        let minor = |a: usize, b: usize, c: usize, d: usize| {
            fixed_div(fixed_mul(m[a], m[b]) - fixed_mul(m[c], m[d]), det)
        };

        let mut r = [0; 16];
        r[0] = minor(5, 10, 6, 9);
        r[4] = -minor(4, 10, 6, 8);
        r[8] = minor(4, 9, 5, 8);

        r[1] = -minor(1, 10, 2, 9);
        r[5] = minor(0, 10, 2, 8);
        r[9] = -minor(0, 9, 1, 8);

        r[2] = minor(1, 6, 2, 5);
        r[6] = -minor(0, 6, 2, 4);
        r[10] = minor(0, 5, 1, 4);

        // Translation: -(R^-1 * t)
        for row in 0..3 {
            r[12 + row] = -(fixed_mul(m[12], r[row])
                + fixed_mul(m[13], r[4 + row])
                + fixed_mul(m[14], r[8 + row]));
        }
        r[15] = FIXED_ONE;

        Some(Mat4 { m: r })
    }

    /// Computes the general inverse of the matrix by cofactor expansion.
    /// Returns `None` if the fixed-point determinant is zero.
    pub fn inverse(&self) -> Option<Mat4> {
        let m = &self.m;
        let pair = |a: usize, b: usize, c: usize, d: usize| {
            fixed_mul(m[a], m[b]) - fixed_mul(m[c], m[d])
        };

        let a0 = pair(0, 5, 1, 4);
        let a1 = pair(0, 6, 2, 4);
        let a2 = pair(0, 7, 3, 4);
        let a3 = pair(1, 6, 2, 5);
        let a4 = pair(1, 7, 3, 5);
        let a5 = pair(2, 7, 3, 6);
        let b0 = pair(8, 13, 9, 12);
        let b1 = pair(8, 14, 10, 12);
        let b2 = pair(8, 15, 11, 12);
        let b3 = pair(9, 14, 10, 13);
        let b4 = pair(9, 15, 11, 13);
        let b5 = pair(10, 15, 11, 14);

        let det = fixed_mul(a0, b5) - fixed_mul(a1, b4)
            + fixed_mul(a2, b3)
            + fixed_mul(a3, b2)
            - fixed_mul(a4, b1)
            + fixed_mul(a5, b0);

        if det == 0 {
            return None;
        }

        // Each entry is a 3x3 cofactor expanded along one column of the a/b minors.
        let cof = |i: usize, x: Fixed, j: usize, y: Fixed, k: usize, z: Fixed| {
            fixed_div(
                fixed_mul(m[i], x) - fixed_mul(m[j], y) + fixed_mul(m[k], z),
                det,
            )
        };

        let mut r = [0; 16];
        r[0] = cof(5, b5, 6, b4, 7, b3);
        r[4] = -cof(4, b5, 6, b2, 7, b1);
        r[8] = cof(4, b4, 5, b2, 7, b0);
        r[12] = -cof(4, b3, 5, b1, 6, b0);

        r[1] = -cof(1, b5, 2, b4, 3, b3);
        r[5] = cof(0, b5, 2, b2, 3, b1);
        r[9] = -cof(0, b4, 1, b2, 3, b0);
        r[13] = cof(0, b3, 1, b1, 2, b0);

        r[2] = cof(13, a5, 14, a4, 15, a3);
        r[6] = -cof(12, a5, 14, a2, 15, a1);
        r[10] = cof(12, a4, 13, a2, 15, a0);
        r[14] = -cof(12, a3, 13, a1, 14, a0);

        r[3] = -cof(9, a5, 10, a4, 11, a3);
        r[7] = cof(8, a5, 10, a2, 11, a1);
        r[11] = -cof(8, a4, 9, a2, 11, a0);
        r[15] = cof(8, a3, 9, a1, 10, a0);

        Some(Mat4 { m: r })
    }

    #[inline]
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        *self * v
    }

    /// Transforms a position (w = 1) and drops the resulting w.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_vec4(Vec4::from_vec3(p, FIXED_ONE)).to_vec3()
    }

    /// Transforms a direction (w = 0), ignoring translation.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(d, 0)).to_vec3()
    }

    /// Access element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Fixed {
        self.m[col * 4 + row]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Fixed) {
        self.m[col * 4 + row] = value;
    }

    /// Column-major backing array.
    pub fn as_array(&self) -> &[Fixed; 16] {
        &self.m
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut m = [0; 16];
        for (i, out) in m.iter_mut().enumerate() {
            let row = i & 3;
            let col = i & 12;
            *out = (0..4)
                .map(|j| fixed_mul(self.m[row + j * 4], rhs.m[col + j]))
                .sum();
        }
        Mat4 { m }
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let m = &self.m;
        Vec4::new(
            fixed_mul(v.x, m[0]) + fixed_mul(v.y, m[4]) + fixed_mul(v.z, m[8]) + fixed_mul(v.w, m[12]),
            fixed_mul(v.x, m[1]) + fixed_mul(v.y, m[5]) + fixed_mul(v.z, m[9]) + fixed_mul(v.w, m[13]),
            fixed_mul(v.x, m[2]) + fixed_mul(v.y, m[6]) + fixed_mul(v.z, m[10]) + fixed_mul(v.w, m[14]),
            fixed_mul(v.x, m[3]) + fixed_mul(v.y, m[7]) + fixed_mul(v.z, m[11]) + fixed_mul(v.w, m[15]),
        )
    }
}
