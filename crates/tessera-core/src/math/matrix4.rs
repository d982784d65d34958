//! General 4x4 matrix with column-major storage.
//!
//! `m[c][r]` addresses column `c`, row `r`. Translation lives in column 3, and
//! every serialization ([`Matrix4::to_cols_array`], [`Matrix4::write_to_slice`])
//! emits column 0 first, which is the layout WGSL `mat4x4<f32>` expects.
//!
//! Composition follows the usual column-vector convention: `a.multiply(&b)`
//! leaves `a * b` in `a`, so `b` is applied to a point first. The in-place
//! [`translate`](Matrix4::translate), [`rotate`](Matrix4::rotate) and
//! [`scale`](Matrix4::scale) helpers post-multiply in the same way.

use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a matrix from 16 floats laid out column by column.
    pub const fn from_cols_array(a: &[f32; 16]) -> Self {
        Self {
            m: [
                [a[0], a[1], a[2], a[3]],
                [a[4], a[5], a[6], a[7]],
                [a[8], a[9], a[10], a[11]],
                [a[12], a[13], a[14], a[15]],
            ],
        }
    }

    pub const fn to_cols_array(&self) -> [f32; 16] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2], m[0][3], m[1][0], m[1][1], m[1][2], m[1][3], m[2][0],
            m[2][1], m[2][2], m[2][3], m[3][0], m[3][1], m[3][2], m[3][3],
        ]
    }

    /// Serialize into `out` in column-major order.
    #[inline]
    pub fn write_to_slice(&self, out: &mut [f32; 16]) {
        *out = self.to_cols_array();
    }

    /// OpenGL-style orthographic projection with a `[0, 1]` depth range.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut matrix = Self::IDENTITY;
        matrix.set_orthographic(left, right, bottom, top, near, far);
        matrix
    }

    /// Overwrite this matrix with an orthographic projection.
    ///
    /// Passing `bottom > top` produces a y-down projection, which is how
    /// [`Camera2D`](../../tessera_render/camera/struct.Camera2D.html) maps screen space.
    pub fn set_orthographic(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.set_identity();
        self.m[0][0] = 2.0 / (right - left);
        self.m[1][1] = 2.0 / (top - bottom);
        self.m[2][2] = 1.0 / (far - near);
        self.m[3][0] = (left + right) / (left - right);
        self.m[3][1] = (bottom + top) / (bottom - top);
        self.m[3][2] = near / (near - far);
    }

    /// Perspective projection from explicit frustum planes.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut matrix = Self::ZERO;
        matrix.m[0][0] = (2.0 * near) / (right - left);
        matrix.m[1][1] = (2.0 * near) / (top - bottom);
        matrix.m[2][0] = (right + left) / (right - left);
        matrix.m[2][1] = (top + bottom) / (top - bottom);
        matrix.m[2][2] = -(far + near) / (far - near);
        matrix.m[2][3] = -1.0;
        matrix.m[3][2] = -(2.0 * far * near) / (far - near);
        matrix
    }

    /// Right-handed perspective projection. `fov_y` is in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let mut matrix = Self::ZERO;
        matrix.m[0][0] = f / aspect;
        matrix.m[1][1] = f;
        matrix.m[2][2] = (far + near) / (near - far);
        matrix.m[2][3] = -1.0;
        matrix.m[3][2] = (2.0 * far * near) / (near - far);
        matrix
    }

    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Zero every element.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    #[inline]
    pub fn set(&mut self, other: &Matrix4) {
        self.m = other.m;
    }

    pub fn add(&mut self, other: &Matrix4) {
        for (col, other_col) in self.m.iter_mut().zip(other.m.iter()) {
            for (a, b) in col.iter_mut().zip(other_col.iter()) {
                *a += *b;
            }
        }
    }

    pub fn subtract(&mut self, other: &Matrix4) {
        for (col, other_col) in self.m.iter_mut().zip(other.m.iter()) {
            for (a, b) in col.iter_mut().zip(other_col.iter()) {
                *a -= *b;
            }
        }
    }

    pub fn multiply_scalar(&mut self, scalar: f32) {
        for value in self.m.iter_mut().flatten() {
            *value *= scalar;
        }
    }

    pub fn negate(&mut self) {
        self.multiply_scalar(-1.0);
    }

    /// `self = self * rhs`.
    ///
    /// The product is built in a local scratch copy, so `rhs` may alias a
    /// snapshot of `self`.
    pub fn multiply(&mut self, rhs: &Matrix4) {
        let a = self.m;
        let b = &rhs.m;
        let mut out = [[0.0f32; 4]; 4];
        for (c, out_col) in out.iter_mut().enumerate() {
            for (r, value) in out_col.iter_mut().enumerate() {
                *value = a[0][r] * b[c][0] + a[1][r] * b[c][1] + a[2][r] * b[c][2] + a[3][r] * b[c][3];
            }
        }
        self.m = out;
    }

    pub fn transpose(&mut self) {
        let src = self.m;
        for (c, col) in self.m.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = src[r][c];
            }
        }
    }

    /// Post-multiply by a translation.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        for r in 0..4 {
            self.m[3][r] += self.m[0][r] * x + self.m[1][r] * y + self.m[2][r] * z;
        }
    }

    /// Post-multiply by a rotation of `angle` radians around the unit axis `(x, y, z)`.
    ///
    /// The axis is not normalized here.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        let rot = [
            [x * x * t + c, x * y * t + z * s, x * z * t - y * s],
            [x * y * t - z * s, y * y * t + c, y * z * t + x * s],
            [x * z * t + y * s, y * z * t - x * s, z * z * t + c],
        ];

        let a = self.m;
        for (j, rot_col) in rot.iter().enumerate() {
            for r in 0..4 {
                self.m[j][r] = a[0][r] * rot_col[0] + a[1][r] * rot_col[1] + a[2][r] * rot_col[2];
            }
        }
    }

    /// Post-multiply by a rotation around +Z, the only axis 2D sprites use.
    #[inline]
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate(angle, 0.0, 0.0, 1.0);
    }

    /// Post-multiply by a non-uniform scale.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        for r in 0..4 {
            self.m[0][r] *= x;
            self.m[1][r] *= y;
            self.m[2][r] *= z;
        }
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.sub_factors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Invert in place using cofactor expansion.
    ///
    /// Works for any invertible matrix, projective ones included. A singular
    /// matrix yields non-finite elements rather than an error; use
    /// [`try_inverse`](Self::try_inverse) when that needs to be detected.
    pub fn invert(&mut self) {
        let inv_det = 1.0 / self.determinant();
        self.m = self.adjugate_scaled(inv_det);
    }

    /// Checked inverse. Returns `None` when the determinant is zero or not finite.
    pub fn try_inverse(&self) -> Option<Matrix4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix4 {
            m: self.adjugate_scaled(1.0 / det),
        })
    }

    /// Transform a point, dividing by `w` when the result is projective.
    pub fn transform_point(&self, x: f32, y: f32, z: f32) -> [f32; 3] {
        let m = &self.m;
        let mut out = [0.0f32; 3];
        for (r, value) in out.iter_mut().enumerate() {
            *value = m[0][r] * x + m[1][r] * y + m[2][r] * z + m[3][r];
        }
        let w = m[0][3] * x + m[1][3] * y + m[2][3] * z + m[3][3];
        if w != 1.0 && w != 0.0 {
            for value in &mut out {
                *value /= w;
            }
        }
        out
    }

    /// 2x2 sub-determinants of the first two and last two columns.
    fn sub_factors(&self) -> ([f32; 6], [f32; 6]) {
        let a = &self.m;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    fn adjugate_scaled(&self, k: f32) -> [[f32; 4]; 4] {
        let a = &self.m;
        let (s, c) = self.sub_factors();

        [
            [
                (a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3]) * k,
                (-a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3]) * k,
                (a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3]) * k,
                (-a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3]) * k,
            ],
            [
                (-a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1]) * k,
                (a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1]) * k,
                (-a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1]) * k,
                (a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1]) * k,
            ],
            [
                (a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0]) * k,
                (-a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0]) * k,
                (a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0]) * k,
                (-a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0]) * k,
            ],
            [
                (-a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0]) * k,
                (a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0]) * k,
                (-a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0]) * k,
                (a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0]) * k,
            ],
        ]
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(mut self, rhs: Matrix4) -> Matrix4 {
        self.multiply(&rhs);
        self
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(value: glam::Mat4) -> Self {
        Self::from_cols_array(&value.to_cols_array())
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(value: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&value.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix4, b: &Matrix4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert!((x - y).abs() < 1e-4, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_identity_default() {
        assert_eq!(Matrix4::default(), Matrix4::IDENTITY);
        assert_eq!(Matrix4::identity().determinant(), 1.0);
    }

    #[test]
    fn test_orthographic_terms() {
        let m = Matrix4::orthographic(-100.0, 300.0, 250.0, -50.0, 0.0, 1.0);
        assert_eq!(m.m[0][0], 2.0 / 400.0);
        assert_eq!(m.m[1][1], 2.0 / -300.0);
        assert_eq!(m.m[2][2], 1.0);
        assert_eq!(m.m[3][0], 200.0 / -400.0);
        assert_eq!(m.m[3][1], 200.0 / 300.0);
        assert_eq!(m.m[3][2], 0.0);
        assert_eq!(m.m[3][3], 1.0);
    }

    #[test]
    fn test_translation_in_last_column() {
        let mut m = Matrix4::identity();
        m.translate(3.0, 4.0, 5.0);
        assert_eq!(&m.to_cols_array()[12..15], &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_multiply_applies_rhs_first() {
        let mut a = Matrix4::identity();
        a.translate(10.0, 0.0, 0.0);
        let mut b = Matrix4::identity();
        b.scale(2.0, 2.0, 1.0);

        a.multiply(&b);
        assert_eq!(a.transform_point(1.0, 1.0, 0.0), [12.0, 2.0, 0.0]);
    }

    #[test]
    fn test_multiply_self_snapshot() {
        let mut m = Matrix4::identity();
        m.translate(1.0, 2.0, 0.0);
        let snapshot = m;
        m.multiply(&snapshot);
        assert_eq!(m.m[3][0], 2.0);
        assert_eq!(m.m[3][1], 4.0);
    }

    #[test]
    fn test_transpose_twice() {
        let mut m = Matrix4::perspective(1.0, 1.5, 0.1, 10.0);
        let original = m;
        m.transpose();
        assert_ne!(m, original);
        m.transpose();
        assert_eq!(m, original);
    }

    #[test]
    fn test_invert_translation() {
        let mut m = Matrix4::identity();
        m.translate(5.0, -3.0, 2.0);
        m.invert();
        assert_close(&m, &{
            let mut e = Matrix4::identity();
            e.translate(-5.0, 3.0, -2.0);
            e
        });
    }

    #[test]
    fn test_singular_matrix() {
        let mut m = Matrix4::ZERO;
        assert!(m.try_inverse().is_none());
        m.invert();
        assert!(m.m.iter().flatten().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_clear_and_arithmetic() {
        let mut m = Matrix4::identity();
        m.add(&Matrix4::IDENTITY);
        assert_eq!(m.m[2][2], 2.0);
        m.subtract(&Matrix4::IDENTITY);
        assert_eq!(m, Matrix4::IDENTITY);
        m.multiply_scalar(3.0);
        m.negate();
        assert_eq!(m.m[1][1], -3.0);
        m.clear();
        assert_eq!(m, Matrix4::ZERO);
    }

    #[test]
    fn test_write_to_slice_column_major() {
        let mut m = Matrix4::identity();
        m.translate(7.0, 8.0, 9.0);
        let mut out = [0.0; 16];
        m.write_to_slice(&mut out);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[12], 7.0);
        assert_eq!(Matrix4::from_cols_array(&out), m);
    }

    #[test]
    fn test_transform_point_projective() {
        let m = Matrix4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
        let p = m.transform_point(0.0, 0.0, -1.0);
        assert!((p[2] + 1.0).abs() < 1e-5);
    }
}
