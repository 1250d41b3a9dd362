//! Matrix operations.
//!
//! This module provides small, stack-allocated 2×2 and 3×3 matrices whose
//! closed-form determinants drive the orientation and circumcircle predicates.
//! The determinant is evaluated by cofactor expansion along the first row, in
//! a fixed operation order, so identical inputs always produce bit-identical
//! predicate values.

#![forbid(unsafe_code)]

use std::ops::{Add, Mul, Sub};

// =============================================================================
// MATRIX2
// =============================================================================

/// A row-major 2×2 matrix.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::matrix::Matrix2;
///
/// let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(m.determinant(), -2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2 {
    rows: [[f64; 2]; 2],
}

impl Matrix2 {
    /// The zero matrix.
    pub const ZERO: Self = Self::new([[0.0; 2]; 2]);
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([[1.0, 0.0], [0.0, 1.0]]);

    /// Creates a matrix from its rows.
    #[inline]
    #[must_use]
    pub const fn new(rows: [[f64; 2]; 2]) -> Self {
        Self { rows }
    }

    /// Returns the element at `row`, `col`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The rows of the matrix.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> &[[f64; 2]; 2] {
        &self.rows
    }

    /// The determinant `a11·a22 − a21·a12`.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let [[a11, a12], [a21, a22]] = self.rows;
        a11 * a22 - a21 * a12
    }

    /// Multiplies every element by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.rows.map(|row| row.map(|v| v * s)))
    }
}

impl Add for Matrix2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.rows;
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v += rhs.rows[r][c];
            }
        }
        Self::new(out)
    }
}

impl Sub for Matrix2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.scale(-1.0)
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = self.rows;
        let b = rhs.rows;
        Self::new([
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ])
    }
}

// =============================================================================
// MATRIX3
// =============================================================================

/// A row-major 3×3 matrix.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::matrix::Matrix3;
///
/// // Rows (x, y, 1) of a counter-clockwise unit triangle.
/// let m = Matrix3::new([[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
/// assert_eq!(m.determinant(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// The zero matrix.
    pub const ZERO: Self = Self::new([[0.0; 3]; 3]);
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Creates a matrix from its rows.
    #[inline]
    #[must_use]
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Returns the element at `row`, `col`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The rows of the matrix.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    /// The determinant by cofactor expansion along the first row.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let [[a11, a12, a13], [a21, a22, a23], [a31, a32, a33]] = self.rows;
        a11 * (a22 * a33 - a32 * a23) - a12 * (a21 * a33 - a31 * a23)
            + a13 * (a21 * a32 - a31 * a22)
    }

    /// The 2×2 minor obtained by deleting `row` and `col`.
    ///
    /// Returns `None` when either index is out of bounds.
    #[must_use]
    pub fn minor(&self, row: usize, col: usize) -> Option<Matrix2> {
        if row > 2 || col > 2 {
            return None;
        }
        let mut out = [[0.0; 2]; 2];
        let kept_rows = (0..3).filter(|&r| r != row);
        for (i, r) in kept_rows.enumerate() {
            let kept_cols = (0..3).filter(|&c| c != col);
            for (j, c) in kept_cols.enumerate() {
                out[i][j] = self.rows[r][c];
            }
        }
        Some(Matrix2::new(out))
    }

    /// Multiplies every element by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.rows.map(|row| row.map(|v| v * s)))
    }
}

impl Add for Matrix3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.rows;
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v += rhs.rows[r][c];
            }
        }
        Self::new(out)
    }
}

impl Sub for Matrix3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.scale(-1.0)
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (0..3).map(|k| self.rows[r][k] * rhs.rows[k][c]).sum();
            }
        }
        Self::new(out)
    }
}
