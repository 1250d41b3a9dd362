//! Planar displacement vectors.
//!
//! A [`Vector`] is the difference of two [`Point`](crate::geometry::point::Point)s.
//! It carries no position of its own; edge directions, edge lengths, and the
//! length-normalized orientation used by the point-location walk are all
//! computed from vectors.

#![forbid(unsafe_code)]

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A two-dimensional displacement.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::vector::Vector;
///
/// let v = Vector::new(3.0, 4.0);
/// assert!((v.length() - 5.0).abs() < 1e-12);
/// assert_eq!(v.length_squared(), 25.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    x: f64,
    y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// The unit vector along the X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    /// The unit vector along the Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The X component.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The Y component.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The squared magnitude.
    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x.mul_add(self.x, self.y * self.y)
    }

    /// The magnitude.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the vector scaled to unit length.
    ///
    /// The zero vector has no direction and is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::geometry::vector::Vector;
    ///
    /// let n = Vector::new(0.0, 2.0).normalize();
    /// assert_eq!(n, Vector::UNIT_Y);
    /// assert_eq!(Vector::ZERO.normalize(), Vector::ZERO);
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len == 0.0 { *self } else { *self / len }
    }

    /// The left-hand normal: the vector rotated a quarter turn counter-clockwise.
    ///
    /// For a counter-clockwise triangle edge this points into the triangle.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// The dot product.
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// The z component of the three-dimensional cross product.
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> f64 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }

    /// The component-wise mean of the given vectors, or zero for an empty slice.
    #[must_use]
    pub fn average(vectors: &[Self]) -> Self {
        if vectors.is_empty() {
            return Self::ZERO;
        }
        let sum = vectors.iter().fold(Self::ZERO, |acc, v| acc + *v);
        #[expect(clippy::cast_precision_loss, reason = "vector counts are small")]
        let n = vectors.len() as f64;
        sum / n
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        assert_eq!(a + b, Vector::new(4.0, 1.0));
        assert_eq!(a - b, Vector::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector::new(1.5, -0.5));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
    }

    #[test]
    fn test_vector_length_and_normalize() {
        let v = Vector::new(-6.0, 8.0);
        assert_relative_eq!(v.length(), 10.0);
        let n = v.normalize();
        assert_relative_eq!(n.length(), 1.0);
        assert_relative_eq!(n.x(), -0.6);
        assert_relative_eq!(n.y(), 0.8);
    }

    #[test]
    fn test_vector_normal_points_left() {
        let edge = Vector::new(1.0, 0.0);
        assert_eq!(edge.normal(), Vector::new(0.0, 1.0));
        assert!(edge.cross(&edge.normal()) > 0.0);
        assert_relative_eq!(edge.dot(&edge.normal()), 0.0);
    }

    #[test]
    fn test_vector_average() {
        let avg = Vector::average(&[Vector::new(0.0, 0.0), Vector::new(2.0, 4.0)]);
        assert_eq!(avg, Vector::new(1.0, 2.0));
        assert_eq!(Vector::average(&[]), Vector::ZERO);
    }

    #[test]
    fn test_vector_display() {
        assert_eq!(Vector::new(1.0, 2.5).to_string(), "1.00, 2.50");
    }
}
