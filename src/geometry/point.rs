//! Planar points.
//!
//! A [`Point`] is an immutable pair of `f64` coordinates. Equality on `Point`
//! is exact (bitwise on the values, IEEE semantics); tolerance-aware
//! comparison is available through [`Point::almost_eq`] and is what the mesh
//! uses when matching locations.

#![forbid(unsafe_code)]

use super::util::almost_equal;
use super::vector::Vector;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised when building a point from raw coordinates.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PointError {
    /// A coordinate is `NaN` or infinite.
    #[error("Non-finite coordinate at index {index}: {value}")]
    NonFiniteCoordinate {
        /// Index of the offending coordinate (0 = x, 1 = y).
        index: usize,
        /// The offending value.
        value: f64,
    },
}

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A location in the plane.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::point::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The X coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The Y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The coordinates as an array.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    /// Returns `true` if both coordinates are [`almost_equal`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::geometry::point::Point;
    ///
    /// let p = Point::new(1.0, 2.0);
    /// assert!(p.almost_eq(&Point::new(1.0 + 1e-9, 2.0)));
    /// assert!(!p.almost_eq(&Point::new(1.1, 2.0)));
    /// ```
    #[inline]
    #[must_use]
    pub fn almost_eq(&self, other: &Self) -> bool {
        almost_equal(self.x, other.x) && almost_equal(self.y, other.y)
    }

    /// The centroid of the given points, or the origin for an empty slice.
    #[must_use]
    pub fn average(points: &[Self]) -> Self {
        if points.is_empty() {
            return Self::ORIGIN;
        }
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        #[expect(clippy::cast_precision_loss, reason = "point counts are small")]
        let n = points.len() as f64;
        Self::new(sx / n, sy / n)
    }
}

// =============================================================================
// ARITHMETIC
// =============================================================================

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, rhs: Vector) -> Self {
        Self::new(self.x + rhs.x(), self.y + rhs.y())
    }
}

impl Sub<Vector> for Point {
    type Output = Self;

    fn sub(self, rhs: Vector) -> Self {
        Self::new(self.x - rhs.x(), self.y - rhs.y())
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl TryFrom<[f64; 2]> for Point {
    type Error = PointError;

    /// Builds a point, rejecting `NaN` and infinite coordinates.
    fn try_from(coords: [f64; 2]) -> Result<Self, Self::Error> {
        for (index, value) in coords.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(PointError::NonFiniteCoordinate { index, value });
            }
        }
        Ok(Self::new(coords[0], coords[1]))
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        p.coords()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_vector_arithmetic() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(b - a, Vector::new(3.0, 4.0));
        assert_eq!(a + Vector::new(3.0, 4.0), b);
        assert_eq!(b - Vector::new(3.0, 4.0), a);
        assert_relative_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_point_average() {
        let c = Point::average(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        ]);
        assert_relative_eq!(c.x(), 1.0);
        assert_relative_eq!(c.y(), 1.0);
        assert_eq!(Point::average(&[]), Point::ORIGIN);
    }

    #[test]
    fn test_point_try_from_rejects_non_finite() {
        assert_eq!(Point::try_from([1.0, 2.0]), Ok(Point::new(1.0, 2.0)));
        assert!(matches!(
            Point::try_from([1.0, f64::NAN]),
            Err(PointError::NonFiniteCoordinate { index: 1, .. })
        ));
        assert!(matches!(
            Point::try_from([f64::INFINITY, 0.0]),
            Err(PointError::NonFiniteCoordinate { index: 0, .. })
        ));
    }

    #[test]
    fn test_point_equality_is_exact() {
        let p = Point::new(1.0, 2.0);
        let q = Point::new(1.0 + 1e-9, 2.0);
        assert_ne!(p, q);
        assert!(p.almost_eq(&q));
        assert_eq!(<[f64; 2]>::from(p), [1.0, 2.0]);
        assert_eq!(p.to_string(), "1.00, 2.00");
    }
}
