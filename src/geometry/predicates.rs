//! Geometric predicates for planar triangulation.
//!
//! This module contains the orientation determinant and the circumcircle
//! construction that every triangle classification and edge-legalization
//! decision is built on. Both are evaluated with closed-form determinants on
//! coordinates translated to the first point; all sign decisions go through
//! [`almost_zero`](crate::geometry::util::almost_zero) so that
//! near-collinear configurations classify as degenerate rather than taking a
//! noisy side.

#![forbid(unsafe_code)]

use crate::geometry::circle::Circle;
use crate::geometry::matrix::{Matrix2, Matrix3};
use crate::geometry::point::Point;
use crate::geometry::util::almost_zero;
use std::fmt;

/// Represents the position of a point relative to a closed shape
/// (triangle or circle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRelation {
    /// The point is strictly inside the shape.
    Inside,
    /// The point is on the boundary of the shape (within numerical tolerance).
    On,
    /// The point is strictly outside the shape.
    Outside,
}

impl fmt::Display for PointRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inside => write!(f, "Inside"),
            Self::On => write!(f, "On"),
            Self::Outside => write!(f, "Outside"),
        }
    }
}

/// Represents the orientation of a point relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The point is to the right of the edge (determinant < 0)
    NEGATIVE,
    /// The point is collinear with the edge (determinant ≈ 0)
    DEGENERATE,
    /// The point is to the left of the edge (determinant > 0)
    POSITIVE,
}

impl Orientation {
    /// Classifies a raw orientation determinant using the tolerance policy.
    #[must_use]
    pub fn from_determinant(det: f64) -> Self {
        if almost_zero(det) {
            Self::DEGENERATE
        } else if det < 0.0 {
            Self::NEGATIVE
        } else {
            Self::POSITIVE
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// The orientation determinant of `p` relative to the directed edge `v1 → v2`.
///
/// Equal to the 3×3 determinant with rows `(x, y, 1)` for `v1`, `v2`, `p`,
/// evaluated as the 2×2 cross product `(v2 − v1) × (p − v1)` so that large
/// coordinate offsets cancel before any product is formed. The value is twice
/// the signed area of the triangle `(v1, v2, p)`: positive when `p` is to the
/// left of the edge, negative when to the right.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::point::Point;
/// use delaunay_mesh::geometry::predicates::orientation;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 0.0);
/// assert!(orientation(&a, &b, &Point::new(0.5, 1.0)) > 0.0);
/// assert!(orientation(&a, &b, &Point::new(0.5, -1.0)) < 0.0);
/// assert_eq!(orientation(&a, &b, &Point::new(2.0, 0.0)), 0.0);
/// ```
#[inline]
#[must_use]
pub fn orientation(v1: &Point, v2: &Point, p: &Point) -> f64 {
    Matrix2::new([
        [v2.x() - v1.x(), v2.y() - v1.y()],
        [p.x() - v1.x(), p.y() - v1.y()],
    ])
    .determinant()
}

/// Classifies `p` against the directed edge `v1 → v2`.
#[inline]
#[must_use]
pub fn simplex_orientation(v1: &Point, v2: &Point, p: &Point) -> Orientation {
    Orientation::from_determinant(orientation(v1, v2, p))
}

/// Signed area of the triangle `(v1, v2, v3)`; positive when counter-clockwise.
#[inline]
#[must_use]
pub fn signed_area(v1: &Point, v2: &Point, v3: &Point) -> f64 {
    orientation(v1, v2, v3) / 2.0
}

/// The circle through `v1`, `v2`, `v3`.
///
/// The corners are first translated so that `v1` is the origin. With
/// `a = 2 · signed_area` the relative center is `(-bx / 2a, -by / 2a)`, where
/// `bx` and `by` are the 3×3 determinants built from `(x² + y², y, 1)` and
/// `(x² + y², x, 1)`; the radius is its distance to the origin. The center is
/// then translated back by `v1`.
///
/// A triangle whose doubled area is almost zero yields the sentinel circle
/// centered at the origin with radius zero. Such a circle contains no other
/// point strictly inside, so degenerate triangles never trigger a flip.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::point::Point;
/// use delaunay_mesh::geometry::predicates::circumcircle;
///
/// let c = circumcircle(
///     &Point::new(0.0, 0.0),
///     &Point::new(2.0, 0.0),
///     &Point::new(0.0, 2.0),
/// );
/// assert!((c.center().x() - 1.0).abs() < 1e-12);
/// assert!((c.center().y() - 1.0).abs() < 1e-12);
/// assert!((c.radius() - 2.0_f64.sqrt()).abs() < 1e-12);
///
/// let degenerate = circumcircle(
///     &Point::new(0.0, 0.0),
///     &Point::new(1.0, 0.0),
///     &Point::new(2.0, 0.0),
/// );
/// assert_eq!(degenerate.radius(), 0.0);
/// ```
#[must_use]
pub fn circumcircle(v1: &Point, v2: &Point, v3: &Point) -> Circle {
    let a = orientation(v1, v2, v3);
    if almost_zero(a) {
        return Circle::DEGENERATE;
    }

    // v1 sits at the origin: its row reduces to (0, 0, 1).
    let (x2, y2) = (v2.x() - v1.x(), v2.y() - v1.y());
    let (x3, y3) = (v3.x() - v1.x(), v3.y() - v1.y());
    let s2 = x2.mul_add(x2, y2 * y2);
    let s3 = x3.mul_add(x3, y3 * y3);

    let bx = -Matrix3::new([
        [0.0, 0.0, 1.0],
        [s2, y2, 1.0],
        [s3, y3, 1.0],
    ])
    .determinant();
    let by = Matrix3::new([
        [0.0, 0.0, 1.0],
        [s2, x2, 1.0],
        [s3, x3, 1.0],
    ])
    .determinant();

    let (cx, cy) = (-bx / (2.0 * a), -by / (2.0 * a));
    let center = Point::new(v1.x() + cx, v1.y() + cy);
    Circle::new(center, cx.hypot(cy))
}
