//! Circles.
//!
//! Used as the circumscribed circle of a triangle. Containment is the
//! empty-circumcircle test that drives edge legalization.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use crate::geometry::predicates::PointRelation;
use crate::geometry::util::almost_zero;
use std::f64::consts::PI;
use std::fmt;

/// A circle given by center and radius.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::circle::Circle;
/// use delaunay_mesh::geometry::point::Point;
/// use delaunay_mesh::geometry::predicates::PointRelation;
///
/// let c = Circle::new(Point::new(0.0, 0.0), 5.0);
/// assert_eq!(c.contains(&Point::new(3.0, 4.0)), PointRelation::On);
/// assert_eq!(c.contains(&Point::new(1.0, 1.0)), PointRelation::Inside);
/// assert_eq!(c.contains(&Point::new(6.0, 0.0)), PointRelation::Outside);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Zero-radius circle at the origin, the circumcircle of a degenerate triangle.
    pub const DEGENERATE: Self = Self::new(Point::ORIGIN, 0.0);

    /// Creates a circle.
    #[inline]
    #[must_use]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The center.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// The radius.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// The diameter.
    #[inline]
    #[must_use]
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    /// The enclosed area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// The circumference.
    #[inline]
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Classifies `p` by the sign of `|p − center| − radius`.
    ///
    /// A difference that is [`almost_zero`] is `On`; negative is `Inside`.
    #[must_use]
    pub fn contains(&self, p: &Point) -> PointRelation {
        let dist = p.distance_to(&self.center) - self.radius;
        if almost_zero(dist) {
            PointRelation::On
        } else if dist < 0.0 {
            PointRelation::Inside
        } else {
            PointRelation::Outside
        }
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, R = {:.2}", self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_measures() {
        let c = Circle::new(Point::new(1.0, -1.0), 2.0);
        assert_relative_eq!(c.diameter(), 4.0);
        assert_relative_eq!(c.area(), 4.0 * PI);
        assert_relative_eq!(c.perimeter(), 4.0 * PI);
        assert_eq!(c.to_string(), "1.00, -1.00, R = 2.00");
    }

    #[test]
    fn test_circle_contains_boundary_is_on() {
        let c = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert_eq!(c.contains(&Point::new(10.0, 0.0)), PointRelation::On);
        assert_eq!(c.contains(&Point::new(0.0, -10.0)), PointRelation::On);
        assert_eq!(c.contains(&Point::new(6.0, 8.0)), PointRelation::On);
        assert_eq!(c.contains(&Point::new(9.999, 0.0)), PointRelation::Inside);
        assert_eq!(c.contains(&Point::new(10.001, 0.0)), PointRelation::Outside);
    }

    #[test]
    fn test_degenerate_circle_contains_only_center() {
        let c = Circle::DEGENERATE;
        assert_eq!(c.contains(&Point::ORIGIN), PointRelation::On);
        assert_eq!(c.contains(&Point::new(1e-3, 0.0)), PointRelation::Outside);
    }
}
