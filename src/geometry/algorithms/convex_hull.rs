//! Planar convex hull.
//!
//! Andrew's monotone-chain construction over a point set, plus the shoelace
//! polygon area. The hull is used to check triangulation output: the union of
//! the live triangles must cover exactly the hull of the accepted vertices,
//! and the triangle count of a full triangulation is `2n − 2 − k` for `k`
//! hull vertices.

use crate::geometry::point::Point;
use crate::geometry::predicates::{Orientation, simplex_orientation};

/// Computes the convex hull of `points` in counter-clockwise order.
///
/// Collinear points on hull edges are dropped, as are duplicates. Fewer than
/// three distinct non-collinear points produce a hull of one or two points
/// (or none for empty input).
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::algorithms::convex_hull::convex_hull;
/// use delaunay_mesh::geometry::point::Point;
///
/// let hull = convex_hull(&[
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(2.0, 2.0),
///     Point::new(0.0, 2.0),
/// ]);
/// assert_eq!(hull.len(), 4);
/// ```
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
    sorted.dedup_by(|a, b| a.almost_eq(b));

    if sorted.len() < 3 {
        return sorted;
    }

    // Keep only strict left turns.
    let turns_left = |chain: &[Point], p: &Point| {
        let n = chain.len();
        simplex_orientation(&chain[n - 2], &chain[n - 1], p) == Orientation::POSITIVE
    };

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        while lower.len() >= 2 && !turns_left(&lower, p) {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && !turns_left(&upper, p) {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Signed area of a simple polygon by the shoelace formula.
///
/// Positive for counter-clockwise vertex order.
#[must_use]
pub fn polygon_signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .fold(0.0, |acc, (a, b)| a.x().mul_add(b.y(), acc) - b.x() * a.y());
    twice / 2.0
}

/// Area enclosed by the convex hull of `points`.
#[must_use]
pub fn convex_hull_area(points: &[Point]) -> f64 {
    polygon_signed_area(&convex_hull(points)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hull_of_square_with_interior_and_edge_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 0.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(
            hull,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert_relative_eq!(polygon_signed_area(&hull), 100.0);
        assert_relative_eq!(convex_hull_area(&pts), 100.0);
    }

    #[test]
    fn test_hull_of_degenerate_inputs() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[Point::new(1.0, 1.0)]).len(), 1);
        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert_eq!(convex_hull(&collinear).len(), 2);
        assert_relative_eq!(convex_hull_area(&collinear), 0.0);
    }

    #[test]
    fn test_clockwise_polygon_has_negative_area() {
        let cw = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
        ];
        assert_relative_eq!(polygon_signed_area(&cw), -2.0);
    }
}
