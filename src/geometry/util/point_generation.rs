//! Point generation functions.
//!
//! Utilities for producing reproducible planar point sets for tests,
//! benchmarks, and demos: uniformly random clouds drawn from a seeded RNG and
//! regular grids.

use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::geometry::point::Point;

/// Errors that can occur while generating point sets.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::PointGenerationError;
///
/// let err = PointGenerationError::InvalidRange { min: 1.0, max: 0.0 };
/// assert!(matches!(err, PointGenerationError::InvalidRange { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PointGenerationError {
    /// The coordinate range is empty or inverted.
    #[error("Invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange {
        /// Lower bound of the requested range.
        min: f64,
        /// Upper bound of the requested range.
        max: f64,
    },
    /// Grid generation was asked for zero points per axis.
    #[error("Invalid point count: {count} points per axis")]
    InvalidPointCount {
        /// The rejected count.
        count: usize,
    },
    /// Grid spacing is not a positive finite number.
    #[error("Invalid spacing: {spacing}")]
    InvalidSpacing {
        /// The rejected spacing.
        spacing: f64,
    },
}

fn validate_range(range: (f64, f64)) -> Result<(), PointGenerationError> {
    if range.0.is_finite() && range.1.is_finite() && range.0 < range.1 {
        Ok(())
    } else {
        Err(PointGenerationError::InvalidRange {
            min: range.0,
            max: range.1,
        })
    }
}

/// Generate uniformly random points with a seeded RNG for reproducible results.
///
/// Both coordinates are drawn from the half-open interval `range.0..range.1`.
///
/// # Errors
///
/// * `PointGenerationError::InvalidRange` if `min >= max` or either bound is not finite
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::generate_random_points_seeded;
///
/// let a = generate_random_points_seeded(100, (-5.0, 5.0), 42).unwrap();
/// let b = generate_random_points_seeded(100, (-5.0, 5.0), 42).unwrap();
/// assert_eq!(a, b);
///
/// let c = generate_random_points_seeded(100, (-5.0, 5.0), 7).unwrap();
/// assert_ne!(a, c);
/// ```
pub fn generate_random_points_seeded(
    n_points: usize,
    range: (f64, f64),
    seed: u64,
) -> Result<Vec<Point>, PointGenerationError> {
    validate_range(range)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let points = (0..n_points)
        .map(|_| {
            let x = rng.random_range(range.0..range.1);
            let y = rng.random_range(range.0..range.1);
            Point::new(x, y)
        })
        .collect();

    Ok(points)
}

/// Generate points arranged on a regular square grid.
///
/// Produces `points_per_axis²` points starting at `offset` and stepping by
/// `spacing` along both axes, row by row.
///
/// # Errors
///
/// * `PointGenerationError::InvalidPointCount` if `points_per_axis` is zero
/// * `PointGenerationError::InvalidSpacing` if `spacing` is not positive and finite
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::generate_grid_points;
///
/// let grid = generate_grid_points(4, 1.0, (0.0, 0.0)).unwrap();
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid[5].x(), 1.0);
/// assert_eq!(grid[5].y(), 1.0);
/// ```
pub fn generate_grid_points(
    points_per_axis: usize,
    spacing: f64,
    offset: (f64, f64),
) -> Result<Vec<Point>, PointGenerationError> {
    if points_per_axis == 0 {
        return Err(PointGenerationError::InvalidPointCount {
            count: points_per_axis,
        });
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(PointGenerationError::InvalidSpacing { spacing });
    }

    let mut points = Vec::with_capacity(points_per_axis * points_per_axis);
    let mut y = offset.1;
    for _ in 0..points_per_axis {
        let mut x = offset.0;
        for _ in 0..points_per_axis {
            points.push(Point::new(x, y));
            x += spacing;
        }
        y += spacing;
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_points_within_range() {
        let points = generate_random_points_seeded(500, (-2.0, 3.0), 17).unwrap();
        assert_eq!(points.len(), 500);
        for p in &points {
            assert!((-2.0..3.0).contains(&p.x()), "x out of range: {p:?}");
            assert!((-2.0..3.0).contains(&p.y()), "y out of range: {p:?}");
        }
    }

    #[test]
    fn test_random_points_rejects_inverted_range() {
        let err = generate_random_points_seeded(10, (1.0, 1.0), 0).unwrap_err();
        assert!(matches!(err, PointGenerationError::InvalidRange { .. }));
        assert!(generate_random_points_seeded(10, (f64::NAN, 1.0), 0).is_err());
    }

    #[test]
    fn test_grid_points_layout() {
        let grid = generate_grid_points(3, 2.0, (1.0, -1.0)).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], Point::new(1.0, -1.0));
        assert_eq!(grid[2], Point::new(5.0, -1.0));
        assert_eq!(grid[8], Point::new(5.0, 3.0));
    }

    #[test]
    fn test_grid_points_rejects_bad_parameters() {
        assert!(matches!(
            generate_grid_points(0, 1.0, (0.0, 0.0)),
            Err(PointGenerationError::InvalidPointCount { count: 0 })
        ));
        assert!(matches!(
            generate_grid_points(2, -1.0, (0.0, 0.0)),
            Err(PointGenerationError::InvalidSpacing { .. })
        ));
    }
}
