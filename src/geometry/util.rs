//! Geometric utility functions shared by predicates and mesh algorithms.
//!
//! The central piece is the floating-point comparison policy used by every
//! orientation, containment, and circumcircle test in the crate. Two values are
//! considered equal when their absolute difference is below an absolute floor
//! **or** their relative difference is below a relative bound. Routing every
//! sign decision through [`almost_zero`] keeps near-degenerate configurations
//! deterministic: they classify as "on" instead of flickering between inside
//! and outside.

#![forbid(unsafe_code)]

pub mod point_generation;

pub use point_generation::*;

// =============================================================================
// TOLERANCES
// =============================================================================

/// Maximum relative error for two values to be considered equal.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::MAX_RELATIVE_ERROR;
///
/// assert_eq!(MAX_RELATIVE_ERROR, 1e-6);
/// ```
pub const MAX_RELATIVE_ERROR: f64 = 1e-6;

/// Absolute floor below which any difference counts as equality.
///
/// Defined as the square of [`MAX_RELATIVE_ERROR`].
pub const MAX_ABSOLUTE_ERROR: f64 = MAX_RELATIVE_ERROR * MAX_RELATIVE_ERROR;

// =============================================================================
// COMPARISONS
// =============================================================================

/// Determines whether two floating-point numbers can be considered equal.
///
/// Returns `true` if `|a - b|` is below [`MAX_ABSOLUTE_ERROR`], or if the
/// relative difference `|a - b| / max(|a|, |b|)` does not exceed
/// [`MAX_RELATIVE_ERROR`].
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::almost_equal;
///
/// assert!(almost_equal(1.0, 1.0 + 1e-7));
/// assert!(almost_equal(1e6, 1e6 + 0.5));
/// assert!(!almost_equal(1.0, 1.01));
/// ```
#[inline]
#[must_use]
pub fn almost_equal(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    if diff < MAX_ABSOLUTE_ERROR {
        return true;
    }

    let largest = a.abs().max(b.abs());
    diff / largest <= MAX_RELATIVE_ERROR
}

/// Determines whether a floating-point number can be considered zero.
///
/// Equivalent to `almost_equal(a, 0.0)`. Because the relative error of any
/// non-zero value against zero is exactly one, this reduces to the absolute
/// floor in practice.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::almost_zero;
///
/// assert!(almost_zero(0.0));
/// assert!(almost_zero(-1e-13));
/// assert!(!almost_zero(1e-11));
/// ```
#[inline]
#[must_use]
pub fn almost_zero(a: f64) -> bool {
    almost_equal(a, 0.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_almost_equal_absolute_floor() {
        assert!(almost_equal(0.0, 0.0));
        assert!(almost_equal(0.0, 5e-13));
        assert!(almost_equal(-5e-13, 5e-13 / 2.0));
        assert!(!almost_equal(0.0, 1e-11));
    }

    #[test]
    fn test_almost_equal_relative_bound() {
        assert!(almost_equal(1.0, 1.0 + 1e-7));
        assert!(almost_equal(-1000.0, -1000.000_5));
        assert!(!almost_equal(1.0, 1.000_01));
        assert!(!almost_equal(1.0, -1.0));
    }

    #[test]
    fn test_almost_equal_is_symmetric() {
        let pairs = [(1.0, 1.000_000_5), (3.0, 2.999_999), (1e-9, 2e-9), (0.0, 1e-12)];
        for (a, b) in pairs {
            assert_eq!(almost_equal(a, b), almost_equal(b, a), "asymmetric for ({a}, {b})");
        }
    }

    #[test]
    fn test_almost_zero() {
        assert!(almost_zero(0.0));
        assert!(almost_zero(-0.0));
        assert!(almost_zero(9.9e-13));
        assert!(!almost_zero(2e-12));
        assert!(!almost_zero(-1e-6));
    }

    #[test]
    fn test_tolerance_constants() {
        assert!((MAX_ABSOLUTE_ERROR - 1e-12).abs() < 1e-24);
        assert!(MAX_ABSOLUTE_ERROR < MAX_RELATIVE_ERROR);
    }
}
