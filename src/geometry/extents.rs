//! Running axis-aligned bounding box.
//!
//! [`Extents`] accumulates the bounds of every point added to a mesh. It is
//! used to size the enclosing super-triangle and only ever grows.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use std::fmt;

/// An axis-aligned bounding box that grows as points are added.
///
/// A freshly created box is empty: its minimums are `f64::MAX` and its
/// maximums `f64::MIN`, so the first [`add`](Self::add) sets all four bounds.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::extents::Extents;
///
/// let mut ex = Extents::new();
/// assert!(ex.is_empty());
/// ex.add(1.0, 2.0);
/// ex.add(-3.0, 5.0);
/// assert_eq!(ex.width(), 4.0);
/// assert_eq!(ex.height(), 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Default for Extents {
    fn default() -> Self {
        Self::new()
    }
}

impl Extents {
    /// Creates an empty box.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x_min: f64::MAX,
            y_min: f64::MAX,
            x_max: f64::MIN,
            y_max: f64::MIN,
        }
    }

    /// Creates a box containing only `(x, y)`.
    #[must_use]
    pub fn from_point(x: f64, y: f64) -> Self {
        let mut ex = Self::new();
        ex.add(x, y);
        ex
    }

    /// Grows the box to include `(x, y)`.
    pub fn add(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    /// Grows the box to include `p`.
    pub fn add_point(&mut self, p: &Point) {
        self.add(p.x(), p.y());
    }

    /// Returns a copy grown by `dx` on the left and right and by `dy` on the
    /// bottom and top.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::geometry::extents::Extents;
    ///
    /// let ex = Extents::from_point(0.0, 0.0).offset(1.0, 2.0);
    /// assert_eq!(ex.x_min(), -1.0);
    /// assert_eq!(ex.y_max(), 2.0);
    /// ```
    #[must_use]
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        let mut ex = Self::new();
        ex.add(self.x_min - dx, self.y_min - dy);
        ex.add(self.x_max + dx, self.y_max + dy);
        ex
    }

    /// Returns `true` if no point has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Returns `true` if `p` lies within the closed box.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x()) && (self.y_min..=self.y_max).contains(&p.y())
    }

    /// Minimum X.
    #[must_use]
    pub const fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Minimum Y.
    #[must_use]
    pub const fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum X.
    #[must_use]
    pub const fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Maximum Y.
    #[must_use]
    pub const fn y_max(&self) -> f64 {
        self.y_max
    }

    /// `x_max − x_min`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// `y_max − y_min`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} ~ {:.2}, {:.2} ~ {:.2}",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
