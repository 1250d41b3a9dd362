//! Mesh vertices.
//!
//! A [`Vertex`] is an immutable planar position with an ordered list of scalar
//! attributes and two provenance flags. Attributes play no part in the
//! triangulation itself; when a vertex is synthesized between two others its
//! attributes are linearly interpolated along the segment.
//!
//! # Examples
//!
//! ```rust
//! use delaunay_mesh::core::vertex::Vertex;
//! use delaunay_mesh::vertex;
//!
//! let plain: Vertex = vertex!(1.0, 2.0);
//! let with_attributes: Vertex = vertex!(1.0, 2.0; 10.0, 0.5);
//! assert_eq!(plain, with_attributes);
//! assert_eq!(with_attributes.attributes(), &[10.0, 0.5]);
//! ```

#![forbid(unsafe_code)]

use crate::core::collections::AttributeBuffer;
use crate::geometry::point::{Point, PointError};
use crate::geometry::util::almost_zero;
use std::fmt;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while constructing a vertex.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::vertex::{Vertex, VertexError};
///
/// let err = Vertex::try_new(f64::NAN, 0.0, &[]).unwrap_err();
/// assert!(matches!(err, VertexError::NonFiniteCoordinate { index: 0, .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VertexError {
    /// A coordinate is `NaN` or infinite.
    #[error("Non-finite coordinate at index {index}: {value}")]
    NonFiniteCoordinate {
        /// Index of the offending coordinate (0 = x, 1 = y).
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// An attribute is `NaN` or infinite.
    #[error("Non-finite attribute at index {index}: {value}")]
    NonFiniteAttribute {
        /// Index of the offending attribute.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

impl From<PointError> for VertexError {
    fn from(err: PointError) -> Self {
        match err {
            PointError::NonFiniteCoordinate { index, value } => {
                Self::NonFiniteCoordinate { index, value }
            }
        }
    }
}

// =============================================================================
// CONVENIENCE MACROS
// =============================================================================

/// Creates a [`Vertex`] through [`VertexBuilder`].
///
/// `vertex!(x, y)` builds a vertex without attributes;
/// `vertex!(x, y; a0, a1, ...)` attaches attributes.
///
/// # Panics
///
/// Panics if a coordinate or attribute is not finite.
///
/// # Usage
///
/// ```rust
/// use delaunay_mesh::vertex;
///
/// let v = vertex!(3.0, 4.0; 1.5);
/// assert_eq!(v.x(), 3.0);
/// assert_eq!(v.attributes(), &[1.5]);
/// ```
#[macro_export]
macro_rules! vertex {
    ($x:expr, $y:expr) => {
        $crate::core::vertex::VertexBuilder::default()
            .point($crate::geometry::point::Point::new($x, $y))
            .build()
            .expect("Failed to build vertex: non-finite coordinates")
    };

    ($x:expr, $y:expr; $($attr:expr),+ $(,)?) => {
        $crate::core::vertex::VertexBuilder::default()
            .point($crate::geometry::point::Point::new($x, $y))
            .attributes([$($attr),+])
            .build()
            .expect("Failed to build vertex: non-finite coordinates or attributes")
    };
}

pub use crate::vertex;

// =============================================================================
// VERTEX STRUCT DEFINITION
// =============================================================================

#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
/// A planar vertex with optional scalar attributes.
///
/// # Properties
///
/// - **`point`**: the position
/// - **`attributes`**: ordered scalar attributes, interpolated along edges
/// - **`is_super_vertex`**: corner of the enclosing super-triangle
/// - **`is_input_vertex`**: accepted into the mesh from the input set
///
/// Equality compares positions only, using the tolerance policy of
/// [`almost_equal`](crate::geometry::util::almost_equal).
pub struct Vertex {
    /// The position of the vertex.
    point: Point,
    /// Scalar attributes carried by the vertex.
    #[builder(setter(custom), default)]
    attributes: AttributeBuffer,
    /// Set for the three corners of the super-triangle.
    #[builder(setter(skip), default = "false")]
    is_super_vertex: bool,
    /// Set once the vertex has been accepted into a mesh.
    #[builder(setter(skip), default = "false")]
    is_input_vertex: bool,
}

impl VertexBuilder {
    /// Sets the attributes from any iterator of scalars.
    pub fn attributes<I>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.attributes = Some(attributes.into_iter().collect());
        self
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(point) = self.point.filter(|p| !p.is_finite()) {
            return Err(format!("non-finite coordinates: ({point})"));
        }
        let bad_attribute = self
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.iter().find(|a| !a.is_finite()));
        if let Some(bad) = bad_attribute {
            return Err(format!("non-finite attribute: {bad}"));
        }
        Ok(())
    }
}

impl Vertex {
    /// Creates a vertex from validated coordinates and attributes.
    ///
    /// # Errors
    ///
    /// * `VertexError::NonFiniteCoordinate` if `x` or `y` is `NaN` or infinite
    /// * `VertexError::NonFiniteAttribute` if any attribute is `NaN` or infinite
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::core::vertex::Vertex;
    ///
    /// let v = Vertex::try_new(1.0, 2.0, &[0.25]).unwrap();
    /// assert_eq!(v.attributes(), &[0.25]);
    /// assert!(!v.is_input_vertex());
    /// ```
    pub fn try_new(x: f64, y: f64, attributes: &[f64]) -> Result<Self, VertexError> {
        let point = Point::try_from([x, y])?;
        if let Some((index, &value)) = attributes.iter().enumerate().find(|(_, a)| !a.is_finite()) {
            return Err(VertexError::NonFiniteAttribute { index, value });
        }
        Ok(Self {
            point,
            attributes: attributes.iter().copied().collect(),
            is_super_vertex: false,
            is_input_vertex: false,
        })
    }

    /// Creates a vertex without attributes at `point`.
    #[must_use]
    pub fn from_point(point: Point) -> Self {
        Self {
            point,
            attributes: AttributeBuffer::new(),
            is_super_vertex: false,
            is_input_vertex: false,
        }
    }

    /// Creates a super-triangle corner.
    #[must_use]
    pub(crate) fn super_vertex(point: Point) -> Self {
        Self {
            is_super_vertex: true,
            ..Self::from_point(point)
        }
    }

    /// Returns a copy flagged as accepted into the mesh.
    #[must_use]
    pub(crate) fn into_accepted(self) -> Self {
        Self {
            is_input_vertex: true,
            ..self
        }
    }

    /// The position.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point {
        self.point
    }

    /// The X coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.point.x()
    }

    /// The Y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.point.y()
    }

    /// The attributes in insertion order.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[f64] {
        &self.attributes
    }

    /// Whether this is a corner of the super-triangle.
    #[inline]
    #[must_use]
    pub const fn is_super_vertex(&self) -> bool {
        self.is_super_vertex
    }

    /// Whether this vertex has been accepted into a mesh.
    #[inline]
    #[must_use]
    pub const fn is_input_vertex(&self) -> bool {
        self.is_input_vertex
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.point.distance_to(&other.point)
    }

    /// Linearly interpolates an attribute along the segment `a → b`.
    ///
    /// The parameter is the distance of `at` from `a` divided by the length of
    /// the segment. When `a` and `b` coincide the mean of the two values is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::core::vertex::Vertex;
    /// use delaunay_mesh::geometry::point::Point;
    /// use delaunay_mesh::vertex;
    ///
    /// let a = vertex!(0.0, 0.0);
    /// let b = vertex!(10.0, 0.0);
    /// let z = Vertex::interpolate_attribute(&a, &b, 2.0, 4.0, &Point::new(5.0, 0.0));
    /// assert!((z - 3.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn interpolate_attribute(a: &Self, b: &Self, a_value: f64, b_value: f64, at: &Point) -> f64 {
        let length = a.distance_to(b);
        if almost_zero(length) {
            return f64::midpoint(a_value, b_value);
        }
        let t = at.distance_to(&a.point) / length;
        t.mul_add(b_value - a_value, a_value)
    }

    /// Creates a vertex at `at` whose attributes are interpolated between `a`
    /// and `b`.
    ///
    /// Only attribute indices present on both endpoints are carried over.
    #[must_use]
    pub fn interpolate_between(a: &Self, b: &Self, at: Point) -> Self {
        let attributes = a
            .attributes
            .iter()
            .zip(b.attributes.iter())
            .map(|(&av, &bv)| Self::interpolate_attribute(a, b, av, bv, &at))
            .collect();
        Self {
            attributes,
            ..Self::from_point(at)
        }
    }

    /// The centroid of the given vertices, or the origin for an empty slice.
    #[must_use]
    pub fn average(vertices: &[Self]) -> Point {
        let points: Vec<Point> = vertices.iter().map(Self::point).collect();
        Point::average(&points)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.point.almost_eq(&other.point)
    }
}

impl From<&Vertex> for Point {
    fn from(v: &Vertex) -> Self {
        v.point
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.point)
    }
}

// =============================================================================
// TESTS
// =============================================================================
