//! Triangles of the mesh.
//!
//! A [`Triangle`] stores its three vertex keys in counter-clockwise order,
//! copies of their positions, the opposite link of each side, and geometry
//! derived once at construction: signed area, circumcircle, centroid and
//! minimum interior angle. Apart from the opposite links a triangle never
//! changes; splits and flips replace triangles instead of editing them.
//!
//! [`Triangle::classify`] is the point-in-triangle predicate shared by point
//! location and insertion. It reports whether the point is inside, on, or
//! outside the triangle, which vertex or side it lies on, and the side to
//! cross when walking towards it.

#![forbid(unsafe_code)]

use crate::core::halfedge::{EdgeSide, Halfedge};
use crate::core::triangle_collection::{TriangleKey, VertexKey};
use crate::core::vertex::Vertex;
use crate::geometry::circle::Circle;
use crate::geometry::point::Point;
use crate::geometry::predicates::{PointRelation, circumcircle, orientation};
use crate::geometry::util::almost_zero;
use std::fmt;

// =============================================================================
// POINT LOCATION ON A TRIANGLE
// =============================================================================

/// Where on a triangle's boundary a point lies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointLocation {
    /// Not on the boundary.
    None,
    /// On the first vertex.
    OnV1,
    /// On the second vertex.
    OnV2,
    /// On the third vertex.
    OnV3,
    /// On the side `V1 → V2`.
    OnS12,
    /// On the side `V2 → V3`.
    OnS23,
    /// On the side `V3 → V1`.
    OnS31,
}

impl PointLocation {
    /// The side the point lies on, if it lies on a side interior.
    #[must_use]
    pub const fn side(self) -> Option<EdgeSide> {
        match self {
            Self::OnS12 => Some(EdgeSide::S12),
            Self::OnS23 => Some(EdgeSide::S23),
            Self::OnS31 => Some(EdgeSide::S31),
            _ => None,
        }
    }

    /// Index of the vertex the point coincides with.
    #[must_use]
    pub const fn vertex_index(self) -> Option<usize> {
        match self {
            Self::OnV1 => Some(0),
            Self::OnV2 => Some(1),
            Self::OnV3 => Some(2),
            _ => None,
        }
    }

    /// Whether the point coincides with a vertex.
    #[must_use]
    pub const fn is_vertex(self) -> bool {
        self.vertex_index().is_some()
    }

    /// Whether the point lies on a side but not on a vertex.
    #[must_use]
    pub const fn is_side(self) -> bool {
        self.side().is_some()
    }

    const fn on_side(side: EdgeSide) -> Self {
        match side {
            EdgeSide::S12 => Self::OnS12,
            EdgeSide::S23 => Self::OnS23,
            EdgeSide::S31 => Self::OnS31,
        }
    }

    const fn on_vertex(index: usize) -> Self {
        match index {
            0 => Self::OnV1,
            1 => Self::OnV2,
            _ => Self::OnV3,
        }
    }
}

/// The result of [`Triangle::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Inside, on the boundary of, or outside the triangle.
    pub relation: PointRelation,
    /// Which vertex or side the point lies on; `None` unless `relation` is `On`.
    pub location: PointLocation,
    /// The side to cross when the point is outside, the nearest side when it
    /// is inside, or the side it lies on.
    pub closest_side: EdgeSide,
}

// =============================================================================
// TRIANGLE
// =============================================================================

/// A counter-clockwise triangle with cached geometry.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [VertexKey; 3],
    points: [Point; 3],
    opposite: [Option<Halfedge>; 3],
    signed_area: f64,
    circumcircle: Circle,
    centroid: Point,
    min_angle: f64,
    is_super: bool,
    removed: bool,
}

impl Triangle {
    /// Creates a triangle over `keys` whose vertices are `corners`.
    ///
    /// All derived geometry is evaluated here. Opposite links start empty.
    #[must_use]
    pub fn new(keys: [VertexKey; 3], corners: [&Vertex; 3]) -> Self {
        let points = corners.map(Vertex::point);
        let [p1, p2, p3] = points;
        let signed_area = orientation(&p1, &p2, &p3) / 2.0;
        let circle = circumcircle(&p1, &p2, &p3);

        let shortest = EdgeSide::ALL
            .iter()
            .map(|s| points[s.origin_index()].distance_to(&points[s.destination_index()]))
            .fold(f64::INFINITY, f64::min);
        let min_angle = if circle.radius() > 0.0 {
            (shortest / (2.0 * circle.radius())).min(1.0).asin()
        } else {
            0.0
        };

        Self {
            vertices: keys,
            points,
            opposite: [None; 3],
            signed_area,
            circumcircle: circle,
            centroid: Point::average(&points),
            min_angle,
            is_super: corners.iter().any(|v| v.is_super_vertex()),
            removed: false,
        }
    }

    // ----- vertices ---------------------------------------------------------

    /// The vertex keys in counter-clockwise order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [VertexKey; 3] {
        self.vertices
    }

    /// The vertex positions in counter-clockwise order.
    #[inline]
    #[must_use]
    pub const fn points(&self) -> [Point; 3] {
        self.points
    }

    /// The first vertex.
    #[inline]
    #[must_use]
    pub const fn v1(&self) -> VertexKey {
        self.vertices[0]
    }

    /// The second vertex.
    #[inline]
    #[must_use]
    pub const fn v2(&self) -> VertexKey {
        self.vertices[1]
    }

    /// The third vertex.
    #[inline]
    #[must_use]
    pub const fn v3(&self) -> VertexKey {
        self.vertices[2]
    }

    /// Whether `vertex` is a corner.
    #[must_use]
    pub fn has_vertex(&self, vertex: VertexKey) -> bool {
        self.vertices.contains(&vertex)
    }

    /// The `(origin, destination)` keys of `side`.
    #[inline]
    #[must_use]
    pub const fn edge_vertices(&self, side: EdgeSide) -> (VertexKey, VertexKey) {
        (
            self.vertices[side.origin_index()],
            self.vertices[side.destination_index()],
        )
    }

    /// The `(origin, destination)` positions of `side`.
    #[inline]
    #[must_use]
    pub const fn edge_points(&self, side: EdgeSide) -> (Point, Point) {
        (
            self.points[side.origin_index()],
            self.points[side.destination_index()],
        )
    }

    /// The vertex not on `side`.
    #[inline]
    #[must_use]
    pub const fn apex(&self, side: EdgeSide) -> VertexKey {
        self.vertices[side.apex_index()]
    }

    /// The position of the vertex not on `side`.
    #[inline]
    #[must_use]
    pub const fn apex_point(&self, side: EdgeSide) -> Point {
        self.points[side.apex_index()]
    }

    /// Length of `side`.
    #[must_use]
    pub fn edge_length(&self, side: EdgeSide) -> f64 {
        let (a, b) = self.edge_points(side);
        a.distance_to(&b)
    }

    // ----- adjacency --------------------------------------------------------

    /// The half-edge of the neighbor across `side`.
    #[inline]
    #[must_use]
    pub const fn opposite(&self, side: EdgeSide) -> Option<Halfedge> {
        self.opposite[side.index()]
    }

    /// The neighboring triangle across `side`.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, side: EdgeSide) -> Option<TriangleKey> {
        self.opposite(side).map(Halfedge::triangle)
    }

    pub(crate) const fn set_opposite(&mut self, side: EdgeSide, opposite: Option<Halfedge>) {
        self.opposite[side.index()] = opposite;
    }

    // ----- derived geometry -------------------------------------------------

    /// Signed area; positive for counter-clockwise corners.
    #[inline]
    #[must_use]
    pub const fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// Absolute area.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    /// The circumscribed circle, or [`Circle::DEGENERATE`] when the area is
    /// almost zero.
    #[inline]
    #[must_use]
    pub const fn circumcircle(&self) -> Circle {
        self.circumcircle
    }

    /// The centroid.
    #[inline]
    #[must_use]
    pub const fn centroid(&self) -> Point {
        self.centroid
    }

    /// The smallest interior angle in radians, `asin(shortest / 2R)`.
    #[inline]
    #[must_use]
    pub const fn min_angle(&self) -> f64 {
        self.min_angle
    }

    /// Whether any corner is a super-triangle vertex.
    #[inline]
    #[must_use]
    pub const fn is_super(&self) -> bool {
        self.is_super
    }

    /// Whether the triangle was discarded during super-triangle removal.
    #[inline]
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    pub(crate) const fn mark_removed(&mut self) {
        self.removed = true;
    }

    // ----- classification ---------------------------------------------------

    /// Classifies `p` against the triangle.
    ///
    /// The orientations `a12`, `a23`, `a31` of `p` against the three sides
    /// decide the result:
    ///
    /// - any orientation clearly negative: `Outside`, crossing the side with
    ///   the most negative length-normalized orientation;
    /// - otherwise any orientation [`almost_zero`]: `On`, with two such sides
    ///   meaning the shared vertex and one meaning that side;
    /// - otherwise `Inside`, reporting the side with the smallest normalized
    ///   orientation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::core::halfedge::EdgeSide;
    /// use delaunay_mesh::core::triangle::{PointLocation, Triangle};
    /// use delaunay_mesh::core::triangle_collection::VertexKey;
    /// use delaunay_mesh::geometry::point::Point;
    /// use delaunay_mesh::geometry::predicates::PointRelation;
    /// use delaunay_mesh::vertex;
    ///
    /// let (a, b, c) = (vertex!(0.0, 0.0), vertex!(4.0, 0.0), vertex!(0.0, 4.0));
    /// let t = Triangle::new([VertexKey::default(); 3], [&a, &b, &c]);
    ///
    /// let inside = t.classify(&Point::new(1.0, 1.0));
    /// assert_eq!(inside.relation, PointRelation::Inside);
    ///
    /// let on_edge = t.classify(&Point::new(2.0, 0.0));
    /// assert_eq!(on_edge.location, PointLocation::OnS12);
    ///
    /// let outside = t.classify(&Point::new(5.0, 5.0));
    /// assert_eq!(outside.relation, PointRelation::Outside);
    /// assert_eq!(outside.closest_side, EdgeSide::S23);
    /// ```
    #[must_use]
    pub fn classify(&self, p: &Point) -> Classification {
        let raw = EdgeSide::ALL.map(|side| {
            let (a, b) = self.edge_points(side);
            orientation(&a, &b, p)
        });
        let zero = raw.map(almost_zero);
        let normalized = EdgeSide::ALL.map(|side| {
            let len = self.edge_length(side);
            let value = raw[side.index()];
            if len > 0.0 { value / len } else { value }
        });

        let negative = EdgeSide::ALL
            .into_iter()
            .filter(|s| !zero[s.index()] && raw[s.index()] < 0.0);
        if let Some(exit) = min_by_value(negative, &normalized) {
            return Classification {
                relation: PointRelation::Outside,
                location: PointLocation::None,
                closest_side: exit,
            };
        }

        if let Some(side) = EdgeSide::ALL.into_iter().find(|s| zero[s.index()]) {
            let location = if zero[side.next().index()] {
                // On this side and the next: their shared vertex.
                PointLocation::on_vertex(side.destination_index())
            } else if zero[side.prev().index()] {
                PointLocation::on_vertex(side.origin_index())
            } else {
                PointLocation::on_side(side)
            };
            return Classification {
                relation: PointRelation::On,
                location,
                closest_side: side,
            };
        }

        let nearest = min_by_value(EdgeSide::ALL.into_iter(), &normalized).unwrap_or(EdgeSide::S12);
        Classification {
            relation: PointRelation::Inside,
            location: PointLocation::None,
            closest_side: nearest,
        }
    }

    /// The relation of `p` to the triangle, without location details.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> PointRelation {
        self.classify(p).relation
    }
}

/// The side with the smallest value; ties go to the earlier side.
fn min_by_value(sides: impl Iterator<Item = EdgeSide>, values: &[f64; 3]) -> Option<EdgeSide> {
    sides.fold(None, |best, side| match best {
        Some(b) if values[b.index()] <= values[side.index()] => Some(b),
        _ => Some(side),
    })
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.points;
        write!(f, "({a}) ({b}) ({c})")
    }
}

// =============================================================================
// TESTS
// =============================================================================
