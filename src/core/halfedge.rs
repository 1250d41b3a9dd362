//! Half-edge handles.
//!
//! Every triangle owns three directed sides arranged counter-clockwise:
//! `S12` (`V1 → V2`), `S23` (`V2 → V3`) and `S31` (`V3 → V1`). A [`Halfedge`]
//! is a `Copy` handle naming one of those sides by its triangle key. Moving to
//! the next or previous side of the same triangle is pure arithmetic on
//! [`EdgeSide`]; the only stored link is the *opposite* half-edge of the
//! neighboring triangle, kept per side inside the triangle itself.
//!
//! Handles are never mutated. When a split or flip replaces a triangle, all
//! handles into it become stale together with its key.

#![forbid(unsafe_code)]

use crate::core::triangle_collection::{TriangleCollection, TriangleKey, VertexKey};
use crate::geometry::point::Point;
use slotmap::Key;
use std::fmt;

// =============================================================================
// EDGE SIDE
// =============================================================================

/// One of the three sides of a triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeSide {
    /// The side from the first to the second vertex.
    S12,
    /// The side from the second to the third vertex.
    S23,
    /// The side from the third to the first vertex.
    S31,
}

impl EdgeSide {
    /// All sides in cycle order.
    pub const ALL: [Self; 3] = [Self::S12, Self::S23, Self::S31];

    /// Position of the side in [`EdgeSide::ALL`], which is also the index of
    /// its origin vertex.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::S12 => 0,
            Self::S23 => 1,
            Self::S31 => 2,
        }
    }

    /// The side whose origin vertex has the given index (taken modulo 3).
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => Self::S12,
            1 => Self::S23,
            _ => Self::S31,
        }
    }

    /// The following side counter-clockwise.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::S12 => Self::S23,
            Self::S23 => Self::S31,
            Self::S31 => Self::S12,
        }
    }

    /// The preceding side counter-clockwise.
    #[inline]
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::S12 => Self::S31,
            Self::S23 => Self::S12,
            Self::S31 => Self::S23,
        }
    }

    /// Index of the origin vertex.
    #[inline]
    #[must_use]
    pub const fn origin_index(self) -> usize {
        self.index()
    }

    /// Index of the destination vertex.
    #[inline]
    #[must_use]
    pub const fn destination_index(self) -> usize {
        (self.index() + 1) % 3
    }

    /// Index of the vertex not on this side.
    #[inline]
    #[must_use]
    pub const fn apex_index(self) -> usize {
        (self.index() + 2) % 3
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S12 => write!(f, "S12"),
            Self::S23 => write!(f, "S23"),
            Self::S31 => write!(f, "S31"),
        }
    }
}

// =============================================================================
// HALFEDGE
// =============================================================================

/// A directed side of a triangle.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::halfedge::{EdgeSide, Halfedge};
/// use delaunay_mesh::core::triangle_collection::TriangleKey;
///
/// let e = Halfedge::new(TriangleKey::default(), EdgeSide::S23);
/// assert_eq!(e.next().side(), EdgeSide::S31);
/// assert_eq!(e.prev().side(), EdgeSide::S12);
/// assert_eq!(e.next().next().next(), e);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Halfedge {
    triangle: TriangleKey,
    side: EdgeSide,
}

impl Halfedge {
    /// Creates a handle for `side` of `triangle`.
    #[inline]
    #[must_use]
    pub const fn new(triangle: TriangleKey, side: EdgeSide) -> Self {
        Self { triangle, side }
    }

    /// The parent triangle.
    #[inline]
    #[must_use]
    pub const fn triangle(self) -> TriangleKey {
        self.triangle
    }

    /// The side within the parent triangle.
    #[inline]
    #[must_use]
    pub const fn side(self) -> EdgeSide {
        self.side
    }

    /// The next half-edge around the parent triangle.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.triangle, self.side.next())
    }

    /// The previous half-edge around the parent triangle.
    #[inline]
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::new(self.triangle, self.side.prev())
    }

    /// The half-edge of the neighboring triangle sharing this edge.
    ///
    /// `None` on the mesh boundary or when the parent triangle no longer
    /// exists.
    #[inline]
    #[must_use]
    pub fn opposite(self, mesh: &TriangleCollection) -> Option<Self> {
        mesh.get(self.triangle)?.opposite(self.side)
    }

    /// The `(origin, destination)` vertex keys.
    #[must_use]
    pub fn vertices(self, mesh: &TriangleCollection) -> Option<(VertexKey, VertexKey)> {
        mesh.get(self.triangle).map(|t| t.edge_vertices(self.side))
    }

    /// The `(origin, destination)` positions.
    #[must_use]
    pub fn points(self, mesh: &TriangleCollection) -> Option<(Point, Point)> {
        mesh.get(self.triangle).map(|t| t.edge_points(self.side))
    }

    /// Euclidean length of the edge.
    #[must_use]
    pub fn length(self, mesh: &TriangleCollection) -> Option<f64> {
        self.points(mesh).map(|(a, b)| a.distance_to(&b))
    }
}

impl fmt::Display for Halfedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.{}", self.triangle, self.side)
    }
}

// =============================================================================
// UNDIRECTED EDGE KEY
// =============================================================================

/// Canonical identifier for an undirected edge.
///
/// Both half-edges of a shared edge map to the same key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    v0: VertexKey,
    v1: VertexKey,
}

impl EdgeKey {
    /// Creates a key with the endpoints ordered by their raw slot value.
    #[must_use]
    pub fn new(a: VertexKey, b: VertexKey) -> Self {
        if a.data().as_ffi() <= b.data().as_ffi() {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// The endpoints in canonical order.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (VertexKey, VertexKey) {
        (self.v0, self.v1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    #[test]
    fn test_edge_side_cycle() {
        for side in EdgeSide::ALL {
            assert_eq!(side.next().prev(), side);
            assert_eq!(side.next().next().next(), side);
            assert_eq!(EdgeSide::from_index(side.index()), side);
            assert_ne!(side.apex_index(), side.origin_index());
            assert_ne!(side.apex_index(), side.destination_index());
        }
        assert_eq!(EdgeSide::S31.destination_index(), 0);
        assert_eq!(EdgeSide::S12.apex_index(), 2);
        assert_eq!(EdgeSide::from_index(4), EdgeSide::S23);
    }

    #[test]
    fn test_halfedge_navigation_stays_in_triangle() {
        let key = TriangleKey::from(KeyData::from_ffi(7));
        let e = Halfedge::new(key, EdgeSide::S12);
        assert_eq!(e.next(), Halfedge::new(key, EdgeSide::S23));
        assert_eq!(e.prev(), Halfedge::new(key, EdgeSide::S31));
        assert_eq!(e.next().triangle(), key);
    }

    #[test]
    fn test_edge_key_is_canonical() {
        let a = VertexKey::from(KeyData::from_ffi(1));
        let b = VertexKey::from(KeyData::from_ffi(2));
        assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
        assert_eq!(EdgeKey::new(b, a).endpoints(), (a, b));
    }
}
