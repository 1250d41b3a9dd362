//! Point location by walking the triangle adjacency graph.
//!
//! Starting from a triangle, the walk classifies the query point and, while it
//! lies outside, crosses the side with the most negative length-normalized
//! orientation into the neighbor. The mesh's own adjacency is the only index;
//! no spatial structure is kept.
//!
//! # Termination
//!
//! A visibility walk always terminates on a Delaunay triangulation. Numerical
//! trouble can still make it revisit a triangle, so each walk records the
//! triangles it has entered and reports [`LocateError::CycleDetected`] instead
//! of looping.
//!
//! # References
//!
//! - O. Devillers, S. Pion, and M. Teillaud, "Walking in a Triangulation",
//!   International Journal of Foundations of Computer Science, 2001.

use crate::core::collections::fast_hash_set_with_capacity;
use crate::core::halfedge::EdgeSide;
use crate::core::triangle_collection::{TriangleCollection, TriangleKey, VertexKey};
use crate::geometry::point::Point;
use crate::geometry::predicates::PointRelation;

/// Result of a point location query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateResult {
    /// The point is strictly inside the triangle.
    InsideTriangle(TriangleKey),
    /// The point is on a side. `second` is the neighbor across that side with
    /// its own side index, absent on the mesh boundary.
    OnEdge {
        /// The triangle the walk stopped in and the side the point lies on.
        first: (TriangleKey, EdgeSide),
        /// The triangle across that side, if any.
        second: Option<(TriangleKey, EdgeSide)>,
    },
    /// The point coincides with a corner.
    OnVertex {
        /// A triangle having that corner.
        triangle: TriangleKey,
        /// The corner.
        vertex: VertexKey,
    },
}

impl LocateResult {
    /// The triangle the walk stopped in.
    #[must_use]
    pub const fn triangle(&self) -> TriangleKey {
        match *self {
            Self::InsideTriangle(t) | Self::OnVertex { triangle: t, .. } => t,
            Self::OnEdge { first, .. } => first.0,
        }
    }
}

/// Error during point location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// The mesh has no root to start from.
    #[error("Cannot locate in an empty mesh")]
    EmptyMesh,

    /// The walk reached a boundary side with the point still outside.
    #[error("Point lies outside the mesh (walk left through triangle {triangle:?})")]
    OutsideMesh {
        /// The last triangle visited.
        triangle: TriangleKey,
    },

    /// The walk was started from, or led to, a stale triangle key.
    #[error("Triangle {triangle:?} has been removed")]
    RemovedTriangle {
        /// The stale key.
        triangle: TriangleKey,
    },

    /// The walk revisited a triangle.
    #[error("Cycle detected after {steps} steps - possible numerical degeneracy")]
    CycleDetected {
        /// Number of steps taken before the revisit.
        steps: usize,
    },
}

/// A located point together with the number of triangles crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    /// Where the point lies.
    pub result: LocateResult,
    /// Sides crossed on the way.
    pub steps: usize,
}

/// Locates `point` starting from the mesh root.
///
/// # Errors
///
/// * `LocateError::EmptyMesh` if the mesh has no root
/// * `LocateError::RemovedTriangle` if the root is stale
/// * `LocateError::OutsideMesh` if the point is outside every triangle
/// * `LocateError::CycleDetected` if the walk revisits a triangle
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::algorithms::locate::{LocateResult, locate};
/// use delaunay_mesh::core::triangle_collection::TriangleCollection;
/// use delaunay_mesh::geometry::point::Point;
/// use delaunay_mesh::vertex;
///
/// let mut mesh = TriangleCollection::new();
/// let a = mesh.insert_vertex(vertex!(0.0, 0.0));
/// let b = mesh.insert_vertex(vertex!(4.0, 0.0));
/// let c = mesh.insert_vertex(vertex!(0.0, 4.0));
/// let t = mesh.insert_triangle([a, b, c]).unwrap();
/// mesh.set_root(Some(t));
///
/// assert_eq!(
///     locate(&mesh, &Point::new(1.0, 1.0)).unwrap(),
///     LocateResult::InsideTriangle(t)
/// );
/// assert!(locate(&mesh, &Point::new(9.0, 9.0)).is_err());
/// ```
pub fn locate(mesh: &TriangleCollection, point: &Point) -> Result<LocateResult, LocateError> {
    let start = mesh.root().ok_or(LocateError::EmptyMesh)?;
    locate_from(mesh, start, point).map(|located| located.result)
}

/// Locates `point` starting from `start`.
///
/// The walk may pass through tombstones; a point whose containing triangle is
/// a tombstone lies outside the accepted region and is reported as
/// `OutsideMesh`. A tombstone neighbor across an edge the point lies on is
/// treated as boundary.
///
/// # Errors
///
/// Same as [`locate`].
pub fn locate_from(
    mesh: &TriangleCollection,
    start: TriangleKey,
    point: &Point,
) -> Result<Located, LocateError> {
    let mut current = start;
    let mut visited = fast_hash_set_with_capacity(16);
    let mut steps = 0;

    loop {
        if !visited.insert(current) {
            return Err(LocateError::CycleDetected { steps });
        }

        let triangle = mesh
            .get(current)
            .ok_or(LocateError::RemovedTriangle { triangle: current })?;
        let classification = triangle.classify(point);
        tracing::trace!(
            ?current,
            steps,
            relation = %classification.relation,
            "point location step"
        );

        let result = match classification.relation {
            PointRelation::Outside => {
                let exit = triangle
                    .opposite(classification.closest_side)
                    .filter(|h| mesh.get(h.triangle()).is_some())
                    .ok_or(LocateError::OutsideMesh { triangle: current })?;
                current = exit.triangle();
                steps += 1;
                continue;
            }
            _ if triangle.is_removed() => {
                return Err(LocateError::OutsideMesh { triangle: current });
            }
            PointRelation::Inside => LocateResult::InsideTriangle(current),
            PointRelation::On => {
                if let Some(index) = classification.location.vertex_index() {
                    LocateResult::OnVertex {
                        triangle: current,
                        vertex: triangle.vertices()[index],
                    }
                } else {
                    let side = classification.closest_side;
                    let second = triangle
                        .opposite(side)
                        .filter(|h| mesh.is_live(h.triangle()))
                        .map(|h| (h.triangle(), h.side()));
                    LocateResult::OnEdge {
                        first: (current, side),
                        second,
                    }
                }
            }
        };
        return Ok(Located { result, steps });
    }
}
