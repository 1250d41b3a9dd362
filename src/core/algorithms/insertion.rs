//! Vertex insertion by triangle splitting.
//!
//! A new vertex is located with the adjacency walk and then spliced into the
//! mesh in one of two ways:
//!
//! 1. **Interior split**: a point strictly inside a triangle replaces it with
//!    three children fanned around the new vertex.
//! 2. **Edge split**: a point on a side replaces the (one or two) triangles
//!    sharing that side with two children each.
//!
//! Each child keeps the outer neighbor of the side it inherited and is linked
//! to its siblings across the new internal edges. The replaced triangles are
//! deleted from the arena. Afterwards every new side opposite the inserted
//! vertex is handed to [`legalize`] so that the Delaunay
//! property is restored locally.
//!
//! A point coinciding with an existing vertex is rejected with
//! [`InsertionError::DuplicateVertex`]. A point the orientation tolerance
//! places on a vertex it does not coincide with is rejected with
//! [`InsertionError::NearVertex`].

#![forbid(unsafe_code)]

use crate::core::algorithms::flips::legalize;
use crate::core::algorithms::locate::{LocateError, LocateResult, locate_from};
use crate::core::collections::TriangleBuffer;
use crate::core::halfedge::{EdgeSide, Halfedge};
use crate::core::observer::MeshObserver;
use crate::core::triangle_collection::{
    TriangleCollection, TriangleCollectionError, TriangleKey, VertexKey,
};
use smallvec::smallvec;

// =============================================================================
// ERRORS AND STATISTICS
// =============================================================================

/// Error during vertex insertion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertionError {
    /// Point location failed.
    #[error("Location error: {0}")]
    Locate(#[from] LocateError),

    /// The arena rejected a triangle or lookup.
    #[error("Collection error: {0}")]
    Collection(#[from] TriangleCollectionError),

    /// A split or flip was requested on a triangle that no longer exists.
    #[error("Triangle {triangle:?} has already been removed")]
    TriangleRemoved {
        /// The stale key.
        triangle: TriangleKey,
    },

    /// The vertex coincides with an existing mesh vertex.
    #[error("Vertex {vertex:?} coincides with existing vertex {existing:?}")]
    DuplicateVertex {
        /// The rejected vertex.
        vertex: VertexKey,
        /// The vertex already at that position.
        existing: VertexKey,
    },

    /// The point lies within the orientation tolerance of a vertex without
    /// coinciding with it.
    #[error("Vertex {vertex:?} is too close to vertex {near:?} to be located")]
    NearVertex {
        /// The vertex being inserted.
        vertex: VertexKey,
        /// The vertex it could not be told apart from.
        near: VertexKey,
    },

    /// Two triangles reported as sharing an edge are not linked to each other.
    #[error("Side {side} of triangle {triangle:?} is not linked back to its neighbor")]
    MissingNeighbor {
        /// The triangle whose link is inconsistent.
        triangle: TriangleKey,
        /// The side that should point back.
        side: EdgeSide,
    },
}

/// Counters collected while inserting vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionStatistics {
    /// Vertices fully integrated into the mesh.
    pub vertices_inserted: usize,
    /// Points that fell strictly inside a triangle.
    pub interior_splits: usize,
    /// Points that fell on a side.
    pub edge_splits: usize,
    /// Edge flips performed during legalization.
    pub flips: usize,
    /// Triangles crossed by the location walks.
    pub walk_steps: usize,
}

impl InsertionStatistics {
    /// Average walk length per inserted vertex.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "counters stay far below 2^52 in practice"
    )]
    pub fn average_walk_length(&self) -> f64 {
        if self.vertices_inserted == 0 {
            0.0
        } else {
            self.walk_steps as f64 / self.vertices_inserted as f64
        }
    }
}

// =============================================================================
// INSERTION CONTEXT
// =============================================================================

/// The mutable state shared by splitting and legalization.
#[derive(Debug)]
pub struct InsertionContext<'a, O: MeshObserver> {
    /// The mesh being modified.
    pub mesh: &'a mut TriangleCollection,
    /// Receives every mutation notification.
    pub observer: &'a mut O,
    /// Counters updated as work is done.
    pub statistics: &'a mut InsertionStatistics,
}

impl<'a, O: MeshObserver> InsertionContext<'a, O> {
    /// Bundles the pieces of an insertion.
    pub const fn new(
        mesh: &'a mut TriangleCollection,
        observer: &'a mut O,
        statistics: &'a mut InsertionStatistics,
    ) -> Self {
        Self {
            mesh,
            observer,
            statistics,
        }
    }
}

// =============================================================================
// INSERTION
// =============================================================================

/// Inserts a stored vertex into the mesh.
///
/// The vertex must already be in the mesh's vertex arena. The walk starts at
/// the mesh root, which every split and flip moves to a freshly created
/// triangle.
///
/// # Errors
///
/// * `InsertionError::Collection` if `vertex` is not stored in the mesh
/// * `InsertionError::Locate` if the point cannot be located
/// * `InsertionError::DuplicateVertex` if the point coincides with a vertex
/// * `InsertionError::NearVertex` if the point is located on a vertex it does
///   not coincide with
/// * any error raised by the split or by legalization
pub fn insert_vertex<O: MeshObserver>(
    ctx: &mut InsertionContext<'_, O>,
    vertex: VertexKey,
) -> Result<(), InsertionError> {
    let point = ctx
        .mesh
        .vertex(vertex)
        .ok_or(TriangleCollectionError::MissingVertex { vertex })?
        .point();
    let root = ctx.mesh.root().ok_or(LocateError::EmptyMesh)?;
    let located = locate_from(ctx.mesh, root, &point)?;
    ctx.statistics.walk_steps += located.steps;

    match located.result {
        LocateResult::InsideTriangle(triangle) => {
            split_triangle(ctx, triangle, vertex)?;
        }
        LocateResult::OnEdge { first, second } => {
            let first = Halfedge::new(first.0, first.1);
            let second = second.map(|(t, s)| Halfedge::new(t, s));
            split_edge(ctx, first, second, vertex)?;
        }
        LocateResult::OnVertex { vertex: existing, .. } => {
            let coincident = ctx
                .mesh
                .vertex(existing)
                .is_some_and(|v| v.point().almost_eq(&point));
            return Err(if coincident {
                InsertionError::DuplicateVertex { vertex, existing }
            } else {
                InsertionError::NearVertex {
                    vertex,
                    near: existing,
                }
            });
        }
    }

    ctx.statistics.vertices_inserted += 1;
    ctx.observer.vertex_inserted(ctx.mesh, vertex);
    Ok(())
}

/// Splits `triangle` into three around `vertex`, then legalizes the three
/// outer sides.
///
/// The children are `(V1, V2, v)`, `(V2, V3, v)` and `(V3, V1, v)`; the first
/// becomes the new root.
///
/// # Errors
///
/// * `InsertionError::TriangleRemoved` if `triangle` is stale
/// * `InsertionError::Collection` if `vertex` is not stored in the mesh
pub fn split_triangle<O: MeshObserver>(
    ctx: &mut InsertionContext<'_, O>,
    triangle: TriangleKey,
    vertex: VertexKey,
) -> Result<[TriangleKey; 3], InsertionError> {
    let [v1, v2, v3] = ctx
        .mesh
        .get(triangle)
        .ok_or(InsertionError::TriangleRemoved { triangle })?
        .vertices();
    let outer = EdgeSide::ALL.map(|side| ctx.mesh.opposite(Halfedge::new(triangle, side)));

    ctx.observer.dividing_triangle(ctx.mesh, vertex, &[triangle]);

    let t1 = ctx.mesh.insert_triangle([v1, v2, vertex])?;
    let t2 = ctx.mesh.insert_triangle([v2, v3, vertex])?;
    let t3 = ctx.mesh.insert_triangle([v3, v1, vertex])?;
    ctx.mesh.remove_triangle(triangle)?;

    let children = [t1, t2, t3];
    for (i, &child) in children.iter().enumerate() {
        let sibling = children[(i + 1) % 3];
        ctx.mesh.link(Halfedge::new(child, EdgeSide::S12), outer[i]);
        ctx.mesh.link(
            Halfedge::new(child, EdgeSide::S23),
            Some(Halfedge::new(sibling, EdgeSide::S31)),
        );
    }
    ctx.mesh.set_root(Some(t1));
    ctx.statistics.interior_splits += 1;

    tracing::debug!(?triangle, ?vertex, ?children, "split triangle");
    ctx.observer
        .divided_triangle(ctx.mesh, vertex, &[triangle], &children);

    for child in children {
        legalize(ctx, Halfedge::new(child, EdgeSide::S12), vertex)?;
    }
    Ok(children)
}

/// Splits the triangles on both sides of `first` at `vertex`, then legalizes
/// the sides opposite `vertex`.
///
/// `second` is the opposite half-edge, absent when `first` is on the mesh
/// boundary. For a side `a → b` with apex `c` the children are `(a, v, c)`
/// and `(v, b, c)`; the neighbor across it (side `b → a`, apex `d`) yields
/// `(b, v, d)` and `(v, a, d)`. Returns the two or four new triangles.
///
/// # Errors
///
/// * `InsertionError::TriangleRemoved` if either triangle is stale
/// * `InsertionError::MissingNeighbor` if `second` does not link back to
///   `first`
/// * `InsertionError::Collection` if `vertex` is not stored in the mesh
pub fn split_edge<O: MeshObserver>(
    ctx: &mut InsertionContext<'_, O>,
    first: Halfedge,
    second: Option<Halfedge>,
    vertex: VertexKey,
) -> Result<TriangleBuffer, InsertionError> {
    let first_half = HalfSplit::capture(ctx.mesh, first)?;
    let second_half = match second {
        Some(edge) => {
            if ctx.mesh.opposite(edge) != Some(first) {
                return Err(InsertionError::MissingNeighbor {
                    triangle: edge.triangle(),
                    side: edge.side(),
                });
            }
            Some(HalfSplit::capture(ctx.mesh, edge)?)
        }
        None => None,
    };

    let old: TriangleBuffer = std::iter::once(first.triangle())
        .chain(second.map(Halfedge::triangle))
        .collect();
    ctx.observer.dividing_triangle(ctx.mesh, vertex, &old);

    let [t1, t2] = first_half.build(ctx.mesh, vertex)?;
    let mut new: TriangleBuffer = smallvec![t1, t2];
    if let Some(half) = second_half {
        let [t3, t4] = half.build(ctx.mesh, vertex)?;
        ctx.mesh.link(
            Halfedge::new(t1, EdgeSide::S12),
            Some(Halfedge::new(t4, EdgeSide::S12)),
        );
        ctx.mesh.link(
            Halfedge::new(t2, EdgeSide::S12),
            Some(Halfedge::new(t3, EdgeSide::S12)),
        );
        new.extend([t3, t4]);
    }
    for &triangle in &old {
        ctx.mesh.remove_triangle(triangle)?;
    }
    ctx.mesh.set_root(Some(t1));
    ctx.statistics.edge_splits += 1;

    tracing::debug!(?old, ?vertex, ?new, "split edge");
    ctx.observer.divided_triangle(ctx.mesh, vertex, &old, &new);

    for pair in new.chunks(2) {
        legalize(ctx, Halfedge::new(pair[0], EdgeSide::S31), vertex)?;
        legalize(ctx, Halfedge::new(pair[1], EdgeSide::S23), vertex)?;
    }
    Ok(new)
}

/// One triangle's half of an edge split: the side `a → b` being split, its
/// apex `c`, and the outer neighbors of `c → a` and `b → c`.
#[derive(Debug, Clone, Copy)]
struct HalfSplit {
    a: VertexKey,
    b: VertexKey,
    c: VertexKey,
    opposite_ca: Option<Halfedge>,
    opposite_bc: Option<Halfedge>,
}

impl HalfSplit {
    fn capture(mesh: &TriangleCollection, edge: Halfedge) -> Result<Self, InsertionError> {
        let triangle = mesh
            .get(edge.triangle())
            .ok_or(InsertionError::TriangleRemoved {
                triangle: edge.triangle(),
            })?;
        let (a, b) = triangle.edge_vertices(edge.side());
        Ok(Self {
            a,
            b,
            c: triangle.apex(edge.side()),
            opposite_ca: mesh.opposite(edge.prev()),
            opposite_bc: mesh.opposite(edge.next()),
        })
    }

    /// Creates `(a, v, c)` and `(v, b, c)` linked to each other and to the
    /// captured outer neighbors.
    fn build(
        self,
        mesh: &mut TriangleCollection,
        vertex: VertexKey,
    ) -> Result<[TriangleKey; 2], InsertionError> {
        let left = mesh.insert_triangle([self.a, vertex, self.c])?;
        let right = mesh.insert_triangle([vertex, self.b, self.c])?;
        mesh.link(
            Halfedge::new(left, EdgeSide::S23),
            Some(Halfedge::new(right, EdgeSide::S31)),
        );
        mesh.link(Halfedge::new(left, EdgeSide::S31), self.opposite_ca);
        mesh.link(Halfedge::new(right, EdgeSide::S23), self.opposite_bc);
        Ok([left, right])
    }
}
