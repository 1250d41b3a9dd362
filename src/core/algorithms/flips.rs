//! Edge flips and Lawson legalization.
//!
//! Two triangles sharing an edge `a → b` form a quadrilateral `a, d, b, p`
//! where `p` is the apex of the first triangle and `d` the apex of the second.
//! The edge is *locally Delaunay* unless `d` lies strictly inside the
//! circumcircle of `(a, b, p)`; in that case the quadrilateral is convex and the
//! diagonal is replaced by `p – d`.
//!
//! [`legalize`] starts from one edge opposite a freshly inserted vertex and
//! keeps flipping outward until every affected edge is locally Delaunay. The
//! pending edges are kept on an explicit stack, processed depth first, so deep
//! cascades never grow the call stack.
//!
//! # References
//!
//! - C. L. Lawson, "Software for C1 Surface Interpolation", Mathematical
//!   Software III, 1977.
//! - L. Guibas and J. Stolfi, "Primitives for the Manipulation of General
//!   Subdivisions and the Computation of Voronoi Diagrams", ACM TOG, 1985.

#![forbid(unsafe_code)]

use crate::core::algorithms::insertion::{InsertionContext, InsertionError};
use crate::core::halfedge::{EdgeSide, Halfedge};
use crate::core::observer::MeshObserver;
use crate::core::triangle_collection::{TriangleCollection, TriangleKey, VertexKey};
use crate::geometry::predicates::PointRelation;

/// Returns the opposite half-edge of `edge` when the edge must be flipped.
///
/// `None` means the edge is locally Delaunay or lies on the boundary.
///
/// # Errors
///
/// * `InsertionError::TriangleRemoved` if `edge` belongs to a stale triangle
pub fn illegal_opposite(
    mesh: &TriangleCollection,
    edge: Halfedge,
) -> Result<Option<Halfedge>, InsertionError> {
    let triangle = mesh.get(edge.triangle()).ok_or(InsertionError::TriangleRemoved {
        triangle: edge.triangle(),
    })?;
    let Some(opposite) = mesh.opposite(edge) else {
        return Ok(None);
    };
    let Some(other) = mesh.get(opposite.triangle()) else {
        return Ok(None);
    };
    let d = other.apex_point(opposite.side());
    let illegal = triangle.circumcircle().contains(&d) == PointRelation::Inside;
    Ok(illegal.then_some(opposite))
}

/// Replaces the diagonal `a → b` shared by `edge`'s triangle and its neighbor
/// with the diagonal joining their apexes.
///
/// With `p` the apex of `edge` and `d` the apex of the neighbor, the new
/// triangles are `(d, p, a)` and `(p, d, b)`, linked to each other across
/// their first sides. The two old triangles are deleted and the first new
/// triangle becomes the root. No circumcircle test is made.
///
/// # Errors
///
/// * `InsertionError::TriangleRemoved` if `edge` belongs to a stale triangle
/// * `InsertionError::MissingNeighbor` if `edge` has no opposite
pub fn flip_edge<O: MeshObserver>(
    ctx: &mut InsertionContext<'_, O>,
    edge: Halfedge,
) -> Result<[TriangleKey; 2], InsertionError> {
    let tri = edge.triangle();
    let triangle = ctx
        .mesh
        .get(tri)
        .ok_or(InsertionError::TriangleRemoved { triangle: tri })?;
    let opposite = ctx
        .mesh
        .opposite(edge)
        .ok_or(InsertionError::MissingNeighbor {
            triangle: tri,
            side: edge.side(),
        })?;
    let other = ctx
        .mesh
        .get(opposite.triangle())
        .ok_or(InsertionError::TriangleRemoved {
            triangle: opposite.triangle(),
        })?;

    let (a, b) = triangle.edge_vertices(edge.side());
    let p = triangle.apex(edge.side());
    let d = other.apex(opposite.side());

    // Outer sides: p → a, b → p on this side; d → b, a → d on the other.
    let pa = ctx.mesh.opposite(edge.prev());
    let bp = ctx.mesh.opposite(edge.next());
    let db = ctx.mesh.opposite(opposite.prev());
    let ad = ctx.mesh.opposite(opposite.next());

    let old = [tri, opposite.triangle()];
    ctx.observer.flipping_edge(ctx.mesh, edge, old);

    let tn1 = ctx.mesh.insert_triangle([d, p, a])?;
    let tn2 = ctx.mesh.insert_triangle([p, d, b])?;
    ctx.mesh.link(
        Halfedge::new(tn1, EdgeSide::S12),
        Some(Halfedge::new(tn2, EdgeSide::S12)),
    );
    ctx.mesh.link(Halfedge::new(tn1, EdgeSide::S23), pa);
    ctx.mesh.link(Halfedge::new(tn1, EdgeSide::S31), ad);
    ctx.mesh.link(Halfedge::new(tn2, EdgeSide::S23), db);
    ctx.mesh.link(Halfedge::new(tn2, EdgeSide::S31), bp);
    for key in old {
        ctx.mesh.remove_triangle(key)?;
    }
    ctx.mesh.set_root(Some(tn1));
    ctx.statistics.flips += 1;

    tracing::debug!(?old, new = ?[tn1, tn2], "flipped edge");
    ctx.observer
        .flipped_edge(ctx.mesh, Halfedge::new(tn1, EdgeSide::S12), [tn1, tn2]);
    Ok([tn1, tn2])
}

/// Restores the Delaunay property around `vertex`, starting at `edge`.
///
/// `edge` must be a side whose apex is `vertex`. Every flip produces two new
/// sides opposite `vertex` that are checked in turn. Returns whether `edge`
/// itself was flipped; `false` for a boundary edge or one already locally
/// Delaunay.
///
/// # Errors
///
/// * `InsertionError::TriangleRemoved` if a side to check belongs to a stale
///   triangle
pub fn legalize<O: MeshObserver>(
    ctx: &mut InsertionContext<'_, O>,
    edge: Halfedge,
    vertex: VertexKey,
) -> Result<bool, InsertionError> {
    let mut pending = vec![edge];
    let mut flipped_first = None;

    while let Some(current) = pending.pop() {
        let flipped = match illegal_opposite(ctx.mesh, current)? {
            Some(_) => {
                let [tn1, tn2] = flip_edge(ctx, current)?;
                // Depth first: tn1's side is checked before tn2's.
                pending.push(Halfedge::new(tn2, EdgeSide::S23));
                pending.push(Halfedge::new(tn1, EdgeSide::S31));
                true
            }
            None => false,
        };
        flipped_first.get_or_insert(flipped);
    }

    let flipped = flipped_first.unwrap_or(false);
    if flipped {
        tracing::trace!(?vertex, ?edge, "legalized");
    }
    Ok(flipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithms::insertion::InsertionStatistics;
    use crate::core::halfedge::EdgeKey;
    use crate::core::observer::{EventRecorder, NoopObserver};
    use crate::core::util::delaunay_validation::{validate_adjacency, validate_orientation};
    use crate::vertex;

    struct Quad {
        mesh: TriangleCollection,
        tri: TriangleKey,
        other: TriangleKey,
        keys: [VertexKey; 4],
    }

    /// Triangle `(a, b, p)` above the x axis and `(b, a, d)` below it, sharing
    /// `a → b`. With `d = (2, -1)` the edge is illegal, with `d = (2, -5)` it is not.
    fn quad(d_y: f64) -> Quad {
        let mut mesh = TriangleCollection::new();
        let a = mesh.insert_vertex(vertex!(0.0, 0.0));
        let b = mesh.insert_vertex(vertex!(4.0, 0.0));
        let p = mesh.insert_vertex(vertex!(2.0, 1.0));
        let d = mesh.insert_vertex(vertex!(2.0, d_y));
        let tri = mesh.insert_triangle([a, b, p]).unwrap();
        let other = mesh.insert_triangle([b, a, d]).unwrap();
        mesh.link(
            Halfedge::new(tri, EdgeSide::S12),
            Some(Halfedge::new(other, EdgeSide::S12)),
        );
        mesh.set_root(Some(tri));
        Quad {
            mesh,
            tri,
            other,
            keys: [a, b, p, d],
        }
    }

    #[test]
    fn test_illegal_edge_is_flipped() {
        let Quad {
            mut mesh,
            tri,
            other,
            keys: [a, b, p, d],
        } = quad(-1.0);
        let edge = Halfedge::new(tri, EdgeSide::S12);
        assert!(illegal_opposite(&mesh, edge).unwrap().is_some());

        let mut observer = NoopObserver;
        let mut stats = InsertionStatistics::default();
        let mut ctx = InsertionContext::new(&mut mesh, &mut observer, &mut stats);
        assert!(legalize(&mut ctx, edge, p).unwrap());

        assert!(mesh.get(tri).is_none());
        assert!(mesh.get(other).is_none());
        assert_eq!(mesh.len(), 2);
        let edges = mesh.edges();
        assert!(edges.contains(&EdgeKey::new(p, d)));
        assert!(!edges.contains(&EdgeKey::new(a, b)));
        validate_adjacency(&mesh).unwrap();
        validate_orientation(&mesh).unwrap();
        assert_eq!(stats.flips, 1);

        // The new diagonal is locally Delaunay.
        let root = mesh.root().unwrap();
        assert!(
            illegal_opposite(&mesh, Halfedge::new(root, EdgeSide::S12))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_legal_edge_is_kept() {
        let Quad {
            mut mesh,
            tri,
            keys: [_, _, p, _],
            ..
        } = quad(-5.0);
        let mut observer = NoopObserver;
        let mut stats = InsertionStatistics::default();
        let mut ctx = InsertionContext::new(&mut mesh, &mut observer, &mut stats);
        assert!(!legalize(&mut ctx, Halfedge::new(tri, EdgeSide::S12), p).unwrap());
        assert!(mesh.get(tri).is_some());
        assert_eq!(stats.flips, 0);
    }

    #[test]
    fn test_boundary_edge_is_not_flippable() {
        let Quad {
            mut mesh,
            tri,
            keys: [_, _, p, _],
            ..
        } = quad(-1.0);
        let mut observer = NoopObserver;
        let mut stats = InsertionStatistics::default();
        let mut ctx = InsertionContext::new(&mut mesh, &mut observer, &mut stats);
        let boundary = Halfedge::new(tri, EdgeSide::S23);
        assert!(!legalize(&mut ctx, boundary, p).unwrap());
        assert_eq!(
            flip_edge(&mut ctx, boundary).unwrap_err(),
            InsertionError::MissingNeighbor {
                triangle: tri,
                side: EdgeSide::S23
            }
        );
    }

    #[test]
    fn test_stale_edge_is_an_error() {
        let Quad {
            mut mesh,
            tri,
            keys: [_, _, p, _],
            ..
        } = quad(-1.0);
        mesh.remove_triangle(tri).unwrap();
        let mut observer = NoopObserver;
        let mut stats = InsertionStatistics::default();
        let mut ctx = InsertionContext::new(&mut mesh, &mut observer, &mut stats);
        assert_eq!(
            legalize(&mut ctx, Halfedge::new(tri, EdgeSide::S12), p).unwrap_err(),
            InsertionError::TriangleRemoved { triangle: tri }
        );
    }

    #[test]
    fn test_flip_notifications_bracket_the_flip() {
        let Quad {
            mut mesh,
            tri,
            other,
            ..
        } = quad(-1.0);
        let mut recorder = EventRecorder::default();
        let mut stats = InsertionStatistics::default();
        let mut ctx = InsertionContext::new(&mut mesh, &mut recorder, &mut stats);
        let [tn1, tn2] = flip_edge(&mut ctx, Halfedge::new(tri, EdgeSide::S12)).unwrap();

        let names: Vec<_> = recorder.events().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["flipping_edge", "flipped_edge"]);
        assert_eq!(
            recorder.events()[0],
            crate::core::observer::MeshEvent::FlippingEdge {
                edge: Halfedge::new(tri, EdgeSide::S12),
                triangles: [tri, other]
            }
        );
        assert_eq!(
            recorder.events()[1],
            crate::core::observer::MeshEvent::FlippedEdge {
                diagonal: Halfedge::new(tn1, EdgeSide::S12),
                triangles: [tn1, tn2]
            }
        );
    }
}
