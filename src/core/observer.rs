//! Mutation notifications.
//!
//! A [`DelaunayMesh`](crate::core::delaunay_mesh::DelaunayMesh) reports every
//! structural change to a [`MeshObserver`] synchronously and in order:
//!
//! 1. `dividing_triangle` before a split,
//! 2. `divided_triangle` after the split, before legalization,
//! 3. `flipping_edge` / `flipped_edge` around every flip,
//! 4. `vertex_inserted` once the vertex is fully integrated.
//!
//! Callbacks receive the mesh as a shared reference valid for the duration of
//! the call; the keys they are handed can be resolved against it. Keys of
//! replaced triangles (the `old` list of `divided_triangle`) are already stale
//! when reported.

#![forbid(unsafe_code)]

use crate::core::halfedge::Halfedge;
use crate::core::triangle_collection::{TriangleCollection, TriangleKey, VertexKey};
use crate::geometry::point::Point;

// =============================================================================
// OBSERVER TRAIT
// =============================================================================

/// Receives mesh mutation notifications.
///
/// Every method has an empty default body, so implementors only override the
/// events they care about.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::observer::MeshObserver;
/// use delaunay_mesh::core::triangle_collection::{TriangleCollection, VertexKey};
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl MeshObserver for Counter {
///     fn vertex_inserted(&mut self, _mesh: &TriangleCollection, _vertex: VertexKey) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait MeshObserver {
    /// A vertex has been inserted and legalized.
    fn vertex_inserted(&mut self, _mesh: &TriangleCollection, _vertex: VertexKey) {}

    /// `triangles` are about to be split by `vertex`.
    fn dividing_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        _vertex: VertexKey,
        _triangles: &[TriangleKey],
    ) {
    }

    /// `old` have been replaced by `new`; legalization has not started yet.
    fn divided_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        _vertex: VertexKey,
        _old: &[TriangleKey],
        _new: &[TriangleKey],
    ) {
    }

    /// `edge`, shared by `triangles`, is about to be flipped.
    fn flipping_edge(
        &mut self,
        _mesh: &TriangleCollection,
        _edge: Halfedge,
        _triangles: [TriangleKey; 2],
    ) {
    }

    /// `diagonal` has replaced the flipped edge; `triangles` are the new pair.
    fn flipped_edge(
        &mut self,
        _mesh: &TriangleCollection,
        _diagonal: Halfedge,
        _triangles: [TriangleKey; 2],
    ) {
    }
}

impl<O: MeshObserver + ?Sized> MeshObserver for &mut O {
    fn vertex_inserted(&mut self, mesh: &TriangleCollection, vertex: VertexKey) {
        (**self).vertex_inserted(mesh, vertex);
    }

    fn dividing_triangle(
        &mut self,
        mesh: &TriangleCollection,
        vertex: VertexKey,
        triangles: &[TriangleKey],
    ) {
        (**self).dividing_triangle(mesh, vertex, triangles);
    }

    fn divided_triangle(
        &mut self,
        mesh: &TriangleCollection,
        vertex: VertexKey,
        old: &[TriangleKey],
        new: &[TriangleKey],
    ) {
        (**self).divided_triangle(mesh, vertex, old, new);
    }

    fn flipping_edge(&mut self, mesh: &TriangleCollection, edge: Halfedge, triangles: [TriangleKey; 2]) {
        (**self).flipping_edge(mesh, edge, triangles);
    }

    fn flipped_edge(
        &mut self,
        mesh: &TriangleCollection,
        diagonal: Halfedge,
        triangles: [TriangleKey; 2],
    ) {
        (**self).flipped_edge(mesh, diagonal, triangles);
    }
}

// =============================================================================
// PROVIDED OBSERVERS
// =============================================================================

/// Ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl MeshObserver for NoopObserver {}

/// Logs every notification through `tracing` at `debug` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl MeshObserver for TracingObserver {
    fn vertex_inserted(&mut self, mesh: &TriangleCollection, vertex: VertexKey) {
        let point = mesh.vertex(vertex).map(|v| v.point());
        tracing::debug!(?vertex, ?point, "vertex inserted");
    }

    fn dividing_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        vertex: VertexKey,
        triangles: &[TriangleKey],
    ) {
        tracing::debug!(?vertex, ?triangles, "dividing triangle");
    }

    fn divided_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        vertex: VertexKey,
        old: &[TriangleKey],
        new: &[TriangleKey],
    ) {
        tracing::debug!(?vertex, ?old, ?new, "divided triangle");
    }

    fn flipping_edge(&mut self, mesh: &TriangleCollection, edge: Halfedge, triangles: [TriangleKey; 2]) {
        let endpoints = edge.points(mesh);
        tracing::debug!(%edge, ?endpoints, ?triangles, "flipping edge");
    }

    fn flipped_edge(
        &mut self,
        mesh: &TriangleCollection,
        diagonal: Halfedge,
        triangles: [TriangleKey; 2],
    ) {
        let endpoints = diagonal.points(mesh);
        tracing::debug!(%diagonal, ?endpoints, ?triangles, "flipped edge");
    }
}

// =============================================================================
// EVENT RECORDING
// =============================================================================

/// A recorded notification.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshEvent {
    /// See [`MeshObserver::vertex_inserted`].
    VertexInserted {
        /// The inserted vertex.
        vertex: VertexKey,
        /// Its position.
        point: Option<Point>,
    },
    /// See [`MeshObserver::dividing_triangle`].
    DividingTriangle {
        /// The vertex being inserted.
        vertex: VertexKey,
        /// Triangles about to be split.
        triangles: Vec<TriangleKey>,
    },
    /// See [`MeshObserver::divided_triangle`].
    DividedTriangle {
        /// The vertex being inserted.
        vertex: VertexKey,
        /// Replaced triangles (stale keys).
        old: Vec<TriangleKey>,
        /// Their replacements.
        new: Vec<TriangleKey>,
    },
    /// See [`MeshObserver::flipping_edge`].
    FlippingEdge {
        /// The edge being flipped.
        edge: Halfedge,
        /// The two triangles sharing it.
        triangles: [TriangleKey; 2],
    },
    /// See [`MeshObserver::flipped_edge`].
    FlippedEdge {
        /// The new diagonal.
        diagonal: Halfedge,
        /// The two new triangles.
        triangles: [TriangleKey; 2],
    },
}

impl MeshEvent {
    /// The event name, matching the observer method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VertexInserted { .. } => "vertex_inserted",
            Self::DividingTriangle { .. } => "dividing_triangle",
            Self::DividedTriangle { .. } => "divided_triangle",
            Self::FlippingEdge { .. } => "flipping_edge",
            Self::FlippedEdge { .. } => "flipped_edge",
        }
    }
}

/// Collects every notification as a [`MeshEvent`], in delivery order.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::delaunay_mesh::DelaunayMesh;
/// use delaunay_mesh::core::observer::EventRecorder;
///
/// let mut mesh = DelaunayMesh::with_observer(EventRecorder::default());
/// mesh.add_vertex(0.0, 0.0).unwrap();
/// mesh.add_vertex(1.0, 0.0).unwrap();
/// mesh.add_vertex(0.0, 1.0).unwrap();
/// mesh.triangulate().unwrap();
///
/// let names: Vec<_> = mesh.observer().events().iter().map(|e| e.name()).collect();
/// assert_eq!(names.first(), Some(&"dividing_triangle"));
/// assert_eq!(names.last(), Some(&"vertex_inserted"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<MeshEvent>,
}

impl EventRecorder {
    /// The recorded events.
    #[must_use]
    pub fn events(&self) -> &[MeshEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<MeshEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discards the recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl MeshObserver for EventRecorder {
    fn vertex_inserted(&mut self, mesh: &TriangleCollection, vertex: VertexKey) {
        let point = mesh.vertex(vertex).map(|v| v.point());
        self.events.push(MeshEvent::VertexInserted { vertex, point });
    }

    fn dividing_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        vertex: VertexKey,
        triangles: &[TriangleKey],
    ) {
        self.events.push(MeshEvent::DividingTriangle {
            vertex,
            triangles: triangles.to_vec(),
        });
    }

    fn divided_triangle(
        &mut self,
        _mesh: &TriangleCollection,
        vertex: VertexKey,
        old: &[TriangleKey],
        new: &[TriangleKey],
    ) {
        self.events.push(MeshEvent::DividedTriangle {
            vertex,
            old: old.to_vec(),
            new: new.to_vec(),
        });
    }

    fn flipping_edge(&mut self, _mesh: &TriangleCollection, edge: Halfedge, triangles: [TriangleKey; 2]) {
        self.events.push(MeshEvent::FlippingEdge { edge, triangles });
    }

    fn flipped_edge(
        &mut self,
        _mesh: &TriangleCollection,
        diagonal: Halfedge,
        triangles: [TriangleKey; 2],
    ) {
        self.events.push(MeshEvent::FlippedEdge {
            diagonal,
            triangles,
        });
    }
}
