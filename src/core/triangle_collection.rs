//! Arena storage for the triangle mesh.
//!
//! [`TriangleCollection`] owns every vertex and triangle of a mesh in two
//! generation-checked storage maps. Adjacency is expressed purely through the
//! opposite links of each triangle's sides, so the live mesh is the set of
//! triangles reachable from a root triangle across those links.
//!
//! # Lifetime of a triangle
//!
//! - A triangle replaced by a split or a flip is deleted from the arena. Its
//!   key becomes stale and every lookup through it returns `None`.
//! - A triangle discarded by super-triangle removal is kept as a tombstone
//!   ([`Triangle::is_removed`]). Tombstones keep the adjacency graph
//!   connected for traversal but are never yielded by [`TriangleCollection::iter`]
//!   or counted by [`TriangleCollection::len`].
//!
//! # Enumeration
//!
//! [`TriangleCollection::iter`] is a depth-first walk from the root with a
//! per-walk visited set. Nothing is written during traversal, so any number of
//! readers can enumerate a finished mesh concurrently.

#![forbid(unsafe_code)]

use crate::core::collections::{FastHashSet, StorageMap, fast_hash_set_with_capacity};
use crate::core::halfedge::{EdgeKey, EdgeSide, Halfedge};
use crate::core::triangle::Triangle;
use crate::core::vertex::Vertex;
use slotmap::new_key_type;
use thiserror::Error;

// =============================================================================
// KEYS
// =============================================================================

new_key_type! {
    /// Key of a triangle in a [`TriangleCollection`].
    ///
    /// Keys are generation-checked: the key of a triangle that has been
    /// replaced never resolves again, even after its slot is reused.
    pub struct TriangleKey;
}

new_key_type! {
    /// Key of a vertex in a [`TriangleCollection`].
    pub struct VertexKey;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by direct arena manipulation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangleCollectionError {
    /// A triangle was requested over a vertex key that does not resolve.
    #[error("Vertex {vertex:?} does not exist in this mesh")]
    MissingVertex {
        /// The unresolved key.
        vertex: VertexKey,
    },
    /// The triangle key is stale or belongs to another mesh.
    #[error("Triangle {triangle:?} has been removed from this mesh")]
    MissingTriangle {
        /// The unresolved key.
        triangle: TriangleKey,
    },
}

// =============================================================================
// TRIANGLE COLLECTION
// =============================================================================

/// Vertices and triangles of a mesh, with the root used for traversal and
/// point location.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::halfedge::{EdgeSide, Halfedge};
/// use delaunay_mesh::core::triangle_collection::TriangleCollection;
/// use delaunay_mesh::vertex;
///
/// let mut mesh = TriangleCollection::new();
/// let a = mesh.insert_vertex(vertex!(0.0, 0.0));
/// let b = mesh.insert_vertex(vertex!(1.0, 0.0));
/// let c = mesh.insert_vertex(vertex!(0.0, 1.0));
/// let d = mesh.insert_vertex(vertex!(1.0, 1.0));
///
/// let t1 = mesh.insert_triangle([a, b, c]).unwrap();
/// let t2 = mesh.insert_triangle([b, d, c]).unwrap();
/// mesh.link(Halfedge::new(t1, EdgeSide::S23), Some(Halfedge::new(t2, EdgeSide::S31)));
/// mesh.set_root(Some(t1));
///
/// assert_eq!(mesh.len(), 2);
/// assert_eq!(mesh.iter().count(), 2);
/// assert_eq!(mesh.get(t2).unwrap().neighbor(EdgeSide::S31), Some(t1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TriangleCollection {
    vertices: StorageMap<VertexKey, Vertex>,
    triangles: StorageMap<TriangleKey, Triangle>,
    root: Option<TriangleKey>,
}

impl TriangleCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: StorageMap::with_key(),
            triangles: StorageMap::with_key(),
            root: None,
        }
    }

    /// Removes every vertex and triangle.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.root = None;
    }

    // =========================================================================
    // VERTICES
    // =========================================================================

    /// Stores a vertex and returns its key.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> VertexKey {
        self.vertices.insert(vertex)
    }

    /// The vertex for `key`.
    #[must_use]
    pub fn vertex(&self, key: VertexKey) -> Option<&Vertex> {
        self.vertices.get(key)
    }

    /// All stored vertices, including super-triangle corners.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &Vertex)> {
        self.vertices.iter()
    }

    /// Number of stored vertices.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    // =========================================================================
    // TRIANGLES
    // =========================================================================

    /// Creates an unlinked triangle over three stored vertices.
    ///
    /// # Errors
    ///
    /// * `TriangleCollectionError::MissingVertex` if any key does not resolve
    pub fn insert_triangle(
        &mut self,
        keys: [VertexKey; 3],
    ) -> Result<TriangleKey, TriangleCollectionError> {
        let [a, b, c] = keys;
        let corners = [self.vertex_or_err(a)?, self.vertex_or_err(b)?, self.vertex_or_err(c)?];
        let triangle = Triangle::new(keys, corners);
        Ok(self.triangles.insert(triangle))
    }

    fn vertex_or_err(&self, key: VertexKey) -> Result<&Vertex, TriangleCollectionError> {
        self.vertices
            .get(key)
            .ok_or(TriangleCollectionError::MissingVertex { vertex: key })
    }

    /// Deletes a triangle from the arena and returns it.
    ///
    /// Neighbors keep their links to the deleted triangle until they are
    /// relinked; callers replace every such link before the next lookup.
    ///
    /// # Errors
    ///
    /// * `TriangleCollectionError::MissingTriangle` if `key` is stale
    pub fn remove_triangle(&mut self, key: TriangleKey) -> Result<Triangle, TriangleCollectionError> {
        self.triangles
            .remove(key)
            .ok_or(TriangleCollectionError::MissingTriangle { triangle: key })
    }

    /// Turns a triangle into a tombstone.
    ///
    /// # Errors
    ///
    /// * `TriangleCollectionError::MissingTriangle` if `key` is stale
    pub fn mark_removed(&mut self, key: TriangleKey) -> Result<(), TriangleCollectionError> {
        let triangle = self
            .triangles
            .get_mut(key)
            .ok_or(TriangleCollectionError::MissingTriangle { triangle: key })?;
        triangle.mark_removed();
        Ok(())
    }

    /// The stored triangle for `key`, including tombstones.
    #[must_use]
    pub fn get(&self, key: TriangleKey) -> Option<&Triangle> {
        self.triangles.get(key)
    }

    /// The triangle for `key` if it is live.
    #[must_use]
    pub fn triangle(&self, key: TriangleKey) -> Option<&Triangle> {
        self.triangles.get(key).filter(|t| !t.is_removed())
    }

    /// Whether `key` resolves to a live triangle.
    #[must_use]
    pub fn is_live(&self, key: TriangleKey) -> bool {
        self.triangle(key).is_some()
    }

    /// Number of live triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.values().filter(|t| !t.is_removed()).count()
    }

    /// Whether there are no live triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.values().all(Triangle::is_removed)
    }

    /// Number of triangles in the arena, tombstones included.
    ///
    /// Bounds the length of any walk that does not revisit a triangle.
    #[must_use]
    pub fn arena_len(&self) -> usize {
        self.triangles.len()
    }

    // =========================================================================
    // ROOT AND LINKS
    // =========================================================================

    /// The triangle traversal and point location start from.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<TriangleKey> {
        self.root
    }

    /// Sets the traversal root.
    pub const fn set_root(&mut self, root: Option<TriangleKey>) {
        self.root = root;
    }

    /// Links `edge` with `opposite` in both directions.
    ///
    /// With `None`, `edge` becomes a boundary edge. Handles into stale
    /// triangles are skipped.
    pub fn link(&mut self, edge: Halfedge, opposite: Option<Halfedge>) {
        if let Some(t) = self.triangles.get_mut(edge.triangle()) {
            t.set_opposite(edge.side(), opposite);
        }
        if let Some(opp) = opposite
            && let Some(t) = self.triangles.get_mut(opp.triangle())
        {
            t.set_opposite(opp.side(), Some(edge));
        }
    }

    /// The opposite of `edge`, if both its triangle and the neighbor exist.
    #[must_use]
    pub fn opposite(&self, edge: Halfedge) -> Option<Halfedge> {
        let opp = self.get(edge.triangle())?.opposite(edge.side())?;
        self.get(opp.triangle()).map(|_| opp)
    }

    // =========================================================================
    // TRAVERSAL
    // =========================================================================

    /// Live triangles reachable from the root, depth first.
    #[must_use]
    pub fn iter(&self) -> TriangleIter<'_> {
        let mut visited = fast_hash_set_with_capacity(self.triangles.len());
        let mut stack = Vec::new();
        if let Some(root) = self.root.filter(|&r| self.triangles.contains_key(r)) {
            visited.insert(root);
            stack.push(root);
        }
        TriangleIter {
            mesh: self,
            stack,
            visited,
        }
    }

    /// Keys of the live triangles reachable from the root.
    #[must_use]
    pub fn keys(&self) -> Vec<TriangleKey> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Half-edges of live triangles whose neighbor is missing or a tombstone.
    #[must_use]
    pub fn boundary_halfedges(&self) -> Vec<Halfedge> {
        self.iter()
            .flat_map(|(key, t)| {
                EdgeSide::ALL.into_iter().filter_map(move |side| {
                    let live_neighbor = t.neighbor(side).is_some_and(|n| self.is_live(n));
                    (!live_neighbor).then_some(Halfedge::new(key, side))
                })
            })
            .collect()
    }

    /// Undirected edges of the live triangles.
    #[must_use]
    pub fn edges(&self) -> FastHashSet<EdgeKey> {
        self.iter()
            .flat_map(|(_, t)| {
                EdgeSide::ALL.map(|side| {
                    let (a, b) = t.edge_vertices(side);
                    EdgeKey::new(a, b)
                })
            })
            .collect()
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Depth-first iterator over live triangles; see [`TriangleCollection::iter`].
#[derive(Debug)]
pub struct TriangleIter<'a> {
    mesh: &'a TriangleCollection,
    stack: Vec<TriangleKey>,
    visited: FastHashSet<TriangleKey>,
}

impl<'a> Iterator for TriangleIter<'a> {
    type Item = (TriangleKey, &'a Triangle);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.stack.pop() {
            let Some(triangle) = self.mesh.triangles.get(key) else {
                continue;
            };
            for side in EdgeSide::ALL {
                if let Some(n) = triangle.neighbor(side)
                    && self.mesh.triangles.contains_key(n)
                    && self.visited.insert(n)
                {
                    self.stack.push(n);
                }
            }
            if !triangle.is_removed() {
                return Some((key, triangle));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a TriangleCollection {
    type Item = (TriangleKey, &'a Triangle);
    type IntoIter = TriangleIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex;

    /// Two triangles sharing the diagonal b–c of the unit square.
    fn two_triangles() -> (TriangleCollection, TriangleKey, TriangleKey) {
        let mut mesh = TriangleCollection::new();
        let a = mesh.insert_vertex(vertex!(0.0, 0.0));
        let b = mesh.insert_vertex(vertex!(1.0, 0.0));
        let c = mesh.insert_vertex(vertex!(0.0, 1.0));
        let d = mesh.insert_vertex(vertex!(1.0, 1.0));
        let t1 = mesh.insert_triangle([a, b, c]).unwrap();
        let t2 = mesh.insert_triangle([b, d, c]).unwrap();
        mesh.link(
            Halfedge::new(t1, EdgeSide::S23),
            Some(Halfedge::new(t2, EdgeSide::S31)),
        );
        mesh.set_root(Some(t1));
        (mesh, t1, t2)
    }

    #[test]
    fn test_link_is_symmetric() {
        let (mesh, t1, t2) = two_triangles();
        let e = Halfedge::new(t1, EdgeSide::S23);
        let opp = mesh.opposite(e).unwrap();
        assert_eq!(opp, Halfedge::new(t2, EdgeSide::S31));
        assert_eq!(mesh.opposite(opp), Some(e));
        let (a, b) = e.vertices(&mesh).unwrap();
        assert_eq!(opp.vertices(&mesh), Some((b, a)));
    }

    #[test]
    fn test_removed_triangle_key_is_stale() {
        let (mut mesh, t1, t2) = two_triangles();
        let removed = mesh.remove_triangle(t2).unwrap();
        assert_eq!(removed.neighbor(EdgeSide::S31), Some(t1));
        assert!(mesh.get(t2).is_none());
        assert!(mesh.opposite(Halfedge::new(t1, EdgeSide::S23)).is_none());
        assert_eq!(
            mesh.remove_triangle(t2).unwrap_err(),
            TriangleCollectionError::MissingTriangle { triangle: t2 }
        );
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_tombstones_are_traversed_but_not_yielded() {
        let (mut mesh, t1, t2) = two_triangles();
        mesh.mark_removed(t1).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.arena_len(), 2);
        assert!(!mesh.is_live(t1));
        assert!(mesh.get(t1).is_some());
        // Root is the tombstone; the live neighbor is still reached.
        assert_eq!(mesh.keys(), vec![t2]);
    }

    #[test]
    fn test_boundary_and_edges() {
        let (mesh, _, _) = two_triangles();
        assert_eq!(mesh.boundary_halfedges().len(), 4);
        assert_eq!(mesh.edges().len(), 5);
        assert_eq!((&mesh).into_iter().count(), 2);
    }

    #[test]
    fn test_insert_triangle_rejects_unknown_vertex() {
        let mut mesh = TriangleCollection::new();
        let a = mesh.insert_vertex(vertex!(0.0, 0.0));
        let mut other = TriangleCollection::new();
        other.insert_vertex(vertex!(5.0, 5.0));
        let foreign = other.insert_vertex(vertex!(6.0, 6.0));
        assert_eq!(
            mesh.insert_triangle([a, a, foreign]).unwrap_err(),
            TriangleCollectionError::MissingVertex { vertex: foreign }
        );
    }

    #[test]
    fn test_empty_and_clear() {
        let (mut mesh, _, _) = two_triangles();
        assert!(!mesh.is_empty());
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.iter().count(), 0);
        assert_eq!(mesh.number_of_vertices(), 0);
        assert!(mesh.root().is_none());
    }

    #[test]
    fn test_collection_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TriangleCollection>();
    }
}
