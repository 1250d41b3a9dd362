//! Ordered vertex lists.

#![forbid(unsafe_code)]

use crate::core::vertex::Vertex;
use crate::geometry::point::Point;
use std::ops::Index;
use std::slice;

/// An append-only, insertion-ordered list of vertices.
///
/// The mesh keeps two of these: the input set fed through
/// `add_vertex`, and the vertices accepted into the current triangulation.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::vertex_collection::VertexCollection;
/// use delaunay_mesh::vertex;
///
/// let mut vertices = VertexCollection::new();
/// vertices.push(vertex!(0.0, 0.0));
/// vertices.push(vertex!(1.0, 0.0));
/// assert_eq!(vertices.len(), 2);
/// assert_eq!(vertices[1].x(), 1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct VertexCollection {
    vertices: Vec<Vertex>,
}

impl VertexCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Appends a vertex.
    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Removes every vertex. Used only when a triangulation is rebuilt.
    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// The positions in insertion order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(Vertex::point).collect()
    }

    /// The vertices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl Index<usize> for VertexCollection {
    type Output = Vertex;

    fn index(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }
}

impl<'a> IntoIterator for &'a VertexCollection {
    type Item = &'a Vertex;
    type IntoIter = slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl FromIterator<Vertex> for VertexCollection {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}
