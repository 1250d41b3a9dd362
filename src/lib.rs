//! # `delaunay_mesh`
//!
//! This is a library for building planar
//! [Delaunay triangulations](https://en.wikipedia.org/wiki/Delaunay_triangulation)
//! incrementally: points are inserted one at a time into a half-edge mesh,
//! located with an adjacency walk, spliced in by splitting the triangle (or
//! edge) they fall on, and legalized with recursive Lawson edge flips.
//!
//! # Features
//!
//! - Arena-backed half-edge mesh with generation-checked triangle and vertex keys
//! - Walk-based point location without any auxiliary spatial index
//! - Interior and edge splits, with boundary edges handled
//! - Recursive edge-flip legalization restoring the empty-circumcircle property
//! - Per-vertex scalar attributes with linear interpolation along edges
//! - Ordered mutation notifications through the [`MeshObserver`](core::observer::MeshObserver) trait
//! - Structural and Delaunay validation helpers
//!
//! # Basic Usage
//!
//! ```rust
//! use delaunay_mesh::prelude::*;
//!
//! let mut mesh = DelaunayMesh::new();
//! for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (4.0, 6.0)] {
//!     mesh.add_vertex(x, y).unwrap();
//! }
//! mesh.triangulate().unwrap();
//!
//! assert_eq!(mesh.number_of_vertices(), 5);
//! assert_eq!(mesh.number_of_triangles(), 4);
//! assert!(mesh.is_valid());
//!
//! for (_, triangle) in mesh.triangles() {
//!     assert!(triangle.signed_area() > 0.0);
//! }
//! ```
//!
//! # Observing Mutations
//!
//! Every split and flip is reported synchronously, in order, to the mesh's
//! observer:
//!
//! ```rust
//! use delaunay_mesh::prelude::*;
//!
//! let mut mesh = DelaunayMesh::with_observer(EventRecorder::default());
//! mesh.add_vertex(0.0, 0.0).unwrap();
//! mesh.add_vertex(10.0, 0.0).unwrap();
//! mesh.add_vertex(0.0, 10.0).unwrap();
//! mesh.triangulate().unwrap();
//!
//! let inserted = mesh
//!     .observer()
//!     .events()
//!     .iter()
//!     .filter(|e| matches!(e, MeshEvent::VertexInserted { .. }))
//!     .count();
//! assert_eq!(inserted, 3);
//! ```
//!
//! # Mesh Invariants
//!
//! Between operations the mesh maintains:
//!
//! - **Orientation** – every live triangle is counter-clockwise.
//! - **Manifold adjacency** – every opposite link is mutual and joins the same
//!   two vertices in reverse order.
//! - **Delaunay property** – no accepted vertex lies strictly inside the
//!   circumcircle of a live triangle.
//!
//! They are checked by [`DelaunayMesh::is_valid`](core::delaunay_mesh::DelaunayMesh::is_valid)
//! and reported in full by
//! [`DelaunayMesh::validation_report`](core::delaunay_mesh::DelaunayMesh::validation_report).
//!
//! # Limitations
//!
//! - The super-triangle is finite, so for some inputs a few convex-hull edges
//!   are lost together with the triangles touching its corners.
//! - Coincident input points are rejected rather than merged.
//! - Predicates use tolerance-based floating-point comparisons, not exact
//!   arithmetic.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the mesh data structures and the insertion
/// pipeline built on them.
pub mod core {
    /// Point location, splitting and legalization
    pub mod algorithms {
        /// Edge flips and Lawson legalization
        pub mod flips;
        /// Interior and edge splits
        pub mod insertion;
        /// Point location by adjacency walk
        pub mod locate;
    }
    /// Collection aliases used throughout the crate
    pub mod collections;
    pub mod delaunay_mesh;
    pub mod halfedge;
    pub mod observer;
    pub mod triangle;
    pub mod triangle_collection;
    /// Validation utilities
    pub mod util {
        pub mod delaunay_validation;
        pub use delaunay_validation::*;
    }
    pub mod vertex;
    pub mod vertex_collection;

    // Re-export the `core` modules.
    pub use delaunay_mesh::*;
    pub use halfedge::*;
    pub use observer::*;
    pub use triangle::*;
    pub use triangle_collection::*;
    pub use vertex::*;
    pub use vertex_collection::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Contains geometric primitives: points, vectors, matrices, circles, bounding
/// boxes and the predicates built on them.
pub mod geometry {
    /// Geometric algorithms on point sets
    pub mod algorithms {
        /// Planar convex hulls
        pub mod convex_hull;
        pub use convex_hull::*;
    }
    pub mod circle;
    pub mod extents;
    pub mod matrix;
    pub mod point;
    pub mod predicates;
    /// Tolerance comparisons and point generation
    pub mod util;
    pub mod vector;

    pub use algorithms::*;
    pub use circle::*;
    pub use extents::*;
    pub use matrix::*;
    pub use point::*;
    pub use predicates::*;
    pub use util::*;
    pub use vector::*;
}

/// A prelude module that re-exports commonly used types and macros.
pub mod prelude {
    pub use crate::core::{
        algorithms::{
            insertion::{InsertionError, InsertionStatistics},
            locate::{LocateError, LocateResult},
        },
        delaunay_mesh::*,
        halfedge::*,
        observer::*,
        triangle::*,
        triangle_collection::*,
        util::*,
        vertex::*,
        vertex_collection::*,
    };

    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
        fast_hash_set_with_capacity,
    };

    pub use crate::geometry::{
        algorithms::*, circle::*, extents::*, matrix::*, point::*, predicates::*, util::*,
        vector::*,
    };

    // Convenience macros
    pub use crate::vertex;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
