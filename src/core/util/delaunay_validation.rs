//! Mesh invariant and empty-circumcircle validation utilities.

#![forbid(unsafe_code)]

use crate::core::halfedge::{EdgeSide, Halfedge};
use crate::core::triangle_collection::{TriangleCollection, TriangleKey, VertexKey};
use crate::geometry::predicates::PointRelation;
use thiserror::Error;

/// Errors reported by mesh validation.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::triangle_collection::{TriangleKey, VertexKey};
/// use delaunay_mesh::core::util::delaunay_validation::MeshValidationError;
/// use slotmap::KeyData;
///
/// let triangle = TriangleKey::from(KeyData::from_ffi(1));
/// let vertex = VertexKey::from(KeyData::from_ffi(2));
/// let err = MeshValidationError::DelaunayViolation { triangle, vertex };
/// assert!(matches!(err, MeshValidationError::DelaunayViolation { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MeshValidationError {
    /// A side links to a triangle that is not in the arena.
    #[error("Side {side} of triangle {triangle:?} links to a deleted triangle")]
    DanglingLink {
        /// The linking triangle.
        triangle: TriangleKey,
        /// The linking side.
        side: EdgeSide,
    },
    /// The opposite of a side does not link back to it.
    #[error("Side {side} of triangle {triangle:?} is not linked back by its opposite")]
    AsymmetricLink {
        /// The linking triangle.
        triangle: TriangleKey,
        /// The linking side.
        side: EdgeSide,
    },
    /// Two linked sides do not run between the same vertices in reverse.
    #[error("Side {side} of triangle {triangle:?} is linked to a side with other endpoints")]
    MismatchedEndpoints {
        /// The linking triangle.
        triangle: TriangleKey,
        /// The linking side.
        side: EdgeSide,
    },
    /// A live triangle is clockwise or degenerate.
    #[error("Triangle {triangle:?} has non-positive signed area {area}")]
    NonPositiveArea {
        /// The offending triangle.
        triangle: TriangleKey,
        /// Its signed area.
        area: f64,
    },
    /// A vertex lies strictly inside a triangle's circumcircle.
    #[error("Vertex {vertex:?} lies inside the circumcircle of triangle {triangle:?}")]
    DelaunayViolation {
        /// The offending triangle.
        triangle: TriangleKey,
        /// The vertex inside its circumcircle.
        vertex: VertexKey,
    },
}

/// The invariant a [`MeshValidationError`] belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantKind {
    /// Opposite links are mutual and consistent.
    Adjacency,
    /// Triangles are counter-clockwise.
    Orientation,
    /// Circumcircles are empty.
    Delaunay,
}

/// A single failed invariant.
#[derive(Clone, Debug)]
pub struct InvariantViolation {
    /// The invariant that failed.
    pub kind: InvariantKind,
    /// Details of the failure.
    pub error: MeshValidationError,
}

/// Every invariant failure found by [`validation_report`].
#[derive(Clone, Debug, Default)]
pub struct MeshValidationReport {
    /// The failures, grouped by invariant in check order.
    pub violations: Vec<InvariantViolation>,
}

impl MeshValidationReport {
    /// Whether no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Failures of one invariant.
    pub fn of_kind(&self, kind: InvariantKind) -> impl Iterator<Item = &MeshValidationError> {
        self.violations
            .iter()
            .filter(move |v| v.kind == kind)
            .map(|v| &v.error)
    }
}

// =============================================================================
// STRUCTURAL CHECKS
// =============================================================================

fn adjacency_errors(mesh: &TriangleCollection) -> impl Iterator<Item = MeshValidationError> + '_ {
    mesh.iter().flat_map(move |(key, triangle)| {
        EdgeSide::ALL.into_iter().filter_map(move |side| {
            let opposite = triangle.opposite(side)?;
            let Some(other) = mesh.get(opposite.triangle()) else {
                return Some(MeshValidationError::DanglingLink {
                    triangle: key,
                    side,
                });
            };
            if other.opposite(opposite.side()) != Some(Halfedge::new(key, side)) {
                return Some(MeshValidationError::AsymmetricLink {
                    triangle: key,
                    side,
                });
            }
            let (a, b) = triangle.edge_vertices(side);
            if other.edge_vertices(opposite.side()) != (b, a) {
                return Some(MeshValidationError::MismatchedEndpoints {
                    triangle: key,
                    side,
                });
            }
            None
        })
    })
}

fn orientation_errors(mesh: &TriangleCollection) -> impl Iterator<Item = MeshValidationError> + '_ {
    mesh.iter().filter_map(|(key, triangle)| {
        let area = triangle.signed_area();
        (area.is_nan() || area <= 0.0).then_some(MeshValidationError::NonPositiveArea {
            triangle: key,
            area,
        })
    })
}

/// Checks that every link of a live triangle is mutual and joins reversed
/// sides.
///
/// # Errors
///
/// Returns the first failure found.
pub fn validate_adjacency(mesh: &TriangleCollection) -> Result<(), MeshValidationError> {
    adjacency_errors(mesh).next().map_or(Ok(()), Err)
}

/// Checks that every live triangle has strictly positive signed area.
///
/// # Errors
///
/// Returns the first failure found.
pub fn validate_orientation(mesh: &TriangleCollection) -> Result<(), MeshValidationError> {
    orientation_errors(mesh).next().map_or(Ok(()), Err)
}

// =============================================================================
// DELAUNAY PROPERTY VALIDATION
// =============================================================================

/// The first non-super vertex strictly inside the circumcircle of `triangle`.
fn violating_vertex(mesh: &TriangleCollection, triangle: TriangleKey) -> Option<VertexKey> {
    let t = mesh.triangle(triangle)?;
    let circle = t.circumcircle();
    mesh.vertices()
        .filter(|(key, v)| !v.is_super_vertex() && !t.has_vertex(*key))
        .find(|(_, v)| circle.contains(&v.point()) == PointRelation::Inside)
        .map(|(key, _)| key)
}

/// Keys of every live triangle whose circumcircle strictly contains a
/// non-super vertex of the mesh.
///
/// This is an **O(T×V)** scan intended for tests and diagnostics.
#[must_use]
pub fn find_delaunay_violations(mesh: &TriangleCollection) -> Vec<TriangleKey> {
    mesh.keys()
        .into_iter()
        .filter(|&key| violating_vertex(mesh, key).is_some())
        .collect()
}

/// Checks the empty-circumcircle property of every live triangle.
///
/// Vertices on a circumcircle (within tolerance) do not count as violations.
///
/// # Errors
///
/// Returns the first triangle and vertex found in violation.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::delaunay_mesh::DelaunayMesh;
/// use delaunay_mesh::core::util::delaunay_validation::validate_delaunay;
///
/// let mut mesh = DelaunayMesh::new();
/// for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 1.0)] {
///     mesh.add_vertex(x, y).unwrap();
/// }
/// mesh.triangulate().unwrap();
/// assert!(validate_delaunay(mesh.triangles()).is_ok());
/// ```
pub fn validate_delaunay(mesh: &TriangleCollection) -> Result<(), MeshValidationError> {
    for key in mesh.keys() {
        if let Some(vertex) = violating_vertex(mesh, key) {
            return Err(MeshValidationError::DelaunayViolation {
                triangle: key,
                vertex,
            });
        }
    }
    Ok(())
}

/// Runs every check and collects all failures.
///
/// `check_delaunay` enables the quadratic empty-circumcircle scan.
///
/// # Errors
///
/// Returns the report when at least one invariant fails.
pub fn validation_report(
    mesh: &TriangleCollection,
    check_delaunay: bool,
) -> Result<(), MeshValidationReport> {
    let mut report = MeshValidationReport::default();
    report.violations.extend(adjacency_errors(mesh).map(|error| InvariantViolation {
        kind: InvariantKind::Adjacency,
        error,
    }));
    report
        .violations
        .extend(orientation_errors(mesh).map(|error| InvariantViolation {
            kind: InvariantKind::Orientation,
            error,
        }));
    if check_delaunay {
        for key in mesh.keys() {
            if let Some(vertex) = violating_vertex(mesh, key) {
                report.violations.push(InvariantViolation {
                    kind: InvariantKind::Delaunay,
                    error: MeshValidationError::DelaunayViolation {
                        triangle: key,
                        vertex,
                    },
                });
            }
        }
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}
