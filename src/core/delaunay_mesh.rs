//! Incremental Delaunay triangulation of a planar point set.
//!
//! [`DelaunayMesh`] owns the input vertices and drives the whole pipeline in
//! [`DelaunayMesh::triangulate`]:
//!
//! 1. build a super-triangle enclosing the padded input extents,
//! 2. insert every input vertex in order (locate, split, legalize),
//! 3. discard every triangle touching a super-triangle corner,
//! 4. optionally validate the result.
//!
//! Every structural change is reported to the mesh's [`MeshObserver`].

#![forbid(unsafe_code)]

use crate::core::algorithms::insertion::{
    InsertionContext, InsertionError, InsertionStatistics, insert_vertex,
};
use crate::core::algorithms::locate::{LocateError, LocateResult, locate};
use crate::core::observer::{MeshObserver, NoopObserver};
use crate::core::triangle_collection::{
    TriangleCollection, TriangleCollectionError, TriangleKey, VertexKey,
};
use crate::core::util::delaunay_validation::{
    MeshValidationError, MeshValidationReport, validate_adjacency, validate_delaunay,
    validate_orientation, validation_report,
};
use crate::core::vertex::{Vertex, VertexError};
use crate::core::vertex_collection::VertexCollection;
use crate::geometry::extents::Extents;
use crate::geometry::point::Point;
use std::f64::consts::FRAC_PI_3;
use std::time::{Duration, Instant};
use thiserror::Error;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Checks run at the end of every successful [`DelaunayMesh::triangulate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// No checks.
    #[default]
    Never,
    /// Adjacency and orientation checks.
    Structural,
    /// Structural checks plus the quadratic empty-circumcircle scan.
    Full,
}

/// Settings for building a triangulation.
///
/// The super-triangle encloses the input extents grown on each axis by
/// `relative_margin` times the extent plus `padding`.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::delaunay_mesh::{ConstructionOptions, ValidationPolicy};
///
/// let options = ConstructionOptions::default()
///     .with_padding(2.0)
///     .with_validation(ValidationPolicy::Full);
/// assert_eq!(options.relative_margin(), 0.2);
/// assert_eq!(options.padding(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstructionOptions {
    relative_margin: f64,
    padding: f64,
    validation: ValidationPolicy,
}

impl Default for ConstructionOptions {
    fn default() -> Self {
        Self {
            relative_margin: 0.2,
            padding: 1.0,
            validation: ValidationPolicy::Never,
        }
    }
}

impl ConstructionOptions {
    /// Sets the margin as a fraction of the extents' width and height.
    #[must_use]
    pub const fn with_relative_margin(mut self, relative_margin: f64) -> Self {
        self.relative_margin = relative_margin;
        self
    }

    /// Sets the absolute padding added on each axis.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the post-construction checks.
    #[must_use]
    pub const fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// The relative margin.
    #[must_use]
    pub const fn relative_margin(&self) -> f64 {
        self.relative_margin
    }

    /// The absolute padding.
    #[must_use]
    pub const fn padding(&self) -> f64 {
        self.padding
    }

    /// The post-construction checks.
    #[must_use]
    pub const fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    fn validate(&self) -> Result<(), TriangulationError> {
        if !(self.relative_margin.is_finite() && self.relative_margin >= 0.0) {
            return Err(TriangulationError::InvalidOptions {
                message: format!(
                    "relative margin must be finite and non-negative, got {}",
                    self.relative_margin
                ),
            });
        }
        if !(self.padding.is_finite() && self.padding > 0.0) {
            return Err(TriangulationError::InvalidOptions {
                message: format!(
                    "padding must be finite and positive, got {}",
                    self.padding
                ),
            });
        }
        Ok(())
    }
}

// =============================================================================
// ERRORS AND STATE
// =============================================================================

/// Errors raised while building a triangulation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// The construction options are out of range.
    #[error("Invalid construction options: {message}")]
    InvalidOptions {
        /// What is wrong.
        message: String,
    },

    /// A vertex could not be created.
    #[error("Invalid vertex: {0}")]
    InvalidVertex(#[from] VertexError),

    /// An input vertex coincides with an earlier one.
    #[error("Input vertex {index} at ({point}) duplicates an earlier vertex")]
    DuplicateVertex {
        /// Position in the input list.
        index: usize,
        /// The duplicated position.
        point: Point,
    },

    /// A vertex could not be inserted.
    #[error("Insertion failed: {0}")]
    Insertion(#[from] InsertionError),

    /// Super-triangle setup or cleanup hit a missing element.
    #[error("Mesh storage error: {0}")]
    Collection(#[from] TriangleCollectionError),

    /// The finished mesh failed a configured check.
    #[error("Validation failed: {0}")]
    Validation(#[from] MeshValidationError),
}

/// Where a [`DelaunayMesh`] is in its construction pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshState {
    /// Nothing has been built.
    #[default]
    Empty,
    /// The super-triangle exists.
    Seeded,
    /// Input vertices are being inserted.
    Inserting,
    /// Super-triangle residue has been discarded.
    Cleaned,
    /// The triangulation is complete.
    Ready,
    /// The last run aborted; the mesh is empty.
    Failed,
}

// =============================================================================
// DELAUNAY MESH
// =============================================================================

/// A planar Delaunay triangulation built incrementally.
///
/// Input vertices are collected with [`add_vertex`](Self::add_vertex) and
/// triangulated on [`triangulate`](Self::triangulate). Re-running
/// `triangulate` rebuilds the mesh from scratch, so vertices added after a run
/// take effect on the next one.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::delaunay_mesh::DelaunayMesh;
///
/// let mut mesh = DelaunayMesh::new();
/// mesh.add_vertex(0.0, 0.0).unwrap();
/// mesh.add_vertex(10.0, 0.0).unwrap();
/// mesh.add_vertex(10.0, 10.0).unwrap();
/// mesh.add_vertex(0.0, 10.0).unwrap();
/// mesh.triangulate().unwrap();
///
/// assert_eq!(mesh.number_of_triangles(), 2);
/// assert_eq!(mesh.number_of_vertices(), 4);
/// assert!(mesh.is_valid());
/// ```
#[derive(Clone, Debug)]
pub struct DelaunayMesh<O: MeshObserver = NoopObserver> {
    input_vertices: VertexCollection,
    vertices: VertexCollection,
    triangles: TriangleCollection,
    extents: Extents,
    options: ConstructionOptions,
    observer: O,
    state: MeshState,
    statistics: InsertionStatistics,
    super_vertices: Option<[VertexKey; 3]>,
    elapsed: Option<Duration>,
}

impl Default for DelaunayMesh<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaunayMesh<NoopObserver> {
    /// Creates an empty mesh with default options and no observer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }

    /// Creates an empty mesh with the given options and no observer.
    #[must_use]
    pub fn with_options(options: ConstructionOptions) -> Self {
        Self::with_observer_and_options(NoopObserver, options)
    }

    /// Triangulates `points` with default options.
    ///
    /// # Errors
    ///
    /// * `TriangulationError::InvalidVertex` if a coordinate is not finite
    /// * any error of [`triangulate`](Self::triangulate)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::core::delaunay_mesh::DelaunayMesh;
    /// use delaunay_mesh::geometry::point::Point;
    ///
    /// let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
    /// let mesh = DelaunayMesh::from_points(&points).unwrap();
    /// assert_eq!(mesh.number_of_triangles(), 1);
    /// ```
    pub fn from_points(points: &[Point]) -> Result<Self, TriangulationError> {
        let mut mesh = Self::new();
        for p in points {
            mesh.add_vertex(p.x(), p.y())?;
        }
        mesh.triangulate()?;
        Ok(mesh)
    }
}

impl<O: MeshObserver> DelaunayMesh<O> {
    /// Creates an empty mesh reporting to `observer`.
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self::with_observer_and_options(observer, ConstructionOptions::default())
    }

    /// Creates an empty mesh with explicit observer and options.
    #[must_use]
    pub fn with_observer_and_options(observer: O, options: ConstructionOptions) -> Self {
        Self {
            input_vertices: VertexCollection::new(),
            vertices: VertexCollection::new(),
            triangles: TriangleCollection::new(),
            extents: Extents::new(),
            options,
            observer,
            state: MeshState::Empty,
            statistics: InsertionStatistics::default(),
            super_vertices: None,
            elapsed: None,
        }
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Appends an input vertex at `(x, y)`.
    ///
    /// # Errors
    ///
    /// * `VertexError::NonFiniteCoordinate` if `x` or `y` is not finite; the
    ///   input is left unchanged
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Result<(), VertexError> {
        self.add_vertex_with_attributes(x, y, &[])
    }

    /// Appends an input vertex carrying scalar attributes.
    ///
    /// # Errors
    ///
    /// * `VertexError::NonFiniteCoordinate` if `x` or `y` is not finite
    /// * `VertexError::NonFiniteAttribute` if an attribute is not finite
    pub fn add_vertex_with_attributes(
        &mut self,
        x: f64,
        y: f64,
        attributes: &[f64],
    ) -> Result<(), VertexError> {
        let vertex = Vertex::try_new(x, y, attributes)?;
        self.push_vertex(vertex);
        Ok(())
    }

    /// Appends an already validated vertex.
    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.extents.add_point(&vertex.point());
        self.input_vertices.push(vertex);
    }

    // =========================================================================
    // TRIANGULATION
    // =========================================================================

    /// Builds the triangulation of every input vertex, replacing any previous
    /// result.
    ///
    /// An empty input yields an empty mesh. Fewer than three vertices, or
    /// vertices that are all collinear, yield a mesh without triangles.
    ///
    /// # Errors
    ///
    /// * `TriangulationError::InvalidOptions` if the options are out of range
    /// * `TriangulationError::DuplicateVertex` if two inputs coincide
    /// * `TriangulationError::Insertion` if a vertex cannot be inserted
    /// * `TriangulationError::Validation` if a configured check fails
    ///
    /// On error the mesh is left empty in state [`MeshState::Failed`].
    pub fn triangulate(&mut self) -> Result<(), TriangulationError> {
        let start = Instant::now();
        self.reset();

        let result = self.options.validate().and_then(|()| self.run());
        self.elapsed = Some(start.elapsed());

        match result {
            Ok(()) => {
                self.state = MeshState::Ready;
                tracing::debug!(
                    vertices = self.vertices.len(),
                    triangles = self.triangles.len(),
                    flips = self.statistics.flips,
                    walk_steps = self.statistics.walk_steps,
                    elapsed = ?self.elapsed,
                    "triangulation complete"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "triangulation aborted");
                self.reset();
                self.state = MeshState::Failed;
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.triangles.clear();
        self.vertices.clear();
        self.statistics = InsertionStatistics::default();
        self.super_vertices = None;
        self.state = MeshState::Empty;
    }

    fn run(&mut self) -> Result<(), TriangulationError> {
        if self.input_vertices.is_empty() {
            return Ok(());
        }

        self.seed_super_triangle()?;
        self.state = MeshState::Inserting;
        self.vertices = VertexCollection::with_capacity(self.input_vertices.len());
        for (index, input) in self.input_vertices.iter().enumerate() {
            let accepted = input.clone().into_accepted();
            let key = self.triangles.insert_vertex(accepted.clone());
            let mut ctx =
                InsertionContext::new(&mut self.triangles, &mut self.observer, &mut self.statistics);
            insert_vertex(&mut ctx, key).map_err(|err| match err {
                InsertionError::DuplicateVertex { .. } => TriangulationError::DuplicateVertex {
                    index,
                    point: input.point(),
                },
                other => other.into(),
            })?;
            self.vertices.push(accepted);
        }

        self.remove_super_triangle()?;
        self.state = MeshState::Cleaned;

        match self.options.validation {
            ValidationPolicy::Never => {}
            ValidationPolicy::Structural => {
                validate_adjacency(&self.triangles)?;
                validate_orientation(&self.triangles)?;
            }
            ValidationPolicy::Full => {
                validate_adjacency(&self.triangles)?;
                validate_orientation(&self.triangles)?;
                validate_delaunay(&self.triangles)?;
            }
        }
        Ok(())
    }

    /// Builds an equilateral triangle around the padded extents and makes it
    /// the root.
    fn seed_super_triangle(&mut self) -> Result<(), TriangulationError> {
        let margin = self.options.relative_margin;
        let padding = self.options.padding;
        let ex = self.extents.offset(
            self.extents.width().mul_add(margin, padding),
            self.extents.height().mul_add(margin, padding),
        );
        let (x1, y1, x2, y2) = (ex.x_min(), ex.y_min(), ex.x_max(), ex.y_max());

        let tan60 = FRAC_PI_3.tan();
        let ad = (y2 - y1) / tan60;
        let side = 2.0f64.mul_add(ad, x2 - x1);
        let height = side / 2.0 * tan60;

        let corners = [
            Point::new(x1 - ad, y1),
            Point::new(x2 + ad, y1),
            Point::new(f64::midpoint(x1, x2), y1 + height),
        ];
        let keys = corners.map(|p| self.triangles.insert_vertex(Vertex::super_vertex(p)));
        let root = self.triangles.insert_triangle(keys)?;
        self.triangles.set_root(Some(root));
        self.super_vertices = Some(keys);
        self.state = MeshState::Seeded;

        tracing::debug!(?corners, "seeded super-triangle");
        Ok(())
    }

    /// Turns every live triangle touching a super-triangle corner into a
    /// tombstone.
    fn remove_super_triangle(&mut self) -> Result<(), TriangulationError> {
        let doomed: Vec<TriangleKey> = self
            .triangles
            .iter()
            .filter(|(_, t)| t.is_super())
            .map(|(key, _)| key)
            .collect();
        for &key in &doomed {
            self.triangles.mark_removed(key)?;
        }
        tracing::debug!(removed = doomed.len(), "discarded super-triangle residue");
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// The vertices passed in, in insertion order.
    #[must_use]
    pub const fn input_vertices(&self) -> &VertexCollection {
        &self.input_vertices
    }

    /// The vertices accepted into the current triangulation, in insertion
    /// order.
    #[must_use]
    pub const fn vertices(&self) -> &VertexCollection {
        &self.vertices
    }

    /// The triangle mesh. Iterating it yields only live triangles.
    #[must_use]
    pub const fn triangles(&self) -> &TriangleCollection {
        &self.triangles
    }

    /// The bounding box of the input vertices.
    #[must_use]
    pub const fn extents(&self) -> Extents {
        self.extents
    }

    /// Wall-clock duration of the last [`triangulate`](Self::triangulate).
    #[must_use]
    pub const fn elapsed_time(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Number of live triangles.
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices accepted into the triangulation.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Keys of the super-triangle corners of the current build.
    #[must_use]
    pub const fn super_vertices(&self) -> Option<[VertexKey; 3]> {
        self.super_vertices
    }

    /// The pipeline state.
    #[must_use]
    pub const fn state(&self) -> MeshState {
        self.state
    }

    /// The construction options.
    #[must_use]
    pub const fn options(&self) -> &ConstructionOptions {
        &self.options
    }

    /// Replaces the options used by the next build.
    pub const fn set_options(&mut self, options: ConstructionOptions) {
        self.options = options;
    }

    /// Counters of the last build.
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.statistics
    }

    /// The observer.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub const fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the mesh and returns its observer.
    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Locates `point` in the finished mesh.
    ///
    /// # Errors
    ///
    /// * `LocateError::EmptyMesh` before a successful build
    /// * `LocateError::OutsideMesh` if the point is outside every live triangle
    pub fn locate(&self, point: &Point) -> Result<LocateResult, LocateError> {
        locate(&self.triangles, point)
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Whether the mesh passes every structural and Delaunay check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_report().is_ok()
    }

    /// Runs every check and returns all failures.
    ///
    /// # Errors
    ///
    /// Returns the report if any invariant fails.
    pub fn validation_report(&self) -> Result<(), MeshValidationReport> {
        validation_report(&self.triangles, true)
    }
}
