//! Integration tests for end-to-end triangulation of known point sets.
//!
//! ## Test Coverage
//!
//! - Degenerate inputs (empty, fewer than three points, collinear points)
//! - Small configurations with hand-checked triangle counts
//! - Points on shared edges and on boundary edges
//! - Rejection of coincident inputs
//! - Ordering of mutation notifications
//! - Rebuilding from the same input
//! - Larger random clouds checked against the planar Euler relation
//!
//! For property-based tests see `proptest_delaunay_mesh.rs`.

use delaunay_mesh::prelude::*;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing for tests; honours `RUST_LOG`.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn build(points: &[(f64, f64)]) -> DelaunayMesh {
    init_tracing();
    let mut mesh = DelaunayMesh::new();
    for &(x, y) in points {
        mesh.add_vertex(x, y).unwrap();
    }
    mesh.triangulate().unwrap();
    mesh
}

/// Canonical, order-independent description of the live triangles.
fn triangle_signature(mesh: &DelaunayMesh) -> Vec<[(u64, u64); 3]> {
    let mut signature: Vec<[(u64, u64); 3]> = mesh
        .triangles()
        .iter()
        .map(|(_, t)| {
            let mut corners = t.points().map(|p| (p.x().to_bits(), p.y().to_bits()));
            corners.sort_unstable();
            corners
        })
        .collect();
    signature.sort_unstable();
    signature
}

/// `T == 2V - 2 - B` for a connected triangulated region without holes.
fn assert_euler_relation(mesh: &DelaunayMesh) {
    let triangles = mesh.triangles();
    let used: FastHashSet<_> = triangles
        .iter()
        .flat_map(|(_, t)| t.vertices())
        .collect();
    let boundary = triangles.boundary_halfedges().len();
    assert_eq!(
        triangles.len() + 2 + boundary,
        2 * used.len(),
        "Euler relation failed: T={} V={} B={}",
        triangles.len(),
        used.len(),
        boundary
    );
}

// =============================================================================
// DEGENERATE INPUTS
// =============================================================================

#[test]
fn test_empty_input_produces_empty_mesh() {
    let mesh = build(&[]);
    assert_eq!(mesh.number_of_triangles(), 0);
    assert_eq!(mesh.number_of_vertices(), 0);
    assert_eq!(mesh.state(), MeshState::Ready);
}

#[test]
fn test_fewer_than_three_points_produce_no_triangles() {
    let one = build(&[(1.0, 1.0)]);
    assert_eq!(one.number_of_vertices(), 1);
    assert_eq!(one.number_of_triangles(), 0);

    let two = build(&[(1.0, 1.0), (3.0, 2.0)]);
    assert_eq!(two.number_of_vertices(), 2);
    assert_eq!(two.number_of_triangles(), 0);
    assert!(two.is_valid());
}

#[test]
fn test_collinear_points_produce_no_triangles() {
    let points: Vec<(f64, f64)> = (0..6).map(|i| (f64::from(i), 2.0 * f64::from(i))).collect();
    let mesh = build(&points);

    assert_eq!(mesh.number_of_vertices(), 6);
    assert_eq!(mesh.number_of_triangles(), 0);
    assert!(mesh.is_valid());
}

// =============================================================================
// SMALL CONFIGURATIONS
// =============================================================================

#[test]
fn test_single_triangle() {
    let mesh = build(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);

    assert_eq!(mesh.number_of_vertices(), 3);
    assert_eq!(mesh.number_of_triangles(), 1);
    assert_eq!(mesh.statistics().vertices_inserted, 3);
    assert!(mesh.is_valid());

    let (_, t) = mesh.triangles().iter().next().unwrap();
    assert!(t.signed_area() > 0.0);
    assert!(!t.is_super());
    assert!(t.vertices().iter().all(|&k| mesh.triangles().vertex(k).is_some_and(Vertex::is_input_vertex)));
}

#[test]
fn test_right_triangle_takes_one_flip() {
    // The third corner lands inside the circumcircle of a super-vertex triangle.
    let mesh = build(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);

    assert_eq!(mesh.number_of_triangles(), 1);
    assert_eq!(mesh.statistics().flips, 1);
    assert!(mesh.is_valid());

    let (_, t) = mesh.triangles().iter().next().unwrap();
    assert!(almost_equal(t.area(), 50.0));
}

#[test]
fn test_square_produces_two_triangles() {
    let mesh = build(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    assert_eq!(mesh.number_of_triangles(), 2);
    assert_eq!(mesh.triangles().edges().len(), 5);
    assert_eq!(mesh.triangles().boundary_halfedges().len(), 4);
    assert!(mesh.is_valid());

    let total: f64 = mesh.triangles().iter().map(|(_, t)| t.area()).sum();
    assert!(almost_equal(total, 100.0));
}

#[test]
fn test_square_with_interior_point() {
    let mesh = build(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (4.0, 6.0),
    ]);

    assert_eq!(mesh.number_of_vertices(), 5);
    assert_eq!(mesh.number_of_triangles(), 4);
    assert!(mesh.is_valid());
    assert_euler_relation(&mesh);
}

#[test]
fn test_point_on_shared_edge_splits_both_triangles() {
    // The square's center lies on whichever diagonal was chosen.
    let mesh = build(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (5.0, 5.0),
    ]);

    assert_eq!(mesh.number_of_triangles(), 4);
    assert!(mesh.statistics().edge_splits >= 1);
    assert!(mesh.is_valid());

    let center = mesh
        .triangles()
        .vertices()
        .find(|(_, v)| v.point() == Point::new(5.0, 5.0))
        .map(|(k, _)| k)
        .unwrap();
    let incident = mesh
        .triangles()
        .iter()
        .filter(|(_, t)| t.has_vertex(center))
        .count();
    assert_eq!(incident, 4);
}

#[test]
fn test_point_on_hull_edge() {
    // (5, 0) lies on the hull edge between (0, 0) and (10, 0).
    let mesh = build(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0), (5.0, 0.0)]);

    assert_eq!(mesh.number_of_vertices(), 4);
    assert_eq!(mesh.number_of_triangles(), 2);
    assert!(mesh.statistics().edge_splits >= 1);
    assert!(mesh.is_valid());
}

#[test]
fn test_triangles_reference_only_input_vertices() {
    let mesh = build(&[(0.0, 0.0), (6.0, 1.0), (3.0, 7.0), (2.0, 2.0), (5.0, 4.0)]);
    let supers = mesh.super_vertices().unwrap();

    for (_, t) in mesh.triangles() {
        for key in t.vertices() {
            assert!(!supers.contains(&key));
            let vertex = mesh.triangles().vertex(key).unwrap();
            assert!(vertex.is_input_vertex());
            assert!(!vertex.is_super_vertex());
        }
    }
}

#[test]
fn test_attributes_survive_triangulation() {
    init_tracing();
    let mut mesh = DelaunayMesh::new();
    mesh.add_vertex_with_attributes(0.0, 0.0, &[1.0]).unwrap();
    mesh.add_vertex_with_attributes(4.0, 0.0, &[2.0]).unwrap();
    mesh.add_vertex_with_attributes(0.0, 4.0, &[3.0]).unwrap();
    mesh.triangulate().unwrap();

    let mut values: Vec<f64> = mesh
        .vertices()
        .iter()
        .map(|v| v.attributes()[0])
        .collect();
    values.sort_by(f64::total_cmp);
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_duplicate_point_is_rejected() {
    init_tracing();
    let mut mesh = DelaunayMesh::new();
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (5.0, 8.0), (10.0, 0.0)] {
        mesh.add_vertex(x, y).unwrap();
    }

    let err = mesh.triangulate().unwrap_err();
    assert!(
        matches!(err, TriangulationError::DuplicateVertex { index: 3, .. }),
        "unexpected error: {err}"
    );
    assert_eq!(mesh.state(), MeshState::Failed);
    assert_eq!(mesh.number_of_triangles(), 0);
    assert_eq!(mesh.input_vertices().len(), 4);
}

#[test]
fn test_non_finite_input_is_rejected_on_add() {
    let mut mesh = DelaunayMesh::new();
    assert!(mesh.add_vertex(f64::NAN, 0.0).is_err());
    assert!(mesh.add_vertex(0.0, f64::INFINITY).is_err());
    assert!(mesh.input_vertices().is_empty());
}

#[test]
fn test_invalid_options_are_rejected() {
    init_tracing();
    let options = ConstructionOptions::default().with_padding(0.0);
    let mut mesh = DelaunayMesh::with_options(options);
    mesh.add_vertex(0.0, 0.0).unwrap();

    let err = mesh.triangulate().unwrap_err();
    assert!(matches!(err, TriangulationError::InvalidOptions { .. }));
    assert_eq!(mesh.state(), MeshState::Failed);
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[test]
fn test_notification_order_per_vertex() {
    init_tracing();
    let mut mesh = DelaunayMesh::with_observer(EventRecorder::default());
    let points = generate_random_points_seeded(40, (-10.0, 10.0), 11).unwrap();
    for p in &points {
        mesh.add_vertex(p.x(), p.y()).unwrap();
    }
    mesh.triangulate().unwrap();

    let events = mesh.observer().events();
    let inserted = events
        .iter()
        .filter(|e| matches!(e, MeshEvent::VertexInserted { .. }))
        .count();
    assert_eq!(inserted, points.len());

    // Each vertex: dividing, divided, flip pairs, inserted.
    let mut expect_dividing = true;
    let mut iter = events.iter().peekable();
    while let Some(event) = iter.next() {
        match event {
            MeshEvent::DividingTriangle { vertex, .. } => {
                assert!(expect_dividing, "split started before previous vertex finished");
                expect_dividing = false;
                let next = iter.next().unwrap();
                assert!(
                    matches!(next, MeshEvent::DividedTriangle { vertex: v, .. } if v == vertex),
                    "expected divided_triangle, got {}",
                    next.name()
                );
            }
            MeshEvent::FlippingEdge { .. } => {
                assert!(!expect_dividing);
                let next = iter.next().unwrap();
                assert_eq!(next.name(), "flipped_edge");
            }
            MeshEvent::VertexInserted { .. } => {
                assert!(!expect_dividing);
                expect_dividing = true;
            }
            other => panic!("unpaired event {}", other.name()),
        }
    }
    assert!(expect_dividing);

    let flips = events
        .iter()
        .filter(|e| matches!(e, MeshEvent::FlippedEdge { .. }))
        .count();
    assert_eq!(flips, mesh.statistics().flips);
}

#[test]
fn test_observer_can_be_borrowed() {
    init_tracing();
    let mut recorder = EventRecorder::default();
    {
        let mut mesh = DelaunayMesh::with_observer(&mut recorder);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            mesh.add_vertex(x, y).unwrap();
        }
        mesh.triangulate().unwrap();
    }
    assert!(!recorder.events().is_empty());
}

// =============================================================================
// REBUILDS AND LARGER INPUTS
// =============================================================================

#[test]
fn test_rebuild_is_deterministic() {
    let points = generate_random_points_seeded(200, (-50.0, 50.0), 3).unwrap();
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x(), p.y())).collect();
    let mut mesh = build(&coords);
    let first = triangle_signature(&mesh);
    let first_count = mesh.number_of_triangles();

    mesh.triangulate().unwrap();
    assert_eq!(mesh.number_of_triangles(), first_count);
    assert_eq!(triangle_signature(&mesh), first);
    assert_eq!(mesh.number_of_vertices(), points.len());

    let other = build(&coords);
    assert_eq!(triangle_signature(&other), first);
}

#[test]
fn test_adding_vertices_after_build_requires_rebuild() {
    let mut mesh = build(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
    assert_eq!(mesh.number_of_triangles(), 1);

    mesh.add_vertex(5.0, 3.0).unwrap();
    assert_eq!(mesh.number_of_triangles(), 1);

    mesh.triangulate().unwrap();
    assert_eq!(mesh.number_of_vertices(), 4);
    assert_eq!(mesh.number_of_triangles(), 3);
    assert!(mesh.is_valid());
}

#[test]
fn test_random_cloud_of_1000_points() {
    let points = generate_random_points_seeded(1000, (0.0, 100.0), 42).unwrap();
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x(), p.y())).collect();
    let mesh = build(&coords);

    assert_eq!(mesh.number_of_vertices(), 1000);
    assert_eq!(mesh.statistics().vertices_inserted, 1000);
    assert!(mesh.number_of_triangles() > 1800);
    assert!(mesh.number_of_triangles() <= 2 * 1000 - 5);
    assert_euler_relation(&mesh);

    if let Err(report) = mesh.validation_report() {
        panic!("validation failed: {report:?}");
    }

    for (_, t) in mesh.triangles() {
        assert!(t.signed_area() > 0.0);
        assert!(!t.is_super());
    }
}

#[test]
fn test_cloud_far_from_origin_is_delaunay() {
    let points = generate_random_points_seeded(500, (1.0e6, 1.0e6 + 1000.0), 7).unwrap();
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x(), p.y())).collect();
    let mesh = build(&coords);

    assert_eq!(mesh.number_of_vertices(), 500);
    assert_eq!(mesh.statistics().vertices_inserted, 500);
    if let Err(report) = mesh.validation_report() {
        panic!("validation failed: {report:?}");
    }
    assert!(mesh.is_valid());
    assert!(find_delaunay_violations(mesh.triangles()).is_empty());
}

#[test]
fn test_full_validation_policy_accepts_valid_input() {
    init_tracing();
    let options = ConstructionOptions::default().with_validation(ValidationPolicy::Full);
    let mut mesh = DelaunayMesh::with_options(options);
    for p in generate_random_points_seeded(150, (-1.0, 1.0), 99).unwrap() {
        mesh.add_vertex(p.x(), p.y()).unwrap();
    }
    mesh.triangulate().unwrap();
    assert_eq!(mesh.state(), MeshState::Ready);
}

#[test]
fn test_locate_after_build() {
    let mesh = build(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    let inside = mesh.locate(&Point::new(2.0, 7.0)).unwrap();
    let t = mesh.triangles().triangle(inside.triangle()).unwrap();
    assert_eq!(t.contains(&Point::new(2.0, 7.0)), PointRelation::Inside);
    assert!(matches!(inside, LocateResult::InsideTriangle(_)));
}
