//! Property-based tests for mesh invariants.
//!
//! - Empty circumcircle condition for every live triangle
//! - Mutual, endpoint-consistent adjacency links
//! - Counter-clockwise orientation
//! - Every input vertex accepted, no super vertex surviving
//! - Identical output for identical input

use delaunay_mesh::prelude::*;
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

fn point_cloud() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((finite_coordinate(), finite_coordinate()), 3..40)
        .prop_map(|coords| separated(coords.into_iter().map(|(x, y)| Point::new(x, y))))
}

/// Drops points closer than `1e-3` to an earlier one.
fn separated(points: impl Iterator<Item = Point>) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::new();
    for p in points {
        if kept.iter().all(|q| q.distance_to(&p) > 1e-3) {
            kept.push(p);
        }
    }
    kept
}

fn triangulate(points: &[Point]) -> DelaunayMesh {
    let mut mesh = DelaunayMesh::new();
    for p in points {
        mesh.add_vertex(p.x(), p.y()).unwrap();
    }
    mesh.triangulate().unwrap();
    mesh
}

/// Sorted corner coordinates of every live triangle.
fn signature(mesh: &DelaunayMesh) -> Vec<[(u64, u64); 3]> {
    let mut triangles: Vec<[(u64, u64); 3]> = mesh
        .triangles()
        .iter()
        .map(|(_, t)| {
            let mut corners = t.points().map(|p| (p.x().to_bits(), p.y().to_bits()));
            corners.sort_unstable();
            corners
        })
        .collect();
    triangles.sort_unstable();
    triangles
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_empty_circumcircle(points in point_cloud()) {
        let mesh = triangulate(&points);
        let violations = find_delaunay_violations(mesh.triangles());
        prop_assert!(violations.is_empty(), "Delaunay violations: {:?}", violations);
    }

    #[test]
    fn prop_adjacency_is_manifold(points in point_cloud()) {
        let mesh = triangulate(&points);
        prop_assert_eq!(validate_adjacency(mesh.triangles()), Ok(()));

        for (key, triangle) in mesh.triangles() {
            for side in EdgeSide::ALL {
                let edge = Halfedge::new(key, side);
                if let Some(opposite) = triangle.opposite(side) {
                    if !mesh.triangles().is_live(opposite.triangle()) {
                        continue;
                    }
                    prop_assert_eq!(mesh.triangles().opposite(opposite), Some(edge));
                    let (a, b) = triangle.edge_vertices(side);
                    prop_assert_eq!(opposite.vertices(mesh.triangles()), Some((b, a)));
                }
            }
        }
    }

    #[test]
    fn prop_triangles_are_counter_clockwise(points in point_cloud()) {
        let mesh = triangulate(&points);
        prop_assert_eq!(validate_orientation(mesh.triangles()), Ok(()));
        for (_, triangle) in mesh.triangles() {
            prop_assert!(triangle.signed_area() > 0.0);
        }
    }

    #[test]
    fn prop_every_input_is_accepted(points in point_cloud()) {
        let mesh = triangulate(&points);
        prop_assert_eq!(mesh.number_of_vertices(), points.len());
        prop_assert_eq!(mesh.statistics().vertices_inserted, points.len());

        for (_, triangle) in mesh.triangles() {
            prop_assert!(!triangle.is_super());
            for key in triangle.vertices() {
                let vertex = mesh.triangles().vertex(key);
                prop_assert!(vertex.is_some_and(Vertex::is_input_vertex));
            }
        }
    }

    #[test]
    fn prop_triangle_count_is_bounded(points in point_cloud()) {
        let mesh = triangulate(&points);
        let n = points.len();
        if n >= 3 {
            prop_assert!(mesh.number_of_triangles() <= 2 * n - 5);
        }
    }

    #[test]
    fn prop_live_area_is_within_hull(points in point_cloud()) {
        let mesh = triangulate(&points);
        let area: f64 = mesh.triangles().iter().map(|(_, t)| t.area()).sum();
        let hull = convex_hull_area(&points);
        prop_assert!(area <= hull * (1.0 + 1e-9) + 1e-9, "area {} exceeds hull {}", area, hull);
    }

    #[test]
    fn prop_rebuild_is_deterministic(points in point_cloud()) {
        let mut mesh = triangulate(&points);
        let first = signature(&mesh);

        mesh.triangulate().unwrap();
        prop_assert_eq!(&signature(&mesh), &first);
        prop_assert_eq!(&signature(&triangulate(&points)), &first);
    }
}
