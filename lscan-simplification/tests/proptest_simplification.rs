//! Property-based tests for the simplification stages.
//!
//! Run with: cargo test -p lscan-simplification -- proptest

use lscan_core::{Facet, FacetMesh, Point3d, Triangle, Vector3d, DEFAULT_PARALLEL_TOLERANCE};
use lscan_simplification::{
    assemble_faces, extract_boundary, simplify, simplify_boundary, split_loops,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Triangles of an nx x ny grid of unit cells at z = 0, keeping only the
/// cells selected by `mask`
fn grid_triangles(nx: usize, ny: usize, mask: &[bool]) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            if !mask[j * nx + i] {
                continue;
            }
            let (x, y) = (i as f64, j as f64);
            let a = Point3d::new(x, y, 0.0);
            let b = Point3d::new(x + 1.0, y, 0.0);
            let c = Point3d::new(x + 1.0, y + 1.0, 0.0);
            let d = Point3d::new(x, y + 1.0, 0.0);
            triangles.push(Triangle::from_vertices(a, b, c, Vector3d::z()));
            triangles.push(Triangle::from_vertices(a, c, d, Vector3d::z()));
        }
    }
    triangles
}

/// Grid dimensions plus a cell mask
fn arb_masked_grid() -> impl Strategy<Value = (usize, usize, Vec<bool>)> {
    (1usize..6, 1usize..6).prop_flat_map(|(nx, ny)| {
        prop::collection::vec(any::<bool>(), nx * ny).prop_map(move |mask| (nx, ny, mask))
    })
}

/// A full nx x ny plate as a facet mesh, offset by (ox, oy, oz)
fn plate_mesh(nx: usize, ny: usize, offset: [i32; 3]) -> FacetMesh {
    let shift = Vector3d::new(offset[0] as f64, offset[1] as f64, offset[2] as f64);
    let mask = vec![true; nx * ny];
    let facets = grid_triangles(nx, ny, &mask)
        .iter()
        .map(|t| {
            let [a, b, c] = t.vertices();
            Facet::new(t.normal, a + shift, b + shift, c + shift)
        })
        .collect();
    FacetMesh::from_facets(facets)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_face_assembly_conserves_triangles((nx, ny, mask) in arb_masked_grid()) {
        let triangles = grid_triangles(nx, ny, &mask);
        let faces = assemble_faces(triangles.clone());

        let total: usize = faces.iter().map(|f| f.count()).sum();
        prop_assert_eq!(total, triangles.len());

        for triangle in &triangles {
            let owners = faces
                .iter()
                .filter(|f| f.triangles().contains(triangle))
                .count();
            prop_assert_eq!(owners, 1);
        }
    }

    #[test]
    fn proptest_simplification_is_idempotent((nx, ny, mask) in arb_masked_grid()) {
        for face in assemble_faces(grid_triangles(nx, ny, &mask)) {
            let mut edges = extract_boundary(&face).edges;
            simplify_boundary(&mut edges, DEFAULT_PARALLEL_TOLERANCE);
            let once = edges.clone();

            prop_assert_eq!(simplify_boundary(&mut edges, DEFAULT_PARALLEL_TOLERANCE), 0);
            prop_assert_eq!(edges, once);
        }
    }

    #[test]
    fn proptest_loop_splitting_keeps_every_edge((nx, ny, mask) in arb_masked_grid()) {
        for face in assemble_faces(grid_triangles(nx, ny, &mask)) {
            let mut edges = extract_boundary(&face).edges;
            simplify_boundary(&mut edges, DEFAULT_PARALLEL_TOLERANCE);
            let count = edges.len();

            let loops = split_loops(edges);
            prop_assert!(!loops.is_empty());
            prop_assert_eq!(loops.iter().map(|l| l.len()).sum::<usize>(), count);
        }
    }

    #[test]
    fn proptest_plate_becomes_two_triangles(
        nx in 1usize..8,
        ny in 1usize..8,
        offset in prop::array::uniform3(-50i32..50),
    ) {
        let mesh = plate_mesh(nx, ny, offset);
        let output = simplify(&mesh).unwrap();

        prop_assert_eq!(output.len(), 2);
        let area: f64 = output
            .facets
            .iter()
            .map(|f| {
                let [a, b, c] = f.vertices;
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum();
        prop_assert!((area - (nx * ny) as f64).abs() < 1e-9);
    }
}
