//! Concatenating triangulated faces back into one facet mesh

use lscan_core::{Facet, FacetMesh};
use lscan_triangulation::TriangulatedFace;

/// One facet per triangle of every face, carrying the face's normal.
///
/// Corners are ordered so their winding agrees with the normal. Vertices on
/// boundaries between faces are not merged.
pub fn reassemble(faces: &[TriangulatedFace]) -> FacetMesh {
    let total = faces.iter().map(|f| f.triangles.len()).sum();
    let mut mesh = FacetMesh::from_facets(Vec::with_capacity(total));

    for face in faces {
        for index in 0..face.triangles.len() {
            let [a, b, c] = face.corners(index);
            let winding = (b - a).cross(&(c - a));
            let facet = if winding.dot(&face.normal) < 0.0 {
                Facet::new(face.normal, a, c, b)
            } else {
                Facet::new(face.normal, a, b, c)
            };
            mesh.push(facet);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use lscan_core::{Point3d, Vector3d};

    fn quad(normal: Vector3d) -> TriangulatedFace {
        TriangulatedFace {
            vertices: vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(1.0, 1.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2], [0, 3, 2]],
            normal,
        }
    }

    #[test]
    fn test_reassemble_concatenates_faces() {
        let mesh = reassemble(&[quad(Vector3d::z()), quad(-Vector3d::z())]);
        assert_eq!(mesh.len(), 4);
        assert_eq!(mesh.normals(), vec![Vector3d::z(), -Vector3d::z()]);
    }

    #[test]
    fn test_winding_follows_normal() {
        let mesh = reassemble(&[quad(Vector3d::z()), quad(-Vector3d::z())]);
        for facet in &mesh.facets {
            let [a, b, c] = facet.vertices;
            let winding = (b - a).cross(&(c - a));
            assert!(winding.dot(&facet.normal) > 0.0);
        }
    }

    #[test]
    fn test_reassemble_nothing() {
        assert!(reassemble(&[]).is_empty());
    }
}
