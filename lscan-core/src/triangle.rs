//! Triangles as closed loops of three edges

use crate::edge::Edge;
use crate::point::{Point3d, Vector3d};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Three edges forming a closed loop plus the facet normal supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub edges: [Edge; 3],
    pub normal: Vector3d,
}

impl Triangle {
    /// Build a triangle from three edges
    pub fn new(e0: Edge, e1: Edge, e2: Edge, normal: Vector3d) -> Self {
        Self { edges: [e0, e1, e2], normal }
    }

    /// Build a triangle from its corners: `v0 -> v1`, `v1 -> v2`, `v2 -> v0`
    pub fn from_vertices(v0: Point3d, v1: Point3d, v2: Point3d, normal: Vector3d) -> Self {
        Self::new(Edge::new(v0, v1), Edge::new(v1, v2), Edge::new(v2, v0), normal)
    }

    /// Start points of the three edges
    pub fn vertices(&self) -> [Point3d; 3] {
        [self.edges[0].start, self.edges[1].start, self.edges[2].start]
    }

    /// True when every pair of edges shares a vertex
    pub fn is_closed_loop(&self) -> bool {
        let [e0, e1, e2] = &self.edges;
        Edge::has_shared_vertex(e0, e1).is_some()
            && Edge::has_shared_vertex(e0, e2).is_some()
            && Edge::has_shared_vertex(e1, e2).is_some()
    }

    /// True when any edge overlaps `edge` in either direction
    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|e| Edge::are_overlapping_edges(e, edge))
    }

    /// True when the triangles share an edge traversed in the same direction.
    ///
    /// Consistently wound neighbours traverse their common edge in opposite
    /// directions, so this is stricter than [`Triangle::has_edge`].
    pub fn are_neighbors(t1: &Triangle, t2: &Triangle) -> bool {
        t1.edges
            .iter()
            .any(|x| t2.edges.iter().any(|y| Edge::same_edge(x, y)))
    }

    /// Index of the first triangle containing `edge`
    pub fn match_triangle_index(edge: &Edge, triangles: &[Triangle]) -> Option<usize> {
        triangles.iter().position(|t| t.has_edge(edge))
    }

    /// Indices of every triangle containing `edge`
    pub fn match_triangle_indices(edge: &Edge, triangles: &[Triangle]) -> Vec<usize> {
        triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_edge(edge))
            .map(|(i, _)| i)
            .collect()
    }

    /// Reject triangles the pipeline cannot process
    pub fn validate(&self) -> Result<()> {
        if !self.edges.iter().all(Edge::is_finite) {
            return Err(Error::DegenerateInput(
                "triangle has non-finite coordinates".to_string(),
            ));
        }
        if self.edges.iter().any(Edge::is_degenerate) {
            return Err(Error::DegenerateInput(
                "triangle has a zero-length edge".to_string(),
            ));
        }
        if !self.is_closed_loop() {
            return Err(Error::DegenerateInput(
                "triangle edges do not form a closed loop".to_string(),
            ));
        }
        let [v0, v1, v2] = self.vertices();
        if (v1 - v0).cross(&(v2 - v0)).norm() == 0.0 {
            return Err(Error::DegenerateInput(
                "triangle vertices are collinear".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> Vector3d {
        Vector3d::new(0.0, 0.0, 1.0)
    }

    fn unit_triangle() -> Triangle {
        Triangle::from_vertices(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            up(),
        )
    }

    #[test]
    fn test_from_vertices_is_closed_loop() {
        let t = unit_triangle();
        assert!(t.is_closed_loop());
        assert_eq!(t.edges[0].end, t.edges[1].start);
        assert_eq!(t.edges[2].end, t.edges[0].start);
        assert_eq!(t.vertices()[2], Point3d::new(0.0, 1.0, 0.0));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_open_loop() {
        let t = Triangle::new(
            Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            Edge::from_coords(1.0, 0.0, 0.0, 0.0, 1.0, 0.0),
            Edge::from_coords(5.0, 5.0, 0.0, 6.0, 6.0, 0.0),
            up(),
        );
        assert!(!t.is_closed_loop());
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_has_edge_either_direction() {
        let t = unit_triangle();
        let e = Edge::from_coords(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(t.has_edge(&e));
        assert!(t.has_edge(&e.reversed()));
        assert!(!t.has_edge(&Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_neighbors_require_same_direction() {
        let a = unit_triangle();
        // Shares edge (1,0,0)-(0,1,0) wound the opposite way.
        let b = Triangle::from_vertices(
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            up(),
        );
        assert!(!Triangle::are_neighbors(&a, &b));
        assert!(b.has_edge(&a.edges[1]));

        // Same shared edge wound the same way.
        let c = Triangle::new(
            a.edges[1],
            Edge::from_coords(0.0, 1.0, 0.0, 1.0, 1.0, 0.0),
            Edge::from_coords(1.0, 1.0, 0.0, 1.0, 0.0, 0.0),
            up(),
        );
        assert!(Triangle::are_neighbors(&a, &c));
    }

    #[test]
    fn test_match_triangle_index() {
        let a = unit_triangle();
        let b = Triangle::from_vertices(
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            up(),
        );
        let triangles = [a, b];
        let shared = Edge::from_coords(0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(Triangle::match_triangle_index(&shared, &triangles), Some(0));
        assert_eq!(Triangle::match_triangle_indices(&shared, &triangles), vec![0, 1]);

        let outside = Edge::from_coords(9.0, 9.0, 0.0, 8.0, 8.0, 0.0);
        assert_eq!(Triangle::match_triangle_index(&outside, &triangles), None);
        assert!(Triangle::match_triangle_indices(&outside, &triangles).is_empty());
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let collinear = Triangle::from_vertices(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(2.0, 0.0, 0.0),
            up(),
        );
        assert!(matches!(collinear.validate(), Err(Error::DegenerateInput(_))));

        let zero_edge = Triangle::from_vertices(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            up(),
        );
        assert!(zero_edge.validate().is_err());
    }
}
