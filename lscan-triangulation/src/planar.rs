//! Indexed vertex / segment / hole records built from a face's loops

use crate::delaunay::{constrained_triangulation, PlanarGraph};
use crate::projection::PlaneRotation;
use lscan_core::{Error, Point3d, Result, UniqueEdgeSet};

/// One face ready for triangulation.
///
/// Vertices are deduplicated by exact coordinates; segments index into them.
/// Holes hold one interior point per hole loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarFaceRecord {
    pub vertices: Vec<Point3d>,
    pub segments: Vec<[usize; 2]>,
    pub holes: Vec<Point3d>,
}

impl PlanarFaceRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a single loop, without holes
    pub fn from_loop(boundary: &UniqueEdgeSet) -> Self {
        let mut record = Self::new();
        record.add_loop(boundary);
        record
    }

    /// Record for an ordered bucket: loop 0 is the outer boundary, the rest are holes.
    ///
    /// Each hole gets its marker from [`hole_marker`], which triangulates the
    /// hole on its own under `rotation`.
    pub fn from_bucket(bucket: &[UniqueEdgeSet], rotation: PlaneRotation) -> Result<Self> {
        let mut record = Self::new();
        for (index, boundary) in bucket.iter().enumerate() {
            record.add_loop(boundary);
            if index > 0 {
                record.holes.push(hole_marker(boundary, rotation)?);
            }
        }
        Ok(record)
    }

    /// Append every edge of `boundary` as a segment
    pub fn add_loop(&mut self, boundary: &UniqueEdgeSet) {
        for edge in boundary {
            let a = self.vertex_index(edge.start);
            let b = self.vertex_index(edge.end);
            self.segments.push([a, b]);
        }
    }

    /// Index of `point`, inserting it if it is new
    pub fn vertex_index(&mut self, point: Point3d) -> usize {
        match self.vertices.iter().position(|v| *v == point) {
            Some(index) => index,
            None => {
                self.vertices.push(point);
                self.vertices.len() - 1
            }
        }
    }

    /// Rotate and flatten into a 2D graph, returning the dropped depth of every vertex
    pub fn project(&self, rotation: PlaneRotation) -> (PlanarGraph, Vec<f64>) {
        let (vertices, depths): (Vec<_>, Vec<_>) =
            self.vertices.iter().map(|v| rotation.project(v)).unzip();
        let holes = self.holes.iter().map(|h| rotation.project(h).0).collect();
        let graph = PlanarGraph {
            vertices,
            segments: self.segments.clone(),
            holes,
        };
        (graph, depths)
    }
}

/// A point strictly inside the polygon outlined by `hole`.
///
/// The loop is triangulated alone and the centroid of its first triangle is
/// returned.
pub fn hole_marker(hole: &UniqueEdgeSet, rotation: PlaneRotation) -> Result<Point3d> {
    let record = PlanarFaceRecord::from_loop(hole);
    let (graph, _) = record.project(rotation);
    let triangles = constrained_triangulation(&graph)?;
    let first = triangles
        .first()
        .ok_or_else(|| Error::Algorithm("Hole loop produced no triangles".to_string()))?;
    let [a, b, c] = (*first).map(|i| record.vertices[i]);
    Ok(Point3d::from((a.coords + b.coords + c.coords) / 3.0))
}
