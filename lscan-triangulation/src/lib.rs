//! # lscan triangulation
//!
//! Re-triangulation of simplified planar faces.
//!
//! A face arrives as an ordered bucket of boundary loops (outer loop first,
//! holes after). It is turned into an indexed planar record, rotated so its
//! plane projects well onto xy, triangulated with a constrained Delaunay
//! triangulation that honours every boundary segment and leaves holes empty,
//! and lifted back into world space.

pub mod delaunay;
pub mod planar;
pub mod projection;

pub use delaunay::*;
pub use planar::*;
pub use projection::*;

use lscan_core::{Point3d, Result, UniqueEdgeSet, Vector3d};

/// Configuration for face triangulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    /// |normal.z| below which a face is rotated before projection
    pub vertical_threshold: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
        }
    }
}

/// A face after triangulation, in world space
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulatedFace {
    pub vertices: Vec<Point3d>,
    pub triangles: Vec<[usize; 3]>,
    pub normal: Vector3d,
}

impl TriangulatedFace {
    /// Corner positions of triangle `index`
    pub fn corners(&self, index: usize) -> [Point3d; 3] {
        self.triangles[index].map(|i| self.vertices[i])
    }
}

/// Triangulate one face.
///
/// `bucket[0]` is the outer loop and any further loops are holes. Errors are
/// reported as [`lscan_core::Error::Triangulation`] carrying `face`.
pub fn triangulate_face(
    face: usize,
    bucket: &[UniqueEdgeSet],
    normal: &Vector3d,
    config: &TriangulationConfig,
) -> Result<TriangulatedFace> {
    triangulate_bucket(bucket, normal, config).map_err(|e| e.for_face(face))
}

fn triangulate_bucket(
    bucket: &[UniqueEdgeSet],
    normal: &Vector3d,
    config: &TriangulationConfig,
) -> Result<TriangulatedFace> {
    let rotation = PlaneRotation::for_normal(normal, config.vertical_threshold);
    let record = PlanarFaceRecord::from_bucket(bucket, rotation)?;
    let (graph, depths) = record.project(rotation);
    let triangles = constrained_triangulation(&graph)?;

    let vertices = graph
        .vertices
        .iter()
        .zip(depths)
        .map(|(p, depth)| rotation.lift(p, depth))
        .collect();

    Ok(TriangulatedFace {
        vertices,
        triangles,
        normal: *normal,
    })
}
