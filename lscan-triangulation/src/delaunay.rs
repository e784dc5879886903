//! Constrained Delaunay triangulation of planar straight-line graphs
//!
//! Wraps spade's [`ConstrainedDelaunayTriangulation`]. Every input segment is
//! kept as a triangle edge, no Steiner points are inserted, and triangles
//! outside the outer boundary or inside a marked hole are dropped.
//!
//! Dropping works by flood fill across non-constraint edges: seeds are the
//! hull triangles whose hull edge is not a segment, and the triangle under
//! each hole marker.

use lscan_core::{Error, Result};
use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation, Triangulation};
use std::collections::{HashMap, HashSet};
use tracing::{trace, warn};

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// A 2D planar straight-line graph ready for triangulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarGraph {
    /// Vertex positions
    pub vertices: Vec<Point2<f64>>,
    /// Mandatory edges as index pairs into `vertices`
    pub segments: Vec<[usize; 2]>,
    /// One point strictly inside each hole
    pub holes: Vec<Point2<f64>>,
}

impl PlanarGraph {
    /// Create a graph without holes
    pub fn new(vertices: Vec<Point2<f64>>, segments: Vec<[usize; 2]>) -> Self {
        Self {
            vertices,
            segments,
            holes: Vec::new(),
        }
    }
}

/// Triangulate `graph`, returning counter-clockwise index triples into
/// `graph.vertices`.
pub fn constrained_triangulation(graph: &PlanarGraph) -> Result<Vec<[usize; 3]>> {
    if graph.vertices.len() < 3 {
        return Err(Error::InvalidData(
            "Need at least 3 points for triangulation".to_string(),
        ));
    }

    let mut cdt = Cdt::new();
    let mut handles = Vec::with_capacity(graph.vertices.len());
    let mut lookup: HashMap<FixedVertexHandle, usize> = HashMap::with_capacity(graph.vertices.len());

    for (index, point) in graph.vertices.iter().enumerate() {
        let handle = cdt.insert(*point).map_err(|e| {
            Error::Algorithm(format!("Failed to insert point {}: {:?}", index, e))
        })?;
        if let Some(previous) = lookup.insert(handle, index) {
            return Err(Error::InvalidData(format!(
                "Vertices {} and {} project to the same point",
                previous, index
            )));
        }
        handles.push(handle);
    }

    for &[a, b] in &graph.segments {
        let (from, to) = match (handles.get(a), handles.get(b)) {
            (Some(&from), Some(&to)) if a != b => (from, to),
            _ => {
                return Err(Error::InvalidData(format!("Invalid segment [{}, {}]", a, b)));
            }
        };
        if !cdt.can_add_constraint(from, to) {
            return Err(Error::InvalidData(format!(
                "Segment [{}, {}] crosses another segment",
                a, b
            )));
        }
        cdt.add_constraint(from, to);
    }

    let excluded = excluded_faces(&cdt, &graph.holes)?;

    let mut triangles = Vec::with_capacity(cdt.num_inner_faces() - excluded.len());
    for face in cdt.inner_faces() {
        if excluded.contains(&face.fix()) {
            continue;
        }
        let [v0, v1, v2] = face.vertices();
        let index = |v: FixedVertexHandle| {
            lookup.get(&v).copied().ok_or_else(|| {
                Error::Algorithm("Triangulation produced an unknown vertex".to_string())
            })
        };
        triangles.push([index(v0.fix())?, index(v1.fix())?, index(v2.fix())?]);
    }

    trace!(
        vertices = graph.vertices.len(),
        segments = graph.segments.len(),
        holes = graph.holes.len(),
        triangles = triangles.len(),
        "constrained triangulation"
    );

    Ok(triangles)
}

/// Faces outside the outer boundary or inside a hole
fn excluded_faces(cdt: &Cdt, holes: &[Point2<f64>]) -> Result<HashSet<FixedFaceHandle<InnerTag>>> {
    let mut stack: Vec<FixedFaceHandle<InnerTag>> = Vec::new();

    for face in cdt.inner_faces() {
        let on_open_hull = face.adjacent_edges().iter().any(|edge| {
            edge.rev().face().is_outer() && !cdt.is_constraint_edge(edge.as_undirected().fix())
        });
        if on_open_hull {
            stack.push(face.fix());
        }
    }

    for hole in holes {
        match cdt.locate(*hole) {
            PositionInTriangulation::OnFace(face) => stack.push(face),
            PositionInTriangulation::OnEdge(edge) => {
                let edge = cdt.directed_edge(edge);
                if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    warn!(x = hole.x, y = hole.y, "hole marker lies on a segment, hole left filled");
                    continue;
                }
                for side in [edge, edge.rev()] {
                    if let Some(face) = side.face().as_inner() {
                        stack.push(face.fix());
                    }
                }
            }
            PositionInTriangulation::OnVertex(_) => {
                warn!(x = hole.x, y = hole.y, "hole marker lies on a vertex, hole left filled");
            }
            PositionInTriangulation::OutsideOfConvexHull(_) => {
                warn!(x = hole.x, y = hole.y, "hole marker lies outside the triangulation");
            }
            PositionInTriangulation::NoTriangulation => {
                return Err(Error::InvalidData(
                    "All points are collinear".to_string(),
                ));
            }
        }
    }

    let mut excluded = HashSet::new();
    while let Some(fixed) = stack.pop() {
        if !excluded.insert(fixed) {
            continue;
        }
        let face = cdt.face(fixed);
        for edge in face.adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                if !excluded.contains(&neighbor.fix()) {
                    stack.push(neighbor.fix());
                }
            }
        }
    }

    Ok(excluded)
}

/// Signed area of a 2D triangle, positive when counter-clockwise
pub fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
}
