//! Faces: maximal edge-connected sets of triangles sharing a normal

use lscan_core::{Triangle, UniqueEdgeSet, Vector3d};

/// Edge-connected triangles that all share one normal
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    triangles: Vec<Triangle>,
    normal: Vector3d,
}

impl Face {
    /// Start a face from one triangle, adopting its normal
    pub fn new(first: Triangle) -> Self {
        Self {
            normal: first.normal,
            triangles: vec![first],
        }
    }

    /// Build a face from triangles, adopting the first one's normal
    pub fn from_triangles(triangles: Vec<Triangle>) -> Option<Self> {
        let normal = triangles.first()?.normal;
        Some(Self { triangles, normal })
    }

    /// Number of triangles in the face
    pub fn count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    pub fn normal(&self) -> Vector3d {
        self.normal
    }

    /// Exact comparison against the face normal
    pub fn match_normal(&self, normal: &Vector3d) -> bool {
        self.normal == *normal
    }

    /// Append a triangle; the caller guarantees it belongs to this face
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// True when some triangle of the face is a directional neighbour of `triangle`
    pub fn has_neighbor(&self, triangle: &Triangle) -> bool {
        self.triangles.iter().any(|t| Triangle::are_neighbors(t, triangle))
    }

    /// True when some triangle of the face shares an edge with `triangle` in either direction
    pub fn shares_edge_with(&self, triangle: &Triangle) -> bool {
        self.triangles
            .iter()
            .any(|t| triangle.edges.iter().any(|e| t.has_edge(e)))
    }

    /// Every triangle edge of the face, one per segment
    pub fn edges(&self) -> UniqueEdgeSet {
        self.triangles.iter().flat_map(|t| t.edges).collect()
    }
}

/// Split one normal group into connected faces.
///
/// A face starts from the first unassigned triangle and grows by pulling in
/// any unassigned triangle that has one of its edges (either direction),
/// until nothing more attaches. The worklist is explicit, so large faces do
/// not recurse. Every input triangle ends up in exactly one face.
pub fn assemble_faces(group: Vec<Triangle>) -> Vec<Face> {
    let mut assigned = vec![false; group.len()];
    let mut faces = Vec::new();

    for seed in 0..group.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];
        let mut stack = vec![seed];

        while let Some(current) = stack.pop() {
            for edge in &group[current].edges {
                for candidate in 0..group.len() {
                    if !assigned[candidate] && group[candidate].has_edge(edge) {
                        assigned[candidate] = true;
                        members.push(candidate);
                        stack.push(candidate);
                    }
                }
            }
        }

        let triangles = members.into_iter().map(|i| group[i]).collect();
        if let Some(face) = Face::from_triangles(triangles) {
            faces.push(face);
        }
    }

    faces
}
