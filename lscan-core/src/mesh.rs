//! Mesh data structures and functionality
//!
//! Two representations are used:
//!
//! - [`FacetMesh`] is a triangle soup in STL style, every facet carrying its
//!   own corners and normal. It is both the input and the output of the
//!   simplification pipeline.
//! - [`TriangleMesh`] is the indexed form (shared vertices, index triples)
//!   hosts use for rendering and export.

use crate::point::*;
use crate::triangle::Triangle;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One STL-style facet: three corners and a normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub normal: Vector3d,
    pub vertices: [Point3d; 3],
}

impl Facet {
    /// Create a facet from its normal and corners
    pub fn new(normal: Vector3d, v0: Point3d, v1: Point3d, v2: Point3d) -> Self {
        Self { normal, vertices: [v0, v1, v2] }
    }

    /// Convert to a [`Triangle`] with a unit normal, rejecting degenerate facets
    pub fn to_triangle(&self) -> Result<Triangle> {
        let normal = unit_normal(&self.normal)?;
        let [v0, v1, v2] = self.vertices;
        let triangle = Triangle::from_vertices(v0, v1, v2, normal);
        triangle.validate()?;
        Ok(triangle)
    }
}

impl From<&Triangle> for Facet {
    fn from(triangle: &Triangle) -> Self {
        let [v0, v1, v2] = triangle.vertices();
        Facet::new(triangle.normal, v0, v1, v2)
    }
}

/// Convert facets to validated [`Triangle`]s with unit normals.
///
/// Fails on an empty slice or on the first degenerate facet, naming its index.
pub fn facets_to_triangles(facets: &[Facet]) -> Result<Vec<Triangle>> {
    if facets.is_empty() {
        return Err(Error::DegenerateInput("mesh has no facets".to_string()));
    }
    facets
        .iter()
        .enumerate()
        .map(|(i, facet)| {
            facet.to_triangle().map_err(|e| match e {
                Error::DegenerateInput(message) => {
                    Error::DegenerateInput(format!("facet {}: {}", i, message))
                }
                other => other,
            })
        })
        .collect()
}

/// A list of facets, the mesh exchanged with the host application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetMesh {
    pub facets: Vec<Facet>,
}

impl FacetMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Create a mesh from facets
    pub fn from_facets(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// Get the number of facets
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Add a facet to the mesh
    pub fn push(&mut self, facet: Facet) {
        self.facets.push(facet);
    }

    /// Distinct facet normals, in first-seen order
    pub fn normals(&self) -> Vec<Vector3d> {
        let mut seen: HashSet<[u64; 3]> = HashSet::new();
        self.facets
            .iter()
            .map(|facet| facet.normal)
            .filter(|n| seen.insert([n.x.to_bits(), n.y.to_bits(), n.z.to_bits()]))
            .collect()
    }

    /// [`facets_to_triangles`] over the whole mesh
    pub fn to_triangles(&self) -> Result<Vec<Triangle>> {
        facets_to_triangles(&self.facets)
    }

    /// Build the indexed form, merging corners with identical coordinates
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let mut lookup: HashMap<[u64; 3], usize> = HashMap::new();
        let mut face_normals = Vec::with_capacity(self.facets.len());

        for facet in &self.facets {
            let mut face = [0usize; 3];
            for (slot, vertex) in face.iter_mut().zip(facet.vertices.iter()) {
                let key = [vertex.x.to_bits(), vertex.y.to_bits(), vertex.z.to_bits()];
                *slot = *lookup
                    .entry(key)
                    .or_insert_with(|| mesh.add_vertex(*vertex));
            }
            mesh.add_face(face);
            face_normals.push(facet.normal);
        }

        mesh.set_face_normals(face_normals);
        mesh
    }

    /// Expand an indexed mesh into facets.
    ///
    /// Uses the mesh's face normals when present, otherwise computes them from
    /// the winding. Out-of-range indices and a normal count that differs from
    /// the face count are rejected.
    pub fn from_triangle_mesh(mesh: &TriangleMesh) -> Result<Self> {
        mesh.validate_indices()?;
        let normals = match &mesh.face_normals {
            Some(normals) if normals.len() != mesh.faces.len() => {
                return Err(Error::InvalidData(format!(
                    "{} face normals for {} faces",
                    normals.len(),
                    mesh.faces.len()
                )));
            }
            Some(normals) => normals.clone(),
            None => mesh.calculate_face_normals()?,
        };
        let facets = mesh
            .faces
            .iter()
            .zip(normals)
            .map(|(face, normal)| {
                let [a, b, c] = face.map(|i| mesh.vertices[i]);
                Facet::new(normal, a, b, c)
            })
            .collect();
        Ok(Self { facets })
    }
}

/// A triangle mesh with shared vertices and index triples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
    pub face_normals: Option<Vec<Vector3d>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            face_normals: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            face_normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3d) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check that every face index names a vertex
    pub fn validate_indices(&self) -> Result<()> {
        let count = self.vertices.len();
        for (f, face) in self.faces.iter().enumerate() {
            if let Some(&i) = face.iter().find(|&&i| i >= count) {
                return Err(Error::InvalidData(format!(
                    "face {}: index {} out of range for {} vertices",
                    f, i, count
                )));
            }
        }
        Ok(())
    }

    /// Calculate face normals from the winding of each face.
    ///
    /// Fails on an out-of-range index or a face whose corners are collinear.
    pub fn calculate_face_normals(&self) -> Result<Vec<Vector3d>> {
        self.validate_indices()?;
        self.faces
            .iter()
            .enumerate()
            .map(|(f, face)| {
                let [v0, v1, v2] = face.map(|i| self.vertices[i]);
                (v1 - v0).cross(&(v2 - v0)).try_normalize(0.0).ok_or_else(|| {
                    Error::DegenerateInput(format!("face {}: collinear corners", f))
                })
            })
            .collect()
    }

    /// Set face normals, ignored unless there is one per face
    pub fn set_face_normals(&mut self, normals: Vec<Vector3d>) {
        if normals.len() == self.faces.len() {
            self.face_normals = Some(normals);
        }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
