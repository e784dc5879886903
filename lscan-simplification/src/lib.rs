//! Planar-face mesh simplification
//!
//! This crate reduces a triangle soup, such as an STL part, to the fewest
//! triangles that still cover the same planar faces:
//! - Triangles are grouped by normal and split into connected faces
//! - Each face's boundary is extracted and collinear edges merged
//! - Boundaries are split into an outer loop and holes
//! - Every face is re-triangulated with a constrained triangulation
//!
//! ```rust,ignore
//! use lscan_simplification::{Simplifier, SimplifyConfig};
//!
//! let simplified = Simplifier::new(SimplifyConfig::default()).run(&mesh)?;
//! ```

pub mod boundary;
pub mod face;
pub mod loops;
pub mod normal_grouping;
pub mod pipeline;
pub mod reassembly;
pub mod tracing_ext;

pub use boundary::*;
pub use face::*;
pub use loops::*;
pub use normal_grouping::*;
pub use pipeline::*;
pub use reassembly::*;

use lscan_core::{FacetMesh, Result};

/// Simplify a mesh by replacing its planar regions with fewer triangles
pub trait MeshSimplifier {
    fn simplify(&self, mesh: &FacetMesh) -> Result<FacetMesh>;
}

impl MeshSimplifier for Simplifier {
    fn simplify(&self, mesh: &FacetMesh) -> Result<FacetMesh> {
        self.run(mesh)
    }
}

/// Run the whole pipeline with the default configuration
pub fn simplify(mesh: &FacetMesh) -> Result<FacetMesh> {
    Simplifier::default().run(mesh)
}
