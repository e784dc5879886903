//! Core data structures and traits for lscan
//!
//! This crate provides the geometric value types shared by every stage of the
//! STL-to-LDraw simplification pipeline: directed edges and their comparison
//! predicates, triangles, the overlap-unique edge set, facet and indexed
//! meshes, and the common error type.

pub mod point;
pub mod edge;
pub mod triangle;
pub mod edge_set;
pub mod mesh;
pub mod traits;
pub mod cancel;
pub mod error;

pub use point::*;
pub use edge::*;
pub use triangle::*;
pub use edge_set::*;
pub use mesh::*;
pub use traits::*;
pub use cancel::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

// Type aliases for easier imports
pub type Point = Point3d;
pub type Mesh = FacetMesh;
