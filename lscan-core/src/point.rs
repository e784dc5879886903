//! Point and vector types

use crate::{Error, Result};
use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Scale a normal vector to unit length.
///
/// Fails on zero-length or non-finite vectors instead of producing NaNs.
pub fn unit_normal(normal: &Vector3d) -> Result<Vector3d> {
    if !normal.iter().all(|c| c.is_finite()) {
        return Err(Error::DegenerateInput(format!(
            "normal has non-finite components: {:?}",
            normal
        )));
    }
    let length = normal.norm();
    if length == 0.0 {
        return Err(Error::DegenerateInput("normal has zero length".to_string()));
    }
    Ok(normal / length)
}

/// Check that every coordinate of a point is finite
pub fn is_finite_point(point: &Point3d) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}
