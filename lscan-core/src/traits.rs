//! Core traits for lscan

use crate::{edge_set::UniqueEdgeSet, mesh::*, point::*};

/// Trait for objects with an axis-aligned extent
pub trait BoundingBox {
    /// Get the bounding box of the object as `(min, max)`
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        Point3d::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }

    /// Length of the bounding box diagonal
    fn diagonal(&self) -> f64 {
        let (min, max) = self.bounding_box();
        (max - min).norm()
    }
}

fn bounds_of<I: IntoIterator<Item = Point3d>>(points: I) -> (Point3d, Point3d) {
    let mut points = points.into_iter();
    let first = match points.next() {
        Some(p) => p,
        None => return (Point3d::origin(), Point3d::origin()),
    };

    let mut min = first;
    let mut max = first;

    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    (min, max)
}

impl BoundingBox for UniqueEdgeSet {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds_of(self.points())
    }
}

impl BoundingBox for FacetMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds_of(self.facets.iter().flat_map(|f| f.vertices))
    }
}

impl BoundingBox for TriangleMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds_of(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use approx::assert_relative_eq;

    #[test]
    fn test_edge_set_bounding_box() {
        let set: UniqueEdgeSet = [
            Edge::from_coords(-1.0, 0.0, 2.0, 3.0, 1.0, 2.0),
            Edge::from_coords(3.0, 1.0, 2.0, 0.0, 4.0, -2.0),
        ]
        .into_iter()
        .collect();
        let (min, max) = set.bounding_box();
        assert_eq!(min, Point3d::new(-1.0, 0.0, -2.0));
        assert_eq!(max, Point3d::new(3.0, 4.0, 2.0));
        assert_eq!(set.center(), Point3d::new(1.0, 2.0, 0.0));
        assert_relative_eq!(set.diagonal(), (16.0f64 + 16.0 + 16.0).sqrt());
    }

    #[test]
    fn test_empty_bounding_box() {
        let set = UniqueEdgeSet::new();
        assert_eq!(set.bounding_box(), (Point3d::origin(), Point3d::origin()));
        assert_eq!(FacetMesh::new().diagonal(), 0.0);
    }
}
