//! Directed line segments and the predicates used to compare them
//!
//! An [`Edge`] runs from `start` to `end`. Two notions of equality exist and
//! are deliberately kept apart:
//!
//! - [`Edge::same_edge`] requires the same direction.
//! - [`Edge::are_overlapping_edges`] accepts either direction.

use crate::point::{is_finite_point, Point3d, Vector3d};
use serde::{Deserialize, Serialize};

/// Default angle tolerance, in degrees, for parallel / anti-parallel tests
pub const DEFAULT_PARALLEL_TOLERANCE: f64 = 0.1;

/// Number of decimal places the cosine is rounded to before `acos`
const COSINE_DECIMALS: i32 = 5;

/// A directed 3D segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Point3d,
    pub end: Point3d,
}

impl Edge {
    /// Create an edge between two points
    pub fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    /// Create an edge from raw coordinates
    pub fn from_coords(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self::new(Point3d::new(x1, y1, z1), Point3d::new(x2, y2, z2))
    }

    /// Edge from the world origin to the tip of `vector`
    pub fn from_origin(vector: &Vector3d) -> Self {
        Self::new(Point3d::origin(), Point3d::from(*vector))
    }

    /// Direction vector `end - start`
    pub fn direction(&self) -> Vector3d {
        self.end - self.start
    }

    /// Euclidean length of the edge
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Both endpoints, start first
    pub fn vertices(&self) -> [Point3d; 2] {
        [self.start, self.end]
    }

    /// The same segment traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// True when start and end coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// True when both endpoints have finite coordinates
    pub fn is_finite(&self) -> bool {
        is_finite_point(&self.start) && is_finite_point(&self.end)
    }

    /// Dot product of the two direction vectors
    pub fn dot(a: &Edge, b: &Edge) -> f64 {
        a.direction().dot(&b.direction())
    }

    /// Angle between the direction vectors in degrees, in `[0, 180]`.
    ///
    /// The cosine is rounded to five decimal places before `acos`, so tiny
    /// float noise neither leaves the domain nor registers as an angle.
    /// Returns `None` when either edge has zero length.
    pub fn angle_between(a: &Edge, b: &Edge) -> Option<f64> {
        let denominator = a.length() * b.length();
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }
        let scale = 10f64.powi(COSINE_DECIMALS);
        let ratio = ((Edge::dot(a, b) / denominator) * scale).round() / scale;
        Some(ratio.clamp(-1.0, 1.0).acos().to_degrees())
    }

    /// True when the directions differ by at most `tolerance` degrees
    pub fn are_parallel(a: &Edge, b: &Edge, tolerance: f64) -> bool {
        matches!(Edge::angle_between(a, b), Some(angle) if angle <= tolerance)
    }

    /// True when the directions are within `tolerance` degrees of 0° or 180°
    pub fn are_parallel_or_anti_parallel(a: &Edge, b: &Edge, tolerance: f64) -> bool {
        match Edge::angle_between(a, b) {
            Some(angle) => angle <= tolerance || angle >= 180.0 - tolerance,
            None => false,
        }
    }

    /// Exact coordinate match in the same direction
    pub fn same_edge(a: &Edge, b: &Edge) -> bool {
        a.start == b.start && a.end == b.end
    }

    /// Exact coordinate match in either direction
    pub fn are_overlapping_edges(a: &Edge, b: &Edge) -> bool {
        Edge::same_edge(a, b) || (a.start == b.end && a.end == b.start)
    }

    /// The vertex shared by `a` and `b`, if any.
    ///
    /// Checked in the order end/start, start/start, start/end, end/end and the
    /// first hit wins. For coincident edges (see [`Edge::is_coincident`]) this
    /// therefore reports a single point even though both are shared.
    pub fn has_shared_vertex(a: &Edge, b: &Edge) -> Option<Point3d> {
        if a.end == b.start {
            Some(a.end)
        } else if a.start == b.start {
            Some(a.start)
        } else if a.start == b.end {
            Some(a.start)
        } else if a.end == b.end {
            Some(a.end)
        } else {
            None
        }
    }

    /// True when both endpoints are shared, in either direction
    pub fn is_coincident(a: &Edge, b: &Edge) -> bool {
        Edge::are_overlapping_edges(a, b)
    }

    /// The endpoint of this edge that is not `shared`.
    ///
    /// Returns `None` when `shared` is not an endpoint.
    pub fn other_vertex(&self, shared: &Point3d) -> Option<Point3d> {
        if self.start == *shared {
            Some(self.end)
        } else if self.end == *shared {
            Some(self.start)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length() {
        let edge = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(edge.length(), 3f64.sqrt());
    }

    #[test]
    fn test_dot() {
        let e1 = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let e2 = Edge::from_coords(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let e3 = Edge::from_coords(-1.0, -1.0, -1.0, 0.0, 0.0, 0.0);
        assert_eq!(Edge::dot(&e1, &e2), -3.0);
        assert_eq!(Edge::dot(&e1, &e3), 3.0);
    }

    #[test]
    fn test_same_edge() {
        let e1 = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let e2 = Edge::from_coords(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let e3 = Edge::from_coords(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
        assert!(!Edge::same_edge(&e1, &e2));
        assert!(Edge::same_edge(&e1, &e1));
        assert!(!Edge::same_edge(&e1, &e3));
    }

    #[test]
    fn test_overlapping_edges() {
        let e1 = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let e2 = e1.reversed();
        let e3 = Edge::from_coords(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
        assert!(Edge::are_overlapping_edges(&e1, &e1));
        assert!(Edge::are_overlapping_edges(&e1, &e2));
        assert!(!Edge::are_overlapping_edges(&e1, &e3));
    }

    #[test]
    fn test_shared_vertex_priority() {
        let a = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);

        // end of a == start of b
        let b = Edge::from_coords(1.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        assert_eq!(Edge::has_shared_vertex(&a, &b), Some(Point3d::new(1.0, 0.0, 0.0)));

        // start of a == start of b
        let b = Edge::from_coords(0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        assert_eq!(Edge::has_shared_vertex(&a, &b), Some(Point3d::origin()));

        // start of a == end of b
        let b = Edge::from_coords(0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(Edge::has_shared_vertex(&a, &b), Some(Point3d::origin()));

        // end of a == end of b
        let b = Edge::from_coords(1.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(Edge::has_shared_vertex(&a, &b), Some(Point3d::new(1.0, 0.0, 0.0)));

        let b = Edge::from_coords(5.0, 5.0, 5.0, 6.0, 6.0, 6.0);
        assert_eq!(Edge::has_shared_vertex(&a, &b), None);
    }

    #[test]
    fn test_shared_vertex_on_coincident_edges() {
        let a = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        // Same direction: start/start is the first rule that matches.
        assert_eq!(Edge::has_shared_vertex(&a, &a), Some(Point3d::origin()));
        // Reversed: end/start matches first.
        assert_eq!(
            Edge::has_shared_vertex(&a, &a.reversed()),
            Some(Point3d::new(1.0, 0.0, 0.0))
        );
        assert!(Edge::is_coincident(&a, &a.reversed()));
    }

    #[test]
    fn test_parallel() {
        let e1 = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let parallel = Edge::from_coords(1.0, 1.0, 1.0, 2.0, 2.0, 2.0);
        let anti_parallel = Edge::from_coords(2.0, 2.0, 2.0, 1.0, 1.0, 1.0);
        let perpendicular = Edge::from_coords(0.0, 0.0, 0.0, 1.0, -1.0, 0.0);

        assert!(Edge::are_parallel(&e1, &parallel, 0.01));
        assert!(!Edge::are_parallel(&e1, &anti_parallel, 0.01));
        assert!(!Edge::are_parallel(&e1, &perpendicular, 0.01));

        assert!(Edge::are_parallel_or_anti_parallel(&e1, &parallel, DEFAULT_PARALLEL_TOLERANCE));
        assert!(Edge::are_parallel_or_anti_parallel(&e1, &anti_parallel, DEFAULT_PARALLEL_TOLERANCE));
        assert!(!Edge::are_parallel_or_anti_parallel(&e1, &perpendicular, DEFAULT_PARALLEL_TOLERANCE));
    }

    #[test]
    fn test_parallel_tolerance() {
        let x_axis = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        // about 0.057 degrees off the x axis
        let nearly = Edge::from_coords(0.0, 0.0, 0.0, 1000.0, 1.0, 0.0);
        assert!(Edge::are_parallel(&x_axis, &nearly, 0.1));
        assert!(Edge::are_parallel_or_anti_parallel(&x_axis, &nearly.reversed(), 0.1));
        // 45 degrees
        let diagonal = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        assert!(!Edge::are_parallel(&x_axis, &diagonal, 0.1));
    }

    #[test]
    fn test_degenerate_edges_are_never_parallel() {
        let point = Edge::from_coords(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        let e = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert!(point.is_degenerate());
        assert_eq!(Edge::angle_between(&point, &e), None);
        assert!(!Edge::are_parallel(&point, &e, 180.0));
        assert!(!Edge::are_parallel_or_anti_parallel(&point, &e, 0.1));
    }

    #[test]
    fn test_other_vertex() {
        let e = Edge::from_coords(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(e.other_vertex(&Point3d::origin()), Some(Point3d::new(1.0, 0.0, 0.0)));
        assert_eq!(e.other_vertex(&Point3d::new(1.0, 0.0, 0.0)), Some(Point3d::origin()));
        assert_eq!(e.other_vertex(&Point3d::new(2.0, 0.0, 0.0)), None);
    }
}
