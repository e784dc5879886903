//! Partition triangles by facet normal

use lscan_core::{Edge, Triangle};

/// Default angle tolerance, in degrees, for two normals to count as equal
pub const DEFAULT_NORMAL_TOLERANCE: f64 = 0.01;

/// Triangles sharing one (near-)identical unit normal
pub type NormalGroup = Vec<Triangle>;

/// Split `triangles` into groups of matching normals.
///
/// Each triangle is compared against the first triangle of every existing
/// group, treating both normals as edges from the origin, and joins the first
/// group within `tolerance` degrees. Otherwise it starts a new group. Groups
/// and their members keep input order.
pub fn group_by_normal(triangles: Vec<Triangle>, tolerance: f64) -> Vec<NormalGroup> {
    let mut groups: Vec<NormalGroup> = Vec::new();

    for triangle in triangles {
        let direction = Edge::from_origin(&triangle.normal);
        let matching = groups.iter_mut().find(|group| {
            Edge::are_parallel(&Edge::from_origin(&group[0].normal), &direction, tolerance)
        });
        match matching {
            Some(group) => group.push(triangle),
            None => groups.push(vec![triangle]),
        }
    }

    groups
}
