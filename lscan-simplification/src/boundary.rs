//! Face boundary extraction and collinear edge merging

use crate::face::Face;
use itertools::{iproduct, Itertools};
use lscan_core::{CancelFlag, Edge, Point3d, Result, UniqueEdgeSet, Vector3d};

/// Stage name reported when boundary simplification is cancelled
pub const SIMPLIFY_STAGE: &str = "boundary simplification";

/// The outline of one face and the normal it came from
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBoundary {
    pub edges: UniqueEdgeSet,
    pub normal: Vector3d,
}

/// Edges of `face` that are not shared by two of its triangles.
///
/// Each pair of triangles is compared edge against edge (9 comparisons per
/// pair); any overlap marks that edge interior. The boundary is the face's
/// edge set minus the interior edges.
pub fn extract_boundary(face: &Face) -> FaceBoundary {
    let mut shared = UniqueEdgeSet::new();

    for (m, n) in face.triangles().iter().tuple_combinations() {
        for (a, b) in iproduct!(m.edges.iter(), n.edges.iter()) {
            if Edge::are_overlapping_edges(a, b) {
                shared.add(*a);
            }
        }
    }

    FaceBoundary {
        edges: UniqueEdgeSet::set_difference(&face.edges(), &shared),
        normal: face.normal(),
    }
}

/// Merge collinear neighbouring edges until none remain.
///
/// Two edges merge when they share a vertex and are parallel or anti-parallel
/// within `tolerance` degrees; both are replaced by one edge between their
/// unshared endpoints. Returns the number of merges performed.
pub fn simplify_boundary(edges: &mut UniqueEdgeSet, tolerance: f64) -> usize {
    let mut merges = 0;
    while merge_one(edges, tolerance) {
        merges += 1;
    }
    merges
}

/// [`simplify_boundary`] that checks `cancel` before every merge
pub fn simplify_boundary_with_cancel(
    edges: &mut UniqueEdgeSet,
    tolerance: f64,
    cancel: &CancelFlag,
) -> Result<usize> {
    let mut merges = 0;
    loop {
        cancel.check(SIMPLIFY_STAGE)?;
        if !merge_one(edges, tolerance) {
            return Ok(merges);
        }
        merges += 1;
    }
}

/// Perform the first available merge; false at the fixed point
fn merge_one(edges: &mut UniqueEdgeSet, tolerance: f64) -> bool {
    let Some((i, j, shared)) = find_mergeable(edges, tolerance) else {
        return false;
    };
    // j > i, so removing j first leaves i in place
    let (Some(b), Some(a)) = (edges.take(j), edges.take(i)) else {
        return false;
    };
    if let (Some(from), Some(to)) = (a.other_vertex(&shared), b.other_vertex(&shared)) {
        edges.add(Edge::new(from, to));
    }
    true
}

fn find_mergeable(edges: &UniqueEdgeSet, tolerance: f64) -> Option<(usize, usize, Point3d)> {
    let list = edges.edges();
    (0..list.len())
        .tuple_combinations()
        .find_map(|(i, j)| {
            let (a, b) = (&list[i], &list[j]);
            let shared = Edge::has_shared_vertex(a, b)?;
            Edge::are_parallel_or_anti_parallel(a, b, tolerance).then_some((i, j, shared))
        })
}
