//! Splitting boundaries into closed loops and choosing the outer loop

use lscan_core::{BoundingBox, CancelFlag, Edge, Result, UniqueEdgeSet};
use serde::{Deserialize, Serialize};

/// Stage name reported when loop splitting is cancelled
pub const SPLIT_STAGE: &str = "loop splitting";

/// Loops of one face; index 0 is the outer loop once ordered, the rest are holes
pub type Bucket = Vec<UniqueEdgeSet>;

/// Split a simplified boundary into vertex-connected loops.
///
/// A loop is seeded with the first unconsumed edge and grows by every
/// remaining edge that shares a vertex with an edge already in it. Loops come
/// out in the order of their seed edges.
pub fn split_loops(mut boundary: UniqueEdgeSet) -> Vec<UniqueEdgeSet> {
    let mut loops = Vec::new();
    while let Some(next) = next_loop(&mut boundary) {
        loops.push(next);
    }
    loops
}

/// [`split_loops`] that checks `cancel` before starting each loop
pub fn split_loops_with_cancel(
    mut boundary: UniqueEdgeSet,
    cancel: &CancelFlag,
) -> Result<Vec<UniqueEdgeSet>> {
    let mut loops = Vec::new();
    loop {
        cancel.check(SPLIT_STAGE)?;
        match next_loop(&mut boundary) {
            Some(next) => loops.push(next),
            None => return Ok(loops),
        }
    }
}

fn next_loop(remaining: &mut UniqueEdgeSet) -> Option<UniqueEdgeSet> {
    let seed = remaining.take(0)?;
    let mut current = UniqueEdgeSet::new();
    current.add(seed);

    let mut frontier = vec![seed];
    while let Some(edge) = frontier.pop() {
        // Highest index first so the lower ones stay valid
        for index in remaining.edges_sharing_vertex(&edge).into_iter().rev() {
            if let Some(next) = remaining.take(index) {
                current.add(next);
                frontier.push(next);
            }
        }
    }

    Some(current)
}

/// Picks which loop of a face is its outer boundary
pub trait OuterLoopStrategy {
    /// Index of the outer loop, or `None` for an empty list
    fn outer_index(&self, loops: &[UniqueEdgeSet]) -> Option<usize>;
}

/// The loop holding the endpoint farthest from the world origin.
///
/// This only looks at distance from the origin, so it assumes the outer loop
/// reaches farther out than any hole. Ties keep the earlier loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FarthestFromOrigin;

impl OuterLoopStrategy for FarthestFromOrigin {
    fn outer_index(&self, loops: &[UniqueEdgeSet]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, boundary) in loops.iter().enumerate() {
            for point in boundary.points() {
                let distance = Edge::from_origin(&point.coords).length();
                if best.map_or(true, |(_, farthest)| distance > farthest) {
                    best = Some((index, distance));
                }
            }
        }
        best.map(|(index, _)| index)
    }
}

/// The loop with the longest bounding box diagonal. Ties keep the earlier loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestBoundingBox;

impl OuterLoopStrategy for LargestBoundingBox {
    fn outer_index(&self, loops: &[UniqueEdgeSet]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, boundary) in loops.iter().enumerate() {
            let diagonal = boundary.diagonal();
            if best.map_or(true, |(_, largest)| diagonal > largest) {
                best = Some((index, diagonal));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Serializable choice of [`OuterLoopStrategy`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OuterLoopMethod {
    #[default]
    FarthestFromOrigin,
    LargestBoundingBox,
}

impl OuterLoopStrategy for OuterLoopMethod {
    fn outer_index(&self, loops: &[UniqueEdgeSet]) -> Option<usize> {
        match self {
            OuterLoopMethod::FarthestFromOrigin => FarthestFromOrigin.outer_index(loops),
            OuterLoopMethod::LargestBoundingBox => LargestBoundingBox.outer_index(loops),
        }
    }
}

/// Move the outer loop chosen by `strategy` to index 0.
///
/// The outer loop swaps places with whatever was first; the other loops keep
/// their positions.
pub fn order_bucket<S>(mut loops: Vec<UniqueEdgeSet>, strategy: &S) -> Bucket
where
    S: OuterLoopStrategy + ?Sized,
{
    if let Some(outer) = strategy.outer_index(&loops) {
        loops.swap(0, outer);
    }
    loops
}
