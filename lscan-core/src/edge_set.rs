//! Ordered edge container holding at most one edge per geometric segment

use crate::edge::Edge;
use crate::point::Point3d;
use serde::{Deserialize, Serialize};

/// An ordered list of edges in which no two edges overlap.
///
/// Uniqueness is by [`Edge::are_overlapping_edges`], so `a -> b` and `b -> a`
/// count as the same segment and only the first one added is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueEdgeSet {
    edges: Vec<Edge>,
}

impl UniqueEdgeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Create an empty set with room for `capacity` edges
    pub fn with_capacity(capacity: usize) -> Self {
        Self { edges: Vec::with_capacity(capacity) }
    }

    /// Number of stored edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when no edges are stored
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Stored edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterate over the stored edges
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Add `edge` unless an overlapping edge is already stored.
    ///
    /// Returns `true` if the edge was inserted.
    pub fn add(&mut self, edge: Edge) -> bool {
        if self.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// True when an edge overlapping `edge` is stored
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|e| Edge::are_overlapping_edges(e, edge))
    }

    /// Remove the edge equal to `edge` in the same direction.
    ///
    /// Returns `true` if an edge was removed.
    pub fn remove(&mut self, edge: &Edge) -> bool {
        match self.edges.iter().position(|e| Edge::same_edge(e, edge)) {
            Some(index) => {
                self.edges.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the edge overlapping `edge` in either direction, returning it
    pub fn remove_overlapping(&mut self, edge: &Edge) -> Option<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| Edge::are_overlapping_edges(e, edge))?;
        Some(self.edges.remove(index))
    }

    /// Remove and return the edge at `index`, preserving order
    pub fn take(&mut self, index: usize) -> Option<Edge> {
        if index < self.edges.len() {
            Some(self.edges.remove(index))
        } else {
            None
        }
    }

    /// Remove and return the last edge
    pub fn pop(&mut self) -> Option<Edge> {
        self.edges.pop()
    }

    /// Edges in `a` with no overlapping edge in `b`, in `a`'s order
    pub fn set_difference(a: &UniqueEdgeSet, b: &UniqueEdgeSet) -> UniqueEdgeSet {
        UniqueEdgeSet {
            edges: a.edges.iter().filter(|e| !b.contains(e)).copied().collect(),
        }
    }

    /// Indices of stored edges sharing a vertex with `edge`.
    ///
    /// A stored edge overlapping `edge` is the same segment, not a neighbour,
    /// and is left out.
    pub fn edges_sharing_vertex(&self, edge: &Edge) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                !Edge::are_overlapping_edges(e, edge) && Edge::has_shared_vertex(e, edge).is_some()
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// All endpoints, two per edge, in edge order
    pub fn points(&self) -> impl Iterator<Item = Point3d> + '_ {
        self.edges.iter().flat_map(|e| e.vertices())
    }
}

impl FromIterator<Edge> for UniqueEdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut set = UniqueEdgeSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Edge> for UniqueEdgeSet {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, iter: I) {
        for edge in iter {
            self.add(edge);
        }
    }
}

impl IntoIterator for UniqueEdgeSet {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a> IntoIterator for &'a UniqueEdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
