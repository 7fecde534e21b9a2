//! All-pairs shortest paths over a [`DirectedWeightedGraph`].
//!
//! The router runs Dijkstra from every vertex once, at construction, and
//! keeps the best weight plus the last edge of the best path for each
//! (source, target) pair. Queries then only walk predecessor edges back to
//! the source. Weights must be non-negative.
//!
//! Ties are broken deterministically: the queue orders by (weight, vertex id),
//! edges are relaxed in insertion order and an entry is only replaced by a
//! strictly better one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::Add;
use std::time::Instant;

use super::directed::{DirectedWeightedGraph, EdgeId, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RouteEntry<W> {
    weight: W,
    prev_edge: Option<EdgeId>,
}

/// A shortest path: its total weight and the edges to follow, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

/// Owns a finished graph and answers shortest path queries over it.
#[derive(Clone, Debug)]
pub struct Router<W> {
    graph: DirectedWeightedGraph<W>,
    routes: Vec<Vec<Option<RouteEntry<W>>>>,
}

impl<W> Router<W>
where
    W: Copy + Ord + Add<Output = W> + Default,
{
    pub fn new(graph: DirectedWeightedGraph<W>) -> Self {
        let started = Instant::now();
        let routes = (0..graph.vertex_count())
            .map(|source| shortest_paths_from(&graph, source))
            .collect();

        log::debug!(
            "Precomputed shortest paths for {} vertices, {} edges in {:?}",
            graph.vertex_count(),
            graph.edge_count(),
            started.elapsed()
        );

        Self { graph, routes }
    }

    /// Minimum-weight path from `from` to `to`.
    ///
    /// Returns `None` when `to` is unreachable or either vertex is out of
    /// range. A path from a vertex to itself is empty with zero weight.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<Path<W>> {
        let from_source = self.routes.get(from)?;
        let entry = (*from_source.get(to)?)?;

        let mut edges = Vec::new();
        let mut prev_edge = entry.prev_edge;
        while let Some(edge_id) = prev_edge {
            edges.push(edge_id);
            let edge = self.graph.edge(edge_id)?;
            prev_edge = from_source[edge.from].and_then(|e| e.prev_edge);
        }
        edges.reverse();

        Some(Path {
            weight: entry.weight,
            edges,
        })
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<W> {
        &self.graph
    }
}

fn shortest_paths_from<W>(
    graph: &DirectedWeightedGraph<W>,
    source: VertexId,
) -> Vec<Option<RouteEntry<W>>>
where
    W: Copy + Ord + Add<Output = W> + Default,
{
    let mut best: Vec<Option<RouteEntry<W>>> = vec![None; graph.vertex_count()];
    best[source] = Some(RouteEntry {
        weight: W::default(),
        prev_edge: None,
    });

    let mut queue = BinaryHeap::new();
    queue.push(Reverse((W::default(), source)));

    while let Some(Reverse((weight, vertex))) = queue.pop() {
        if matches!(best[vertex], Some(entry) if weight > entry.weight) {
            continue; // stale queue entry
        }

        for &edge_id in graph.outgoing_edges(vertex) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let candidate = weight + edge.weight;
            let improves = match best[edge.to] {
                None => true,
                Some(entry) => candidate < entry.weight,
            };
            if improves {
                best[edge.to] = Some(RouteEntry {
                    weight: candidate,
                    prev_edge: Some(edge_id),
                });
                queue.push(Reverse((candidate, edge.to)));
            }
        }
    }

    best
}
