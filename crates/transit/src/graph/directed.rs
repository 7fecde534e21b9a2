//! Append-only directed graph with edge ids assigned in insertion order.

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Vertex {vertex} out of range (graph has {vertex_count} vertices)")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
}

/// Directed graph with a fixed vertex count.
///
/// Edges can only be added. Ids stay dense: after `n` insertions they are
/// exactly `0..n`.
#[derive(Clone, Debug)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W> DirectedWeightedGraph<W> {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: (0..vertex_count).map(|_| Vec::new()).collect(),
        }
    }

    pub fn add_edge(&mut self, edge: Edge<W>) -> Result<EdgeId, GraphError> {
        let vertex_count = self.vertex_count();
        for vertex in [edge.from, edge.to] {
            if vertex >= vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }

        let id = self.edges.len();
        self.incidence_lists[edge.from].push(id);
        self.edges.push(edge);
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<W>> {
        self.edges.get(id)
    }

    /// Ids of edges leaving `vertex`, in insertion order.
    pub fn outgoing_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence_lists
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ids_are_dense() {
        let mut graph = DirectedWeightedGraph::new(3);

        assert_eq!(graph.add_edge(Edge { from: 0, to: 1, weight: 5 }), Ok(0));
        assert_eq!(graph.add_edge(Edge { from: 1, to: 2, weight: 1 }), Ok(1));
        assert_eq!(graph.add_edge(Edge { from: 0, to: 2, weight: 9 }), Ok(2));

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge(1), Some(&Edge { from: 1, to: 2, weight: 1 }));
        assert_eq!(graph.edge(3), None);
    }

    #[test]
    fn test_outgoing_edges_keep_insertion_order() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(Edge { from: 0, to: 2, weight: 1 }).unwrap();
        graph.add_edge(Edge { from: 1, to: 2, weight: 1 }).unwrap();
        graph.add_edge(Edge { from: 0, to: 1, weight: 1 }).unwrap();

        assert_eq!(graph.outgoing_edges(0), &[0, 2]);
        assert_eq!(graph.outgoing_edges(1), &[1]);
        assert!(graph.outgoing_edges(2).is_empty());
        assert!(graph.outgoing_edges(42).is_empty());
    }

    #[test]
    fn test_rejects_unknown_vertex() {
        let mut graph = DirectedWeightedGraph::new(2);
        let err = graph.add_edge(Edge { from: 0, to: 2, weight: 1 }).unwrap_err();

        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            }
        );
        assert_eq!(graph.edge_count(), 0);
    }
}
