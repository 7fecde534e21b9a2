//! Generic directed weighted graph and an all-pairs shortest path router.

pub mod directed;
pub mod router;

pub use directed::{DirectedWeightedGraph, Edge, EdgeId, GraphError, VertexId};
pub use router::{Path, Router};
