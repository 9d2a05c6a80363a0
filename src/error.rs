/*!
# Errors

Two kinds of failures exist in this crate:

- [`InvalidGraph`] is raised exactly once, while constructing a [`BondGraph`](crate::repr::BondGraph).
  A graph that passed construction is never re-validated by any query.
- [`RingError`] is raised by ring queries for caller-side problems (an invalid root, a distance
  oracle with a too short cutoff) or when the caller cancelled a running enumeration.

Unreachable node pairs and ring branches that exceed the maximum ring size are **not** errors;
they are ordinary values (`None` distances, pruned branches).
*/

use thiserror::Error;

use crate::{edge::Edge, node::*};

/// Structural problems of an adjacency description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraph {
    /// An edge references a node index `>= n`
    #[error("edge {edge} references node {node}, but the graph only has {num_nodes} nodes")]
    NodeOutOfRange {
        edge: Edge,
        node: Node,
        num_nodes: NumNodes,
    },

    /// A bond from a node to itself
    #[error("self-loop at node {node}")]
    SelfLoop { node: Node },

    /// The same bond was supplied more than once
    #[error("duplicate edge {edge}")]
    DuplicateEdge { edge: Edge },

    /// A neighbour list/pair list contains `(u, v)` but not `(v, u)`
    #[error("edge {edge} is only listed in one direction")]
    AsymmetricEdge { edge: Edge },

    /// The bond `(u, v)` and its reverse carry image shifts that are not negations of each other
    #[error("image shifts of edge {edge} and its reverse do not cancel")]
    InconsistentShift { edge: Edge },

    /// More nodes than can be addressed by [`Node`]
    #[error("graph has {0} nodes, at most {max} are supported", max = INVALID_NODE)]
    TooManyNodes(usize),
}

/// Failures of ring queries on an already valid graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// The enumeration was cancelled through its [`CancelToken`](crate::utils::CancelToken).
    /// No partial result is returned.
    #[error("ring enumeration was cancelled")]
    Cancelled,

    /// A root node is `>= n`
    #[error("root node {node} is not part of a graph with {num_nodes} nodes")]
    InvalidRootNode { node: Node, num_nodes: NumNodes },

    /// A root edge is not a bond of the graph
    #[error("root edge {edge} is not a bond of the graph")]
    InvalidRootEdge { edge: Edge },

    /// The distance oracle answers fewer hops than the requested ring size needs
    #[error("distance oracle stops at {cutoff} hops, but {} are needed", hops(.needed))]
    InsufficientCutoff {
        cutoff: Distance,
        needed: Option<Distance>,
    },
}

fn hops(needed: &Option<Distance>) -> String {
    match needed {
        Some(d) => format!("{d} hops"),
        None => "all distances".to_string(),
    }
}
