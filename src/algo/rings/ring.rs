use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

use itertools::Itertools;
use smallvec::SmallVec;

use super::*;

/// Node sequence of a ring; rings in bond networks rarely exceed 16 nodes
pub type RingNodes = SmallVec<[Node; 16]>;

/// A node-simple cycle of at least three nodes in canonical form.
///
/// The canonical form starts at the smallest node and continues towards the smaller of its two
/// ring neighbours. Two rings are equal iff they consist of the same cyclic node sequence,
/// irrespective of the rotation or direction they were discovered in.
///
/// Rings are ordered by size first and by node sequence second.
///
/// # Examples
/// ```
/// use ringstats::algo::Ring;
///
/// let ring = Ring::from_cycle([5, 2, 7, 1]).unwrap();
/// assert_eq!(ring.nodes(), &[1, 5, 2, 7]);
/// assert_eq!(ring, Ring::from_cycle([2, 5, 1, 7]).unwrap());
///
/// assert!(Ring::from_cycle([0, 1]).is_none());
/// assert!(Ring::from_cycle([0, 1, 0, 2]).is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ring {
    nodes: RingNodes,
}

impl Ring {
    /// Creates the canonical ring of a cyclic node sequence.
    /// Returns `None` if the sequence has fewer than three nodes or repeats a node.
    ///
    /// Adjacency in a graph is not checked; see [`Ring::is_closed_in`].
    pub fn from_cycle<I>(nodes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let nodes: RingNodes = nodes.into_iter().collect();
        (nodes.len() >= 3 && nodes.iter().all_unique()).then(|| Self::canonical(nodes))
    }

    /// Canonicalises a sequence known to be a simple cycle
    pub(crate) fn canonical(mut nodes: RingNodes) -> Self {
        debug_assert!(nodes.len() >= 3);

        let start = nodes.iter().position_min().unwrap_or(0);
        nodes.rotate_left(start);

        if nodes[1] > nodes[nodes.len() - 1] {
            nodes[1..].reverse();
        }

        Self { nodes }
    }

    /// Number of nodes (equivalently, bonds) of the ring
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Canonical node sequence
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterator over the canonical node sequence
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns *true* if `u` is part of the ring
    pub fn contains(&self, u: Node) -> bool {
        self.nodes.contains(&u)
    }

    /// Returns *true* if `edge` (in either orientation) is a bond of the ring
    pub fn contains_edge(&self, edge: Edge) -> bool {
        let edge = edge.normalized();
        self.edges().any(|e| e.normalized() == edge)
    }

    /// Iterator over the bonds of the ring in traversal order, including the closing bond
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .circular_tuple_windows()
            .map(|(&u, &v)| Edge(u, v))
    }

    /// Returns *true* if every pair of consecutive nodes is bonded in `graph`
    pub fn is_closed_in<G: AdjacencyTest>(&self, graph: &G) -> bool {
        self.edges().all(|Edge(u, v)| graph.has_edge(u, v))
    }

    /// Returns *true* if the graph distance of every node pair equals its distance along the ring
    pub fn is_shortest_path_ring<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> bool {
        satisfies_shortest_paths(&self.nodes, oracle)
    }

    /// Consumes the ring and returns its canonical node sequence
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes.into_vec()
    }
}

/// Tests the shortest-path property of a cyclic sequence.
///
/// It suffices to check that every node is `⌊k/2⌋` hops away from the node `⌊k/2⌋` positions
/// ahead: a shortcut between any two ring nodes would also shorten the path from one of them to
/// such an antipode.
pub(crate) fn satisfies_shortest_paths<O>(nodes: &[Node], oracle: &O) -> bool
where
    O: DistanceOracle + ?Sized,
{
    let k = nodes.len();
    let half = k / 2;
    let checks = if k % 2 == 0 { half } else { k };

    (0..checks).all(|i| {
        oracle.pairwise(nodes[i], nodes[(i + half) % k], Some(half as Distance))
            == Some(half as Distance)
    })
}

impl PartialOrd for Ring {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ring {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size()
            .cmp(&other.size())
            .then_with(|| self.nodes.cmp(&other.nodes))
    }
}

impl Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.nodes.iter().join(", "))
    }
}

impl Debug for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ring{self}")
    }
}

impl From<Ring> for Vec<Node> {
    fn from(ring: Ring) -> Self {
        ring.into_vec()
    }
}
