/*!
# Bond Graph

[`BondGraph`] is the immutable **Compressed Sparse Row (CSR)** representation of an undirected,
unweighted bond network. All neighbour lists are stored in a single flattened buffer, sorted
per node, which provides

- **compact storage** for sparse networks with millions of atoms,
- **fast sequential access** to neighbours (good cache locality during BFS),
- `O(log deg)` edge tests via binary search.

Construction validates the input exactly once; afterwards the graph is read-only and `Sync`,
so it can be shared between any number of worker threads.

Optionally, every bond carries a periodic [`ImageShift`]. A bond `(u, v)` with shift `s`
connects `u` with the image of `v` translated by `s` cell vectors; the reverse bond `(v, u)`
carries `-s`.
*/

use itertools::Itertools;
use tracing::debug;

use super::*;
use crate::{error::InvalidGraph, utils::sliced_buffer::SlicedBuffer};

/// Integer lattice translation of a bond in a periodic cell
pub type ImageShift = [i32; 3];

/// The shift of a bond inside the primary cell
pub const ZERO_SHIFT: ImageShift = [0, 0, 0];

/// Returns `-shift`
#[inline]
pub fn negated_shift(shift: ImageShift) -> ImageShift {
    shift.map(|x| -x)
}

/// Immutable, validated, undirected bond graph in CSR layout.
///
/// # Examples
/// ```
/// use ringstats::prelude::*;
///
/// let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
///
/// assert_eq!(graph.number_of_nodes(), 4);
/// assert_eq!(graph.number_of_edges(), 4);
/// assert_eq!(graph.as_neighbors_slice(0), &[1, 3]);
/// assert!(graph.has_edge(3, 2));
/// assert!(!graph.has_edge(0, 2));
///
/// // Invalid input is rejected, not repaired
/// assert!(BondGraph::from_edges(3, [(0, 1), (1, 0)]).is_err());
/// assert!(BondGraph::from_edges(3, [(0, 3)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BondGraph {
    nbs: SlicedBuffer<Node>,
    /// Aligned with the buffer of `nbs` if present
    shifts: Option<Vec<ImageShift>>,
    num_edges: NumEdges,
}

/// A directed half of a bond together with its image shift
type Arc = (Edge, ImageShift);

impl BondGraph {
    /// Creates a graph with `n` nodes from a list of undirected edges.
    /// Every bond must be listed exactly once (in either orientation).
    ///
    /// # Errors
    /// Returns [`InvalidGraph`] if an edge references a node `>= n`, is a self-loop,
    /// or is listed more than once.
    pub fn from_edges<I, E>(n: NumNodes, edges: I) -> Result<Self, InvalidGraph>
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>,
    {
        Self::from_undirected_arcs(n, edges.into_iter().map(|e| (e.into(), ZERO_SHIFT)), false)
    }

    /// Creates a graph with `n` nodes from undirected edges annotated with the image shift
    /// of the second endpoint relative to the first.
    ///
    /// # Errors
    /// Same conditions as [`BondGraph::from_edges`].
    pub fn from_edges_with_shifts<I, E>(n: NumNodes, edges: I) -> Result<Self, InvalidGraph>
    where
        E: Into<Edge>,
        I: IntoIterator<Item = (E, ImageShift)>,
    {
        Self::from_undirected_arcs(n, edges.into_iter().map(|(e, s)| (e.into(), s)), true)
    }

    /// Creates a graph from per-node neighbour lists. The number of nodes is the number of lists.
    /// Lists must be symmetric: if `v` is listed for `u`, `u` must be listed for `v`.
    ///
    /// # Errors
    /// Returns [`InvalidGraph`] on out-of-range nodes, self-loops, repeated neighbours or
    /// asymmetric lists.
    pub fn from_neighbor_lists<I, R>(lists: I) -> Result<Self, InvalidGraph>
    where
        R: IntoIterator<Item = Node>,
        I: IntoIterator<Item = R>,
    {
        let mut arcs = Vec::new();
        let mut n: NumNodes = 0;
        for row in lists {
            let u = n;
            n = check_node_count(n as usize + 1)?;
            arcs.extend(row.into_iter().map(|v| (Edge(u, v), ZERO_SHIFT)));
        }

        Self::from_directed_arcs(n, arcs, false)
    }

    /// Creates a graph with `n` nodes from directed neighbour pairs `(i, j)` as produced by
    /// atomistic neighbour-list builders: every bond appears twice, once as `(i, j)` and once
    /// as `(j, i)`.
    ///
    /// # Errors
    /// Returns [`InvalidGraph`] on out-of-range nodes, self-loops, repeated pairs or bonds that
    /// are only listed in one direction.
    pub fn from_neighbor_pairs<I, E>(n: NumNodes, pairs: I) -> Result<Self, InvalidGraph>
    where
        E: Into<Edge>,
        I: IntoIterator<Item = E>,
    {
        let arcs = pairs.into_iter().map(|e| (e.into(), ZERO_SHIFT)).collect();
        Self::from_directed_arcs(n, arcs, false)
    }

    /// Like [`BondGraph::from_neighbor_pairs`], but every pair carries the image shift of `j`
    /// relative to `i`. The shifts of `(i, j)` and `(j, i)` must cancel.
    ///
    /// # Errors
    /// Additionally returns [`InvalidGraph::InconsistentShift`] if they do not.
    pub fn from_neighbor_pairs_with_shifts<I, E>(
        n: NumNodes,
        pairs: I,
    ) -> Result<Self, InvalidGraph>
    where
        E: Into<Edge>,
        I: IntoIterator<Item = (E, ImageShift)>,
    {
        let arcs = pairs.into_iter().map(|(e, s)| (e.into(), s)).collect();
        Self::from_directed_arcs(n, arcs, true)
    }

    fn from_undirected_arcs<I>(
        n: NumNodes,
        edges: I,
        with_shifts: bool,
    ) -> Result<Self, InvalidGraph>
    where
        I: Iterator<Item = Arc>,
    {
        let mut arcs = Vec::with_capacity(2 * edges.size_hint().0);
        for (edge, shift) in edges {
            validate_edge(n, edge)?;
            arcs.push((edge, shift));
            arcs.push((edge.reverse(), negated_shift(shift)));
        }

        arcs.sort_unstable_by_key(|(e, _)| *e);
        if let Some(((edge, _), _)) = arcs.iter().tuple_windows().find(|(a, b)| a.0 == b.0) {
            return Err(InvalidGraph::DuplicateEdge {
                edge: edge.normalized(),
            });
        }

        Ok(Self::from_sorted_arcs(n, arcs, with_shifts))
    }

    fn from_directed_arcs(
        n: NumNodes,
        mut arcs: Vec<Arc>,
        with_shifts: bool,
    ) -> Result<Self, InvalidGraph> {
        for (edge, _) in &arcs {
            validate_edge(n, *edge)?;
        }

        arcs.sort_unstable_by_key(|(e, _)| *e);
        if let Some(((edge, _), _)) = arcs.iter().tuple_windows().find(|(a, b)| a.0 == b.0) {
            return Err(InvalidGraph::DuplicateEdge { edge: *edge });
        }

        for (edge, shift) in &arcs {
            let Ok(pos) = arcs.binary_search_by_key(&edge.reverse(), |(e, _)| *e) else {
                return Err(InvalidGraph::AsymmetricEdge { edge: *edge });
            };
            if arcs[pos].1 != negated_shift(*shift) {
                return Err(InvalidGraph::InconsistentShift {
                    edge: edge.normalized(),
                });
            }
        }

        Ok(Self::from_sorted_arcs(n, arcs, with_shifts))
    }

    /// Builds the CSR layout from validated, sorted, symmetric arcs
    fn from_sorted_arcs(n: NumNodes, arcs: Vec<Arc>, with_shifts: bool) -> Self {
        let mut offsets = Vec::with_capacity(n as usize + 1);
        offsets.push(0);

        let mut pos = 0;
        for u in 0..n {
            while pos < arcs.len() && arcs[pos].0.0 == u {
                pos += 1;
            }
            offsets.push(pos);
        }
        debug_assert_eq!(pos, arcs.len());

        let num_edges = (arcs.len() / 2) as NumEdges;
        let shifts = with_shifts.then(|| arcs.iter().map(|(_, s)| *s).collect_vec());
        let buffer = arcs.into_iter().map(|(Edge(_, v), _)| v).collect_vec();

        debug!(
            nodes = n,
            edges = num_edges,
            periodic = with_shifts,
            "constructed bond graph"
        );

        Self {
            nbs: SlicedBuffer::new(buffer, offsets),
            shifts,
            num_edges,
        }
    }

    /// Returns *true* if the bonds of this graph carry periodic image shifts
    pub fn has_image_shifts(&self) -> bool {
        self.shifts.is_some()
    }

    /// Returns the image shift of `v` relative to `u` along the bond `(u, v)`.
    /// Graphs without shifts report [`ZERO_SHIFT`] for every bond.
    /// Returns `None` if `(u, v)` is not a bond.
    /// ** Panics if `u >= n` **
    pub fn image_shift(&self, u: Node, v: Node) -> Option<ImageShift> {
        let idx = self.nbs[u].binary_search(&v).ok()?;
        Some(match &self.shifts {
            Some(shifts) => shifts[self.nbs.offset_of(u) + idx],
            None => ZERO_SHIFT,
        })
    }

    /// Returns the sum of image shifts along the closed walk
    /// `cycle[0] -> cycle[1] -> ... -> cycle[0]`.
    /// Returns `None` if two consecutive nodes are not bonded.
    pub fn closed_walk_shift(&self, cycle: &[Node]) -> Option<ImageShift> {
        if self.shifts.is_none() {
            return cycle
                .iter()
                .circular_tuple_windows()
                .all(|(&u, &v)| self.has_edge(u, v))
                .then_some(ZERO_SHIFT);
        }

        let mut total = ZERO_SHIFT;
        for (&u, &v) in cycle.iter().circular_tuple_windows() {
            let shift = self.image_shift(u, v)?;
            for (t, s) in total.iter_mut().zip(shift) {
                *t += s;
            }
        }
        Some(total)
    }
}

fn check_node_count(n: usize) -> Result<NumNodes, InvalidGraph> {
    if n >= INVALID_NODE as usize {
        Err(InvalidGraph::TooManyNodes(n))
    } else {
        Ok(n as NumNodes)
    }
}

fn validate_edge(n: NumNodes, edge: Edge) -> Result<(), InvalidGraph> {
    for node in [edge.0, edge.1] {
        if node >= n {
            return Err(InvalidGraph::NodeOutOfRange {
                edge,
                node,
                num_nodes: n,
            });
        }
    }

    if edge.is_loop() {
        return Err(InvalidGraph::SelfLoop { node: edge.0 });
    }

    Ok(())
}

impl GraphNodeOrder for BondGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.number_of_rows()
    }
}

impl GraphEdgeOrder for BondGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for BondGraph {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs.size_of(u) as NumNodes
    }
}

impl AdjacencyTest for BondGraph {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.nbs[u].binary_search(&v).is_ok()
    }
}

impl NeighborsSlice for BondGraph {
    fn as_neighbors_slice(&self, u: Node) -> &[Node] {
        &self.nbs[u]
    }
}
