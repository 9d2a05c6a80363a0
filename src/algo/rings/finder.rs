/*!
# Shortest-Path Rings Through a Root Edge

Let `(a, b)` be a bond of an SP ring `R` of size `k`. Walking along `R` away from the bond, the
node at position `i` behind `a` is exactly `i` hops from `a` and `i + 1` hops from `b` (and
symmetrically on `b`'s side), as long as it lies in the half of the ring closer to the bond.
The [`RingFinder`] grows two *arms* in lockstep, one from `a` and one from `b`, and only
extends an arm by nodes carrying the right distance signature. With `m` nodes per arm a
candidate closes

- with even size `2m` if the arm ends are bonded,
- with odd size `2m + 1` through a common neighbour `c` of the arm ends that is `m` hops from
  both `a` and `b`.

Every candidate is verified with the antipodal test of [`Ring::is_shortest_path_ring`].

Let `x` and `y` be the ends of a pair of arms and `p = 2m - 1` the length of the open path
between them. An SP ring through the pair closes with a path of length `L` where
`d(x, y) = min(p, L)`, so its size is at least `p + d(x, y)` and exactly that if `d(x, y) < p`.
This gives the prunings of the search:
- nodes with a wrong distance signature are never added to an arm,
- a pair is not grown if no ring through it fits into the remaining size budget,
- a pair whose ends are closer than `p` fixes the ring size; it is grown only until that size
  is reached, and its descendants must agree with it.
*/

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use super::{ring::satisfies_shortest_paths, *};
use crate::repr::ZERO_SHIFT;

/// Node sequence grown from one endpoint of the root edge
type Arm = SmallVec<[Node; 8]>;

/// Largest size of an SP ring that may still close from a pair of arms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeBound {
    Unbounded,
    AtMost(usize),
    Exactly(usize),
}

impl SizeBound {
    fn limit(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::AtMost(k) | Self::Exactly(k) => Some(k),
        }
    }
}

/// Two arms with the same number of nodes; `left[0]` and `right[0]` form the root edge
#[derive(Debug, Clone)]
struct ArmPair {
    left: Arm,
    right: Arm,
    bound: SizeBound,
}

/// Work done by a single root edge search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchSummary {
    /// Number of arm lengths that were tried
    pub(crate) plies: Distance,
    /// Number of arm pairs over all plies
    pub(crate) arm_pairs: usize,
}

impl ArmPair {
    fn ends(&self) -> (Node, Node) {
        (
            *self.left.last().unwrap_or(&INVALID_NODE),
            *self.right.last().unwrap_or(&INVALID_NODE),
        )
    }

    /// The cyclic node sequence `left[m-1], ..., left[0], right[0], ..., right[m-1] (, closing)`
    fn close(&self, closing: Option<Node>) -> RingNodes {
        self.left
            .iter()
            .rev()
            .chain(self.right.iter())
            .copied()
            .chain(closing)
            .collect()
    }
}

/// Finds all shortest-path rings through a single root edge or node.
///
/// The finder borrows the graph and a [`DistanceOracle`]; the oracle must answer queries up
/// to `⌊max_size / 2⌋` hops exactly (every distance if `max_size` is `None`).
///
/// # Examples
/// ```
/// use ringstats::{prelude::*, algo::*};
///
/// // a square with one diagonal consists of two triangles
/// let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
/// let oracle = LazyDistances::new(&graph);
/// let finder = RingFinder::new(&graph, &oracle);
///
/// let rings = finder.rings_through_edge(0, 2).unwrap();
/// assert_eq!(rings.len(), 2);
/// assert!(finder.rings_through_edge(0, 1).unwrap().len() == 1);
/// ```
pub struct RingFinder<'a, O: ?Sized> {
    graph: &'a BondGraph,
    oracle: &'a O,
    max_size: Option<usize>,
    cancel: Option<&'a CancelToken>,
}

impl<'a, O> RingFinder<'a, O>
where
    O: DistanceOracle + ?Sized,
{
    /// Creates a finder without size limit
    pub fn new(graph: &'a BondGraph, oracle: &'a O) -> Self {
        Self {
            graph,
            oracle,
            max_size: None,
            cancel: None,
        }
    }

    /// Only reports rings with at most `max_size` nodes (if `Some`)
    pub fn max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Aborts the search once `token` is cancelled
    pub fn cancel_token(mut self, token: Option<&'a CancelToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Returns all SP rings containing the bond `(a, b)`, canonicalised and sorted.
    ///
    /// # Errors
    /// Returns [`RingError::InvalidRootEdge`] if `(a, b)` is not a bond of the graph,
    /// [`RingError::InsufficientCutoff`] if the oracle stops short of `⌊max_size / 2⌋` hops
    /// and [`RingError::Cancelled`] if the search was cancelled.
    pub fn rings_through_edge(&self, a: Node, b: Node) -> Result<Vec<Ring>, RingError> {
        self.validate_edge(Edge(a, b))?;
        self.validate_oracle()?;

        let mut rings = Vec::new();
        self.search(a, b, &mut |ring| rings.push(ring))?;
        rings.sort_unstable();
        Ok(rings)
    }

    /// Returns all SP rings containing node `u`, canonicalised, deduplicated and sorted.
    ///
    /// # Errors
    /// Returns [`RingError::InvalidRootNode`] if `u` is not a node of the graph,
    /// [`RingError::InsufficientCutoff`] if the oracle stops short of `⌊max_size / 2⌋` hops
    /// and [`RingError::Cancelled`] if the search was cancelled.
    pub fn rings_through_node(&self, u: Node) -> Result<Vec<Ring>, RingError> {
        self.validate_node(u)?;
        self.validate_oracle()?;

        let mut rings = Vec::new();
        for v in self.graph.neighbors_of(u) {
            self.search(u, v, &mut |ring| rings.push(ring))?;
        }
        rings.sort_unstable();
        rings.dedup();
        Ok(rings)
    }

    pub(crate) fn validate_node(&self, u: Node) -> Result<(), RingError> {
        if u < self.graph.number_of_nodes() {
            Ok(())
        } else {
            Err(RingError::InvalidRootNode {
                node: u,
                num_nodes: self.graph.number_of_nodes(),
            })
        }
    }

    pub(crate) fn validate_edge(&self, edge: Edge) -> Result<(), RingError> {
        let Edge(a, b) = edge;
        if a < self.graph.number_of_nodes() && self.graph.has_edge(a, b) {
            Ok(())
        } else {
            Err(RingError::InvalidRootEdge { edge })
        }
    }

    /// Fails if the oracle cannot answer every distance the search relies on
    fn validate_oracle(&self) -> Result<(), RingError> {
        let needed = required_distance(self.max_size);
        match self.oracle.cutoff() {
            Some(cutoff) if !self.oracle.covers(needed) => {
                Err(RingError::InsufficientCutoff { cutoff, needed })
            }
            _ => Ok(()),
        }
    }

    /// Reports every SP ring through the (valid) bond `(a, b)` exactly once
    pub(crate) fn search<F>(
        &self,
        a: Node,
        b: Node,
        emit: &mut F,
    ) -> Result<SearchSummary, RingError>
    where
        F: FnMut(Ring),
    {
        let mut summary = SearchSummary::default();
        if self.max_size.is_some_and(|k| k < 3) {
            return Ok(summary);
        }

        let half = required_distance(self.max_size);
        let da = self.oracle.distances_from(a, half);
        let db = self.oracle.distances_from(b, half);

        let mut pairs = vec![ArmPair {
            left: smallvec![a],
            right: smallvec![b],
            bound: self.max_size.map_or(SizeBound::Unbounded, SizeBound::AtMost),
        }];
        let mut m: Distance = 1;
        let mut found = 0usize;

        loop {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(RingError::Cancelled);
            }
            summary.plies = m;
            summary.arm_pairs += pairs.len();

            for pair in &pairs {
                self.close_pair(pair, m, &da, &db, &mut |ring| {
                    found += 1;
                    emit(ring)
                });
            }

            pairs = self.grow(pairs, m, &da, &db);
            if pairs.is_empty() {
                break;
            }
            m += 1;
        }

        trace!(
            a,
            b,
            plies = summary.plies,
            arm_pairs = summary.arm_pairs,
            rings = found,
            "searched root edge"
        );
        Ok(summary)
    }

    /// Tries the even and odd closures of a pair of arms with `m` nodes each
    fn close_pair<F>(
        &self,
        pair: &ArmPair,
        m: Distance,
        da: &BallDistances,
        db: &BallDistances,
        emit: &mut F,
    ) where
        F: FnMut(Ring),
    {
        let (x, y) = pair.ends();

        if m >= 2 && self.graph.has_edge(x, y) {
            self.accept(pair.close(None), emit);
        }

        if self.max_size.is_none_or(|k| 2 * m as usize + 1 <= k) {
            for c in self.graph.neighbors_of(x) {
                if da.get(c) == Some(m) && db.get(c) == Some(m) && self.graph.has_edge(y, c) {
                    self.accept(pair.close(Some(c)), emit);
                }
            }
        }
    }

    /// Size bound for the extensions of `pair` (arms with `m` nodes each), or `None` if no
    /// SP ring through `pair` closes at a later ply
    fn next_bound(&self, pair: &ArmPair, m: Distance) -> Option<SizeBound> {
        let (x, y) = pair.ends();
        let path = 2 * m as usize - 1;

        // the extensions need rings of at least `2m + 2 = path + 3` nodes
        let budget = match pair.bound.limit() {
            Some(k) if k < path + 3 => return None,
            limit => limit.map(|k| k - path),
        };

        let probe = budget.map_or(path - 1, |b| b.min(path - 1));
        match self.oracle.pairwise(x, y, Some(probe as Distance)) {
            Some(d) if d < 3 => None,
            Some(d) => match pair.bound {
                SizeBound::Exactly(size) if size != path + d as usize => None,
                _ => Some(SizeBound::Exactly(path + d as usize)),
            },
            None if budget.is_some_and(|b| b < path) => None,
            None => Some(pair.bound),
        }
    }

    /// Extends every pair of arms by one node on each side in all admissible ways
    fn grow(
        &self,
        pairs: Vec<ArmPair>,
        m: Distance,
        da: &BallDistances,
        db: &BallDistances,
    ) -> Vec<ArmPair> {
        let mut next = Vec::new();

        for pair in pairs {
            let Some(bound) = self.next_bound(&pair, m) else {
                continue;
            };
            let (x, y) = pair.ends();

            let lefts: Arm = self
                .graph
                .neighbors_of(x)
                .filter(|&v| da.get(v) == Some(m) && db.get(v) == Some(m + 1))
                .collect();
            if lefts.is_empty() {
                continue;
            }

            let rights: Arm = self
                .graph
                .neighbors_of(y)
                .filter(|&v| db.get(v) == Some(m) && da.get(v) == Some(m + 1))
                .collect();

            for &l in &lefts {
                for &r in &rights {
                    let mut extended = pair.clone();
                    extended.left.push(l);
                    extended.right.push(r);
                    extended.bound = bound;
                    next.push(extended);
                }
            }
        }

        next
    }

    fn accept<F>(&self, nodes: RingNodes, emit: &mut F)
    where
        F: FnMut(Ring),
    {
        if self.graph.has_image_shifts()
            && self.graph.closed_walk_shift(&nodes) != Some(ZERO_SHIFT)
        {
            return;
        }

        if satisfies_shortest_paths(&nodes, self.oracle) {
            emit(Ring::canonical(nodes));
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn nodes_of(rings: &[Ring]) -> Vec<Vec<Node>> {
        rings.iter().map(|r| r.nodes().to_vec()).collect_vec()
    }

    #[test]
    fn triangle() {
        let graph = BondGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
        let oracle = DistanceTable::new(&graph, None);
        let finder = RingFinder::new(&graph, &oracle);

        for (a, b) in [(0, 1), (1, 2), (2, 0), (1, 0)] {
            assert_eq!(nodes_of(&finder.rings_through_edge(a, b).unwrap()), vec![vec![0, 1, 2]]);
        }
        assert_eq!(nodes_of(&finder.rings_through_node(2).unwrap()), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn square_and_size_limit() {
        let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let oracle = LazyDistances::new(&graph);

        let finder = RingFinder::new(&graph, &oracle);
        assert_eq!(nodes_of(&finder.rings_through_edge(2, 3).unwrap()), vec![vec![0, 1, 2, 3]]);

        let finder = RingFinder::new(&graph, &oracle).max_size(Some(3));
        assert!(finder.rings_through_edge(2, 3).unwrap().is_empty());

        let finder = RingFinder::new(&graph, &oracle).max_size(Some(2));
        assert!(finder.rings_through_node(0).unwrap().is_empty());
    }

    #[test]
    fn odd_and_even_cycles() {
        for k in 3..12 as NumNodes {
            let graph = BondGraph::from_edges(k, (0..k).map(|u| (u, (u + 1) % k))).unwrap();
            let oracle = DistanceTable::new(&graph, None);
            let finder = RingFinder::new(&graph, &oracle);

            let expected = vec![(0..k).collect_vec()];
            for u in graph.vertices() {
                assert_eq!(nodes_of(&finder.rings_through_node(u).unwrap()), expected);
            }

            let limited = RingFinder::new(&graph, &oracle).max_size(Some(k as usize - 1));
            assert!(limited.rings_through_node(0).unwrap().is_empty());
        }
    }

    #[test]
    fn square_with_diagonal() {
        let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);

        assert_eq!(
            nodes_of(&finder.rings_through_edge(0, 2).unwrap()),
            vec![vec![0, 1, 2], vec![0, 2, 3]]
        );
        assert_eq!(nodes_of(&finder.rings_through_node(1).unwrap()), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn equal_size_rings_through_one_edge() {
        // K_{2,3}: three 4-rings share every pair of opposite nodes 0 and 1
        let graph =
            BondGraph::from_edges(5, [(0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4)]).unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);

        assert_eq!(
            nodes_of(&finder.rings_through_edge(0, 2).unwrap()),
            vec![vec![0, 2, 1, 3], vec![0, 2, 1, 4]]
        );
        assert_eq!(finder.rings_through_node(0).unwrap().len(), 3);
    }

    #[test]
    fn invalid_roots() {
        let graph = BondGraph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);

        assert_eq!(
            finder.rings_through_node(3).unwrap_err(),
            RingError::InvalidRootNode { node: 3, num_nodes: 3 }
        );
        assert_eq!(
            finder.rings_through_edge(0, 2).unwrap_err(),
            RingError::InvalidRootEdge { edge: Edge(0, 2) }
        );
        assert_eq!(
            finder.rings_through_edge(5, 0).unwrap_err(),
            RingError::InvalidRootEdge { edge: Edge(5, 0) }
        );
        assert!(finder.rings_through_node(1).unwrap().is_empty());
    }

    #[test]
    fn cancelled() {
        let graph = BondGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
        let oracle = LazyDistances::new(&graph);
        let token = CancelToken::new();
        token.cancel();

        let finder = RingFinder::new(&graph, &oracle).cancel_token(Some(&token));
        assert_eq!(finder.rings_through_node(0).unwrap_err(), RingError::Cancelled);
    }

    #[test]
    fn oracle_must_cover_half_the_ring_size() {
        let graph = BondGraph::from_edges(6, (0..6).map(|u| (u, (u + 1) % 6))).unwrap();
        let short = DistanceTable::new(&graph, Some(1));

        assert_eq!(
            RingFinder::new(&graph, &short)
                .rings_through_edge(0, 1)
                .unwrap_err(),
            RingError::InsufficientCutoff {
                cutoff: 1,
                needed: None
            }
        );
        assert_eq!(
            RingFinder::new(&graph, &short)
                .max_size(Some(6))
                .rings_through_node(0)
                .unwrap_err(),
            RingError::InsufficientCutoff {
                cutoff: 1,
                needed: Some(3)
            }
        );

        // triangles only need distances up to one hop
        let finder = RingFinder::new(&graph, &short).max_size(Some(3));
        assert!(finder.rings_through_edge(0, 1).unwrap().is_empty());

        let table = DistanceTable::new(&graph, Some(3));
        let finder = RingFinder::new(&graph, &table).max_size(Some(6));
        assert_eq!(
            nodes_of(&finder.rings_through_edge(0, 1).unwrap()),
            vec![(0..6).collect_vec()]
        );
    }

    #[test]
    fn size_budget_stops_diverging_arms() {
        // a path without rings; the arms from the middle bond never meet
        let graph = BondGraph::from_edges(42, (0..41).map(|u| (u, u + 1))).unwrap();

        // with 16 nodes at most, arms of 5 nodes are 9 hops apart and cannot close in budget
        let table = DistanceTable::new(&graph, Some(8));
        let finder = RingFinder::new(&graph, &table).max_size(Some(16));
        let summary = finder.search(20, 21, &mut |_| panic!("no rings")).unwrap();
        assert_eq!(
            summary,
            SearchSummary {
                plies: 5,
                arm_pairs: 5
            }
        );

        // without a limit the arms run until the path ends
        let lazy = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &lazy);
        let summary = finder.search(20, 21, &mut |_| panic!("no rings")).unwrap();
        assert_eq!(summary.plies, 21);
    }

    #[test]
    fn fixed_ring_size_stops_other_branches() {
        // a 14-ring with a two-atom tail at node 10
        let mut edges = (0..14).map(|u| Edge(u, (u + 1) % 14)).collect_vec();
        edges.extend([Edge(10, 14), Edge(14, 15)]);
        let graph = BondGraph::from_edges(16, edges).unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);

        // at 5 nodes per arm the ends 10 and 5 are 5 hops apart, fixing the ring size to 14;
        // the branch into the tail is then 5 instead of 3 hops from the other arm and dropped
        let mut rings = Vec::new();
        let summary = finder.search(0, 1, &mut |ring| rings.push(ring)).unwrap();
        assert_eq!(nodes_of(&rings), vec![(0..14).collect_vec()]);
        assert_eq!(
            summary,
            SearchSummary {
                plies: 7,
                arm_pairs: 8
            }
        );
    }

    #[test]
    fn periodic_wrap_is_rejected() {
        // a chain of four atoms that closes only through the periodic boundary
        let graph = BondGraph::from_edges_with_shifts(
            4,
            [
                ((0, 1), [0, 0, 0]),
                ((1, 2), [0, 0, 0]),
                ((2, 3), [0, 0, 0]),
                ((3, 0), [0, 0, 1]),
            ],
        )
        .unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);
        assert!(finder.rings_through_node(0).unwrap().is_empty());

        // the same ring without a net shift is physical
        let graph = BondGraph::from_edges_with_shifts(
            4,
            [
                ((0, 1), [0, 0, 1]),
                ((1, 2), [0, 0, 0]),
                ((2, 3), [0, 0, 0]),
                ((3, 0), [0, 0, -1]),
            ],
        )
        .unwrap();
        let oracle = LazyDistances::new(&graph);
        let finder = RingFinder::new(&graph, &oracle);
        assert_eq!(finder.rings_through_node(0).unwrap().len(), 1);
    }
}
