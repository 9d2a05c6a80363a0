/*!
# Hop Distances

Ring searches ask two kinds of distance questions:

1. *"Which nodes lie within `h` hops of `root`, and how far away are they?"* ([`BallDistances`])
2. *"Is `v` within `h` hops of `u`, and if so, how far?"*

Both are answered by a [`DistanceOracle`]. Two oracles are provided:

- [`DistanceTable`] precomputes every row once (up to an optional cutoff) in parallel and
  answers pair queries by binary search. This pays off for whole-graph enumerations where
  every node is queried many times.
- [`LazyDistances`] runs a bounded BFS per query and stops at the target. This is the better
  choice for a handful of roots in a large network.

Unreachable pairs and pairs beyond a cutoff are reported as `None`.
*/

use fxhash::FxHashMap;
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::*;
use crate::utils::sliced_buffer::SlicedBuffer;

/// Hop distances of all nodes within a ball around a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallDistances {
    root: Node,
    distances: FxHashMap<Node, Distance>,
}

impl BallDistances {
    /// Collects a ball from `(node, distance)` pairs
    pub fn from_pairs<I>(root: Node, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Node, Distance)>,
    {
        Self {
            root,
            distances: pairs.into_iter().collect(),
        }
    }

    /// The center of the ball
    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the distance of `u` from the root if `u` lies inside the ball
    #[inline]
    pub fn get(&self, u: Node) -> Option<Distance> {
        self.distances.get(&u).copied()
    }

    /// Returns *true* if `u` lies inside the ball
    pub fn contains(&self, u: Node) -> bool {
        self.distances.contains_key(&u)
    }

    /// Number of nodes inside the ball (including the root)
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns *true* if the ball is empty (only possible for balls built from no pairs)
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Largest distance inside the ball
    pub fn radius(&self) -> Distance {
        self.distances.values().copied().max().unwrap_or(0)
    }

    /// Iterator over `(node, distance)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Node, Distance)> + '_ {
        self.distances.iter().map(|(&u, &d)| (u, d))
    }

    /// Returns all `(node, distance)` pairs sorted by node
    pub fn into_sorted_vec(self) -> Vec<(Node, Distance)> {
        let mut pairs: Vec<_> = self.distances.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Answers bounded hop-distance queries on a fixed graph.
///
/// Implementations must be shareable between worker threads.
pub trait DistanceOracle: Sync {
    /// Returns the distance between `u` and `v` if it is at most `max_distance`,
    /// or unconditionally if `max_distance` is `None`.
    /// Returns `None` if `v` is unreachable or farther away.
    ///
    /// ** Panics if `u >= n` **
    fn pairwise(&self, u: Node, v: Node, max_distance: Option<Distance>) -> Option<Distance>;

    /// Returns all nodes within `max_distance` hops of `root` (the whole component if `None`).
    ///
    /// ** Panics if `root >= n` **
    fn distances_from(&self, root: Node, max_distance: Option<Distance>) -> BallDistances;

    /// The largest distance this oracle answers exactly (`None` means every distance).
    /// Queries beyond the cutoff treat farther nodes as unreachable.
    fn cutoff(&self) -> Option<Distance> {
        None
    }

    /// Returns *true* if this oracle answers every query up to `max_distance` exactly
    fn covers(&self, max_distance: Option<Distance>) -> bool {
        match (self.cutoff(), max_distance) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(cutoff), Some(max)) => max <= cutoff,
        }
    }
}

/// Returns the smaller of two optional bounds, where `None` means unbounded
fn min_bound(a: Option<Distance>, b: Option<Distance>) -> Option<Distance> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Distances of all node pairs up to an optional cutoff.
///
/// Row `u` stores `(v, d(u, v))` for every `v` within the cutoff, sorted by `v`.
///
/// # Examples
/// ```
/// use ringstats::{prelude::*, algo::*};
///
/// let graph = BondGraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
/// let table = DistanceTable::new(&graph, Some(2));
///
/// assert_eq!(table.get(0, 2), Some(2));
/// assert_eq!(table.get(0, 3), None); // beyond the cutoff
/// assert_eq!(table.row(4), &[(2, 2), (3, 1), (4, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    rows: SlicedBuffer<(Node, Distance)>,
    cutoff: Option<Distance>,
}

impl DistanceTable {
    /// Computes all rows in parallel
    pub fn new<G>(graph: &G, cutoff: Option<Distance>) -> Self
    where
        G: AdjacencyList + Sync,
    {
        Self::build(graph, cutoff, true)
    }

    /// Computes all rows on the calling thread
    pub fn new_sequential<G>(graph: &G, cutoff: Option<Distance>) -> Self
    where
        G: AdjacencyList + Sync,
    {
        Self::build(graph, cutoff, false)
    }

    #[instrument(skip(graph), fields(nodes = graph.number_of_nodes()))]
    fn build<G>(graph: &G, cutoff: Option<Distance>, parallel: bool) -> Self
    where
        G: AdjacencyList + Sync,
    {
        let row_of = |u: Node| -> Vec<(Node, Distance)> {
            let mut row: Vec<_> = match cutoff {
                Some(max) => graph.bfs_within(u, max).collect(),
                None => graph.bfs(u).collect(),
            };
            row.sort_unstable_by_key(|(v, _)| *v);
            row
        };

        let rows: Vec<Vec<(Node, Distance)>> = if parallel {
            graph.vertices_range().into_par_iter().map(row_of).collect()
        } else {
            graph.vertices_range().map(row_of).collect()
        };

        let rows = SlicedBuffer::from_rows(rows);
        debug!(entries = rows.number_of_entries(), "built distance table");

        Self { rows, cutoff }
    }

    /// Number of rows (equals the number of nodes of the graph)
    pub fn number_of_nodes(&self) -> NumNodes {
        self.rows.number_of_rows()
    }

    /// The largest distance stored in the table (`None` means unbounded)
    pub fn cutoff(&self) -> Option<Distance> {
        self.cutoff
    }

    /// Returns `d(u, v)` if it does not exceed the cutoff.
    /// ** Panics if `u >= n` **
    #[inline]
    pub fn get(&self, u: Node, v: Node) -> Option<Distance> {
        let row = &self.rows[u];
        row.binary_search_by_key(&v, |(w, _)| *w)
            .ok()
            .map(|idx| row[idx].1)
    }

    /// All `(v, d(u, v))` within the cutoff, sorted by `v`.
    /// ** Panics if `u >= n` **
    pub fn row(&self, u: Node) -> &[(Node, Distance)] {
        &self.rows[u]
    }

    /// Iterator over all stored pairs `(u, v, d)` with `u < v`
    pub fn pairs(&self) -> impl Iterator<Item = (Node, Node, Distance)> + '_ {
        (0..self.number_of_nodes()).flat_map(move |u| {
            self.rows[u]
                .iter()
                .filter(move |(v, _)| u < *v)
                .map(move |&(v, d)| (u, v, d))
        })
    }

    /// Expands the table into a row-major `n x n` matrix
    pub fn to_dense(&self) -> Vec<Option<Distance>> {
        let n = self.number_of_nodes() as usize;
        let mut dense = vec![None; n * n];
        for (u, row) in self.rows.rows().enumerate() {
            for &(v, d) in row {
                dense[u * n + v as usize] = Some(d);
            }
        }
        dense
    }
}

impl DistanceOracle for DistanceTable {
    fn pairwise(&self, u: Node, v: Node, max_distance: Option<Distance>) -> Option<Distance> {
        self.get(u, v)
            .filter(|&d| max_distance.is_none_or(|max| d <= max))
    }

    fn distances_from(&self, root: Node, max_distance: Option<Distance>) -> BallDistances {
        BallDistances::from_pairs(
            root,
            self.rows[root]
                .iter()
                .copied()
                .filter(|&(_, d)| max_distance.is_none_or(|max| d <= max)),
        )
    }

    fn cutoff(&self) -> Option<Distance> {
        self.cutoff
    }
}

/// Answers every query with a fresh bounded BFS on the borrowed graph
#[derive(Debug, Clone, Copy)]
pub struct LazyDistances<'a, G> {
    graph: &'a G,
    cutoff: Option<Distance>,
}

impl<'a, G> LazyDistances<'a, G>
where
    G: AdjacencyList + Sync,
{
    /// Creates an oracle without cutoff
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            cutoff: None,
        }
    }

    /// Limits every query to at most `cutoff` hops
    pub fn with_cutoff(mut self, cutoff: Option<Distance>) -> Self {
        self.cutoff = cutoff;
        self
    }
}

impl<G> DistanceOracle for LazyDistances<'_, G>
where
    G: AdjacencyList + Sync,
{
    fn pairwise(&self, u: Node, v: Node, max_distance: Option<Distance>) -> Option<Distance> {
        if u == v {
            return Some(0);
        }

        match min_bound(self.cutoff, max_distance) {
            Some(max) => self.graph.bfs_within(u, max).distance_to(v),
            None => self.graph.bfs(u).distance_to(v),
        }
    }

    fn distances_from(&self, root: Node, max_distance: Option<Distance>) -> BallDistances {
        match min_bound(self.cutoff, max_distance) {
            Some(max) => BallDistances::from_pairs(root, self.graph.bfs_within(root, max)),
            None => BallDistances::from_pairs(root, self.graph.bfs(root)),
        }
    }

    fn cutoff(&self) -> Option<Distance> {
        self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::{all_pairs_distances, random_bond_graph};

    fn two_triangles() -> BondGraph {
        BondGraph::from_edges(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap()
    }

    #[test]
    fn ball_of_radius_zero() {
        let graph = two_triangles();
        let lazy = LazyDistances::new(&graph);
        let table = DistanceTable::new(&graph, None);

        for oracle in [&lazy as &dyn DistanceOracle, &table] {
            let ball = oracle.distances_from(4, Some(0));
            assert_eq!(ball.root(), 4);
            assert_eq!(ball.into_sorted_vec(), vec![(4, 0)]);
        }
    }

    #[test]
    fn cross_component_is_none() {
        let graph = two_triangles();
        let lazy = LazyDistances::new(&graph);
        let table = DistanceTable::new(&graph, None);

        for oracle in [&lazy as &dyn DistanceOracle, &table] {
            assert_eq!(oracle.pairwise(0, 4, None), None);
            assert_eq!(oracle.pairwise(0, 4, Some(100)), None);
            assert_eq!(oracle.pairwise(0, 2, None), Some(1));

            let ball = oracle.distances_from(0, None);
            assert_eq!(ball.len(), 3);
            assert!(!ball.contains(3));
            assert_eq!(ball.radius(), 1);
        }
    }

    #[test]
    fn cutoff() {
        let graph = BondGraph::from_edges(6, (1..6).map(|u| (u - 1, u))).unwrap();

        let table = DistanceTable::new(&graph, Some(2));
        assert_eq!(table.cutoff(), Some(2));
        assert_eq!(table.pairwise(0, 2, None), Some(2));
        assert_eq!(table.pairwise(0, 2, Some(1)), None);
        assert_eq!(table.pairwise(0, 3, None), None);
        assert!(table.covers(Some(2)));
        assert!(!table.covers(Some(3)));
        assert!(!table.covers(None));

        let lazy = LazyDistances::new(&graph).with_cutoff(Some(3));
        assert_eq!(lazy.pairwise(0, 3, None), Some(3));
        assert_eq!(lazy.pairwise(0, 4, None), None);
        assert_eq!(lazy.pairwise(0, 3, Some(2)), None);
        assert_eq!(lazy.distances_from(0, Some(10)).len(), 4);
    }

    #[test]
    #[rustfmt::skip]
    fn dense_layout() {
        let graph = BondGraph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        let table = DistanceTable::new(&graph, None);

        assert_eq!(
            table.to_dense(),
            vec![
                Some(0), Some(1), Some(2),
                Some(1), Some(0), Some(1),
                Some(2), Some(1), Some(0),
            ]
        );
        assert_eq!(
            table.pairs().collect_vec(),
            vec![(0, 1, 1), (0, 2, 2), (1, 2, 1)]
        );
    }

    #[test]
    fn matches_brute_force() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for (n, p) in [(10, 0.2), (25, 0.1), (40, 0.05)] {
            let graph = random_bond_graph(rng, n, p);
            let expected = all_pairs_distances(&graph);

            let table = DistanceTable::new(&graph, None);
            let sequential = DistanceTable::new_sequential(&graph, None);
            assert_eq!(table, sequential);

            let lazy = LazyDistances::new(&graph);
            for u in graph.vertices() {
                for v in graph.vertices() {
                    let d = expected[u as usize][v as usize];
                    assert_eq!(table.get(u, v), d);
                    assert_eq!(lazy.pairwise(u, v, None), d);
                    assert_eq!(lazy.pairwise(u, v, Some(2)), d.filter(|&d| d <= 2));
                }
            }
        }
    }

    #[test]
    fn symmetry_and_triangle_inequality() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);
        let graph = random_bond_graph(rng, 30, 0.12);
        let table = DistanceTable::new(&graph, None);

        for u in graph.vertices() {
            for v in graph.vertices() {
                assert_eq!(table.get(u, v), table.get(v, u));
                let Some(duv) = table.get(u, v) else {
                    continue;
                };
                for w in graph.vertices() {
                    if let (Some(duw), Some(dwv)) = (table.get(u, w), table.get(w, v)) {
                        assert!(duv <= duw + dwv);
                    }
                }
            }
        }
    }

    #[test]
    fn bounded_table_is_truncated_full_table() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);
        let graph = random_bond_graph(rng, 30, 0.1);

        let full = DistanceTable::new(&graph, None);
        let bounded = DistanceTable::new(&graph, Some(2));

        for u in graph.vertices() {
            let expected = full.row(u).iter().copied().filter(|(_, d)| *d <= 2).collect_vec();
            assert_eq!(bounded.row(u), expected.as_slice());
        }
    }
}
